//! Dynamic attribute values.

use std::fmt;

use indexmap::IndexMap;

use crate::typecast::ScalarType;

/// A form attribute value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

/// The runtime kind of a [`Value`], used in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Returns the lowercase name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Joins kinds the way they appear in error messages (`string|null`).
    pub fn join(kinds: &[Self]) -> String {
        kinds
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Returns the kind of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::List(_) => ValueKind::Array,
            Self::Map(_) => ValueKind::Object,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns whether the value is a single scalar (or null).
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Map(_))
    }

    /// Null, empty string and empty list count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(map) => map.is_empty(),
            _ => false,
        }
    }

    /// The string payload of a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the string used in HTML attributes and for comparisons.
    ///
    /// Null, lists and maps have no attribute form.
    pub fn to_attr_string(&self) -> Option<String> {
        match self {
            Self::Null | Self::List(_) | Self::Map(_) => None,
            Self::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(s.clone()),
        }
    }

    /// Membership test used by choice widgets.
    ///
    /// Lists match when any element equals `needle`; scalars compare by
    /// their attribute string.
    pub fn matches(&self, needle: &str) -> bool {
        match self {
            Self::List(items) => items
                .iter()
                .any(|item| item.to_attr_string().as_deref() == Some(needle)),
            other => other.to_attr_string().as_deref() == Some(needle),
        }
    }

    /// Returns whether the value is a number or a numeric string.
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Int(_) | Self::Float(_) => true,
            Self::String(s) => s.trim().parse::<f64>().is_ok(),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Self::Int(i64::from(i))
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        i64::try_from(i).map_or(Self::Float(i as f64), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        i64::try_from(i).map_or(Self::Float(i as f64), Self::Int)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(0.0)), Self::Int),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Conversion from a coerced [`Value`] back into a typed model field.
///
/// `SCALAR_TYPE` tells the loader which coercion to apply before calling
/// [`FromValue::from_value`].
pub trait FromValue: Sized {
    const SCALAR_TYPE: ScalarType;

    /// Returns `None` when the value has the wrong shape.
    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for Value {
    const SCALAR_TYPE: ScalarType = ScalarType::Untyped;

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl FromValue for String {
    const SCALAR_TYPE: ScalarType = ScalarType::String;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            Value::Null => Some(Self::new()),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const SCALAR_TYPE: ScalarType = ScalarType::Bool;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            Value::Null => Some(false),
            _ => None,
        }
    }
}

macro_rules! int_from_value {
    ($($t:ty),*) => {
        $(impl FromValue for $t {
            const SCALAR_TYPE: ScalarType = ScalarType::Int;

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Int(i) => <$t>::try_from(i).ok(),
                    Value::Null => Some(0),
                    _ => None,
                }
            }
        })*
    };
}

int_from_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    const SCALAR_TYPE: ScalarType = ScalarType::Float;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f),
            Value::Int(i) => Some(i as f64),
            Value::Null => Some(0.0),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    const SCALAR_TYPE: ScalarType = ScalarType::Float;

    fn from_value(value: Value) -> Option<Self> {
        f64::from_value(value).map(|f| f as f32)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const SCALAR_TYPE: ScalarType = T::SCALAR_TYPE;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const SCALAR_TYPE: ScalarType = ScalarType::Array;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            Value::Null => Some(Vec::new()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_string() {
        assert_eq!(Value::Null.to_attr_string(), None);
        assert_eq!(Value::Bool(true).to_attr_string().as_deref(), Some("1"));
        assert_eq!(Value::Bool(false).to_attr_string().as_deref(), Some("0"));
        assert_eq!(Value::Int(42).to_attr_string().as_deref(), Some("42"));
        assert_eq!(Value::Float(1.5).to_attr_string().as_deref(), Some("1.5"));
        assert_eq!(Value::from(vec![1, 2]).to_attr_string(), None);
    }

    #[test]
    fn test_matches_list_and_scalar() {
        let list = Value::from(vec![1]);
        assert!(list.matches("1"));
        assert!(!list.matches("0"));

        let scalar = Value::from("a");
        assert!(scalar.matches("a"));
        assert!(!Value::Null.matches(""));
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({"a": [1, "x"], "b": 2.5, "c": null});
        let value = Value::from(json);
        let Value::Map(map) = value else {
            panic!("expected map");
        };
        assert_eq!(map["a"], Value::List(vec![Value::Int(1), Value::from("x")]));
        assert_eq!(map["b"], Value::Float(2.5));
        assert_eq!(map["c"], Value::Null);
    }

    #[test]
    fn test_from_value_typed() {
        assert_eq!(i32::from_value(Value::Int(7)), Some(7));
        assert_eq!(u8::from_value(Value::Int(-1)), None);
        assert_eq!(
            Vec::<String>::from_value(Value::from(vec!["a", "b"])),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(Option::<i64>::from_value(Value::Null), Some(None));
        assert_eq!(String::from_value(Value::from(vec!["a"])), None);
    }

    #[test]
    fn test_kind_join() {
        assert_eq!(
            ValueKind::join(&[ValueKind::String, ValueKind::Null]),
            "string|null"
        );
    }
}
