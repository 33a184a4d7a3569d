//! Coercion of raw submitted values into declared attribute types.

use std::fmt;

use crate::error::{FormError, Result};
use crate::value::Value;

/// The declared scalar type of a model attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Float,
    Bool,
    String,
    Array,
    /// Values are stored as submitted.
    Untyped,
}

impl ScalarType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Array => "array",
            Self::Untyped => "mixed",
        }
    }

    /// Casts `value` to this type.
    ///
    /// Empty strings become `Null` for numeric types, since browsers submit
    /// `""` for untouched number inputs. Lists and maps never coerce to a
    /// scalar type.
    pub fn cast(self, attribute: &str, value: Value) -> Result<Value> {
        let mismatch = |value: &Value| FormError::TypeMismatch {
            attribute: attribute.to_string(),
            declared: self.as_str(),
            actual: value.kind().as_str(),
        };

        match (self, value) {
            (Self::Untyped, v) | (_, v @ Value::Null) => Ok(v),

            (Self::String, v @ (Value::List(_) | Value::Map(_))) => Err(mismatch(&v)),
            (Self::String, Value::Bool(false)) => Ok(Value::String(String::new())),
            (Self::String, v) => Ok(Value::String(v.to_attr_string().unwrap_or_default())),

            (Self::Int, Value::Int(i)) => Ok(Value::Int(i)),
            (Self::Int, Value::Float(f)) => Ok(Value::Int(f.trunc() as i64)),
            (Self::Int, Value::Bool(b)) => Ok(Value::Int(i64::from(b))),
            (Self::Int, Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(Value::Null);
                }
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64))
                    .map(Value::Int)
                    .ok_or_else(|| mismatch(&Value::String(s.clone())))
            }

            (Self::Float, Value::Float(f)) => Ok(Value::Float(f)),
            (Self::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
            (Self::Float, Value::Bool(b)) => Ok(Value::Float(if b { 1.0 } else { 0.0 })),
            (Self::Float, Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(Value::Null);
                }
                trimmed
                    .parse::<f64>()
                    .map(Value::Float)
                    .map_err(|_| mismatch(&Value::String(s.clone())))
            }

            (Self::Bool, Value::Bool(b)) => Ok(Value::Bool(b)),
            (Self::Bool, Value::Int(i)) => Ok(Value::Bool(i != 0)),
            (Self::Bool, Value::Float(f)) => Ok(Value::Bool(f != 0.0)),
            (Self::Bool, Value::String(s)) => Ok(Value::Bool(!matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "" | "0" | "false" | "off" | "no"
            ))),

            (Self::Array, v @ (Value::List(_) | Value::Map(_))) => Ok(v),
            (Self::Array, v) => Ok(Value::List(vec![v])),

            (_, v @ (Value::List(_) | Value::Map(_))) => Err(mismatch(&v)),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_int() {
        assert_eq!(ScalarType::Int.cast("age", Value::from("42")).unwrap(), Value::Int(42));
        assert_eq!(ScalarType::Int.cast("age", Value::from(" 7.9 ")).unwrap(), Value::Int(7));
        assert_eq!(ScalarType::Int.cast("age", Value::from("")).unwrap(), Value::Null);
        assert_eq!(ScalarType::Int.cast("age", Value::Bool(true)).unwrap(), Value::Int(1));
        assert!(matches!(
            ScalarType::Int.cast("age", Value::from("abc")),
            Err(FormError::TypeMismatch { declared: "int", .. })
        ));
    }

    #[test]
    fn test_cast_float() {
        assert_eq!(
            ScalarType::Float.cast("price", Value::from("1.25")).unwrap(),
            Value::Float(1.25)
        );
        assert_eq!(
            ScalarType::Float.cast("price", Value::Int(3)).unwrap(),
            Value::Float(3.0)
        );
    }

    #[test]
    fn test_cast_bool() {
        for raw in ["1", "true", "on", "yes"] {
            assert_eq!(
                ScalarType::Bool.cast("active", Value::from(raw)).unwrap(),
                Value::Bool(true)
            );
        }
        for raw in ["0", "", "false", "off"] {
            assert_eq!(
                ScalarType::Bool.cast("active", Value::from(raw)).unwrap(),
                Value::Bool(false)
            );
        }
    }

    #[test]
    fn test_cast_string_rejects_array() {
        let err = ScalarType::String
            .cast("name", Value::from(vec!["a", "b"]))
            .unwrap_err();
        assert!(matches!(
            &err,
            FormError::TypeMismatch { attribute, declared: "string", actual: "array" }
                if attribute == "name"
        ));
        assert!(err.to_string().contains("\"string\""));
    }

    #[test]
    fn test_cast_string_from_scalars() {
        assert_eq!(
            ScalarType::String.cast("name", Value::Int(5)).unwrap(),
            Value::from("5")
        );
        assert_eq!(ScalarType::String.cast("name", Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_cast_array_wraps_scalars() {
        assert_eq!(
            ScalarType::Array.cast("tags", Value::from("a")).unwrap(),
            Value::List(vec![Value::from("a")])
        );
        assert_eq!(
            ScalarType::Untyped.cast("any", Value::from(vec![1])).unwrap(),
            Value::from(vec![1])
        );
    }
}
