//! HTML tag and attribute rendering.

use std::fmt::Write;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::{FormError, Result};
use crate::value::Value;

/// Attributes rendered first, in this order; the rest follow in insertion
/// order. Keeps output stable no matter which layer set an attribute.
const ATTRIBUTE_ORDER: &[&str] = &[
    "type", "id", "class", "name", "value", "href", "src", "alt", "action", "method", "for",
    "selected", "checked", "readonly", "disabled", "multiple", "size", "maxlength", "minlength",
    "rows", "cols", "title",
];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// An attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Rendered as `name="value"`; the empty string renders as bare `name`.
    Str(String),
    /// `true` renders as bare `name`, `false` omits the attribute.
    Bool(bool),
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for AttrValue {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! attr_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for AttrValue {
            fn from(n: $t) -> Self {
                Self::Str(n.to_string())
            }
        })*
    };
}

attr_from_number!(i32, i64, u32, u64, usize, f64);

impl AttrValue {
    /// Converts a scalar [`Value`]; null and composite values have no
    /// attribute form.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.to_attr_string().map(Self::Str)
    }

    /// The string form, `None` for booleans.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Bool(_) => None,
        }
    }
}

/// An ordered set of HTML attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        if key == "class" {
            self.remove("class");
            if let AttrValue::Str(classes) = &value {
                self.add_class(classes);
            }
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Sets an attribute only if it is not present yet.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        if !self.contains(&key) {
            self.set(key, value);
        }
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the value of `key`.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns whether `key` is set.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Appends classes that are not present yet. Blank input is ignored.
    pub fn add_class(&mut self, classes: &str) {
        let mut current: Vec<String> = self.classes().into_iter().map(String::from).collect();
        for class in classes.split_whitespace() {
            if !current.iter().any(|c| c == class) {
                current.push(class.to_string());
            }
        }
        if current.is_empty() {
            return;
        }
        let joined = AttrValue::Str(current.join(" "));
        match self.entries.iter_mut().find(|(k, _)| k == "class") {
            Some(entry) => entry.1 = joined,
            None => self.entries.push(("class".to_string(), joined)),
        }
    }

    /// The classes of the `class` attribute, in order.
    pub fn classes(&self) -> Vec<&str> {
        match self.get("class") {
            Some(AttrValue::Str(s)) => s.split_whitespace().collect(),
            _ => Vec::new(),
        }
    }

    /// Merges `other` over `self`: its values win, classes accumulate.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.entries {
            if key == "class" {
                if let AttrValue::Str(classes) = value {
                    self.add_class(classes);
                }
            } else {
                self.set(key.clone(), value.clone());
            }
        }
    }

    /// Returns `self` merged under `over`.
    #[must_use]
    pub fn merged(&self, over: &Self) -> Self {
        let mut merged = self.clone();
        merged.merge(over);
        merged
    }

    /// Fails on a key that cannot appear as an HTML attribute name.
    pub fn validate(&self) -> Result<()> {
        match self.entries.iter().find(|(key, _)| !is_attribute_name(key)) {
            Some((key, _)) => Err(FormError::invalid_config(format!(
                "invalid attribute name {key:?}"
            ))),
            None => Ok(()),
        }
    }

    /// Renders the attributes, each preceded by a space. Keys are not
    /// checked; see [`Attributes::validate`].
    pub fn render(&self) -> String {
        let mut ordered: Vec<&(String, AttrValue)> = self.entries.iter().collect();
        ordered.sort_by_key(|(k, _)| {
            ATTRIBUTE_ORDER
                .iter()
                .position(|o| *o == k.as_str())
                .unwrap_or(ATTRIBUTE_ORDER.len())
        });

        let mut html = String::new();
        for (key, value) in ordered {
            match value {
                AttrValue::Bool(false) => {}
                AttrValue::Bool(true) => {
                    let _ = write!(html, " {key}");
                }
                AttrValue::Str(s) if s.is_empty() => {
                    let _ = write!(html, " {key}");
                }
                AttrValue::Str(s) => {
                    let _ = write!(html, r#" {key}="{}""#, html_escape(s));
                }
            }
        }
        html
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Int(i64),
            Float(f64),
            Str(String),
        }

        let raw = IndexMap::<String, Raw>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Raw::Bool(b) => AttrValue::Bool(b),
                    Raw::Int(i) => AttrValue::from(i),
                    Raw::Float(f) => AttrValue::from(f),
                    Raw::Str(s) => AttrValue::Str(s),
                };
                (key, value)
            })
            .collect())
    }
}

/// A single HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    attributes: Attributes,
    content: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            content: String::new(),
        }
    }

    /// Creates an `<input>` of the given type.
    pub fn input(input_type: &str) -> Self {
        Self::new("input").attr("type", input_type)
    }

    /// Sets an attribute, replacing any previous value.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.set(key, value);
        self
    }

    /// Merges attributes over the ones already set.
    #[must_use]
    pub fn attributes(mut self, attributes: &Attributes) -> Self {
        self.attributes.merge(attributes);
        self
    }

    /// Appends classes.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.attributes.add_class(class);
        self
    }

    /// Appends escaped text.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.content.push_str(&html_escape(text));
        self
    }

    /// Appends raw HTML.
    #[must_use]
    pub fn html(mut self, html: &str) -> Self {
        self.content.push_str(html);
        self
    }

    /// The element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attributes set so far.
    pub fn get_attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_str())
    }

    fn check_name(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FormError::invalid_config("tag name must not be empty"));
        }
        Ok(())
    }

    /// Renders the opening tag.
    pub fn open(&self) -> Result<String> {
        self.check_name()?;
        self.attributes.validate()?;
        Ok(format!("<{}{}>", self.name, self.attributes.render()))
    }

    /// Renders the closing tag; void elements have none.
    pub fn close(&self) -> String {
        if self.is_void() {
            String::new()
        } else {
            format!("</{}>", self.name)
        }
    }

    /// Renders the complete element.
    pub fn render(&self) -> Result<String> {
        let open = self.open()?;
        if self.is_void() {
            return Ok(open);
        }
        Ok(format!("{open}{}{}", self.content, self.close()))
    }
}

/// HTML attribute names exclude whitespace, controls, quotes, `>`, `/`,
/// `=` and `<`.
fn is_attribute_name(key: &str) -> bool {
    !key.is_empty()
        && !key.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '/' | '=' | '<')
        })
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}
