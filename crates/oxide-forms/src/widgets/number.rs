//! Numeric inputs.

use super::{InputBase, InputWidget, WidgetKind};
use crate::error::{FormError, Result};
use crate::input_data::InputData;
use crate::tag::{AttrValue, Tag};

/// A `number` or `range` input. The value must be numeric (a number or a
/// numeric string) or null.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    kind: WidgetKind,
    base: InputBase,
}

input_widget_attributes!(Number);

impl Number {
    /// An `<input type="number">`.
    pub fn number(data: InputData) -> Self {
        Self {
            kind: WidgetKind::Number,
            base: InputBase::new(data),
        }
    }

    /// An `<input type="range">`.
    pub fn range(data: InputData) -> Self {
        Self {
            kind: WidgetKind::Range,
            base: InputBase::new(data),
        }
    }

    #[must_use]
    pub fn step(mut self, step: impl Into<AttrValue>) -> Self {
        self.base.attributes.set("step", step);
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.base.attributes.set("placeholder", placeholder);
        self
    }

    #[must_use]
    pub fn use_placeholder(mut self, use_placeholder: bool) -> Self {
        self.base.use_placeholder = use_placeholder;
        self
    }

    const fn widget_name(&self) -> &'static str {
        match self.kind {
            WidgetKind::Range => "Range",
            _ => "Number",
        }
    }
}

impl InputWidget for Number {
    fn kind(&self) -> WidgetKind {
        self.kind
    }

    fn base(&self) -> &InputBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InputBase {
        &mut self.base
    }

    fn render(&self) -> Result<String> {
        let value = self.base.data.get_value();
        if !(value.is_null() || value.is_numeric() || value.as_str() == Some("")) {
            return Err(FormError::InvalidValueType {
                widget: self.widget_name(),
                expected: "numeric|null".to_string(),
                actual: value.kind().as_str(),
            });
        }

        let mut attrs = self.base.input_attributes();
        if let Some(value) = AttrValue::from_value(value) {
            attrs.set_default("value", value);
        }
        if self.kind == WidgetKind::Number {
            self.base.apply_placeholder(&mut attrs);
        }

        let input_type = match self.kind {
            WidgetKind::Range => "range",
            _ => "number",
        };
        Tag::input(input_type).attributes(&attrs).render()
    }

    fn box_clone(&self) -> Box<dyn InputWidget> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use crate::widgets::GlobalAttributes;

    fn age(value: impl Into<Value>) -> InputData {
        InputData::new().name("age").value(value)
    }

    #[test]
    fn test_number() {
        let html = Number::number(age(42)).min(0).max(120).render().unwrap();
        assert_eq!(
            html,
            r#"<input type="number" name="age" value="42" min="0" max="120">"#
        );
    }

    #[test]
    fn test_numeric_string_and_null() {
        assert!(Number::number(age("3.5")).render().is_ok());
        assert_eq!(
            Number::range(age(Value::Null)).step(5).render().unwrap(),
            r#"<input type="range" name="age" step="5">"#
        );
    }

    #[test]
    fn test_rejects_text() {
        let err = Number::range(age("abc")).render().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Range widget requires a value of type numeric|null, got string"
        );
    }
}
