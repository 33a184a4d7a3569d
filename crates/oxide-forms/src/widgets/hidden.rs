//! Hidden input.

use super::{ensure_value, InputBase, InputWidget, WidgetKind, SCALAR_OR_NULL};
use crate::error::Result;
use crate::input_data::InputData;
use crate::tag::{AttrValue, Tag};

/// An `<input type="hidden">`. Fields render it without container or label.
#[derive(Debug, Clone, PartialEq)]
pub struct Hidden {
    base: InputBase,
}

input_widget_attributes!(Hidden);

impl Hidden {
    /// A hidden input for `data`.
    pub fn new(data: InputData) -> Self {
        Self {
            base: InputBase::new(data),
        }
    }
}

impl InputWidget for Hidden {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Hidden
    }

    fn base(&self) -> &InputBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InputBase {
        &mut self.base
    }

    fn render(&self) -> Result<String> {
        let value = self.base.data.get_value();
        ensure_value("Hidden", value, SCALAR_OR_NULL)?;

        let mut attrs = self.base.input_attributes();
        if let Some(value) = AttrValue::from_value(value) {
            attrs.set_default("value", value);
        }
        Tag::input("hidden").attributes(&attrs).render()
    }

    fn box_clone(&self) -> Box<dyn InputWidget> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;

    #[test]
    fn test_render() {
        let data = InputData::new().name("Post[id]").value(7);
        assert_eq!(
            Hidden::new(data).render().unwrap(),
            r#"<input type="hidden" name="Post[id]" value="7">"#
        );
    }

    #[test]
    fn test_bool_value() {
        let data = InputData::new().name("flag").value(true);
        assert!(Hidden::new(data).render().unwrap().contains(r#"value="1""#));
    }

    #[test]
    fn test_rejects_list() {
        let data = InputData::new().name("ids").value(vec![1, 2]);
        assert!(matches!(
            Hidden::new(data).render(),
            Err(FormError::InvalidValueType { .. })
        ));
    }
}
