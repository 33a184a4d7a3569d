//! File upload input.

use super::{hidden_companion, InputBase, InputWidget, WidgetKind};
use crate::error::Result;
use crate::input_data::InputData;
use crate::tag::{AttrValue, Tag};

/// An `<input type="file">`.
///
/// File inputs cannot be prefilled, so the value is never rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    base: InputBase,
    multiple: bool,
    unselect_value: Option<String>,
}

input_widget_attributes!(File);

impl File {
    /// A file input; it never renders a value.
    pub fn new(data: InputData) -> Self {
        Self {
            base: InputBase::new(data),
            multiple: false,
            unselect_value: None,
        }
    }

    /// Restricts the accepted file types (`image/*`, `.pdf`, ...).
    #[must_use]
    pub fn accept(mut self, accept: &str) -> Self {
        self.base.attributes.set("accept", accept);
        self
    }

    /// Accepts several files; the name gets a `[]` suffix.
    #[must_use]
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Sets the value of a hidden input submitted when no file is chosen.
    #[must_use]
    pub fn unselect_value(mut self, value: Option<&str>) -> Self {
        self.unselect_value = value.map(String::from);
        self
    }
}

impl InputWidget for File {
    fn kind(&self) -> WidgetKind {
        WidgetKind::File
    }

    fn base(&self) -> &InputBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InputBase {
        &mut self.base
    }

    fn render(&self) -> Result<String> {
        let name = self.base.data.get_name();
        let mut attrs = self.base.input_attributes();
        attrs.remove("value");
        if self.multiple {
            attrs.set("multiple", true);
            if !name.is_empty() && attrs.get("name").and_then(AttrValue::as_str) == Some(name) {
                attrs.set("name", format!("{name}[]"));
            }
        }

        let mut html = String::new();
        if let Some(unselect) = &self.unselect_value {
            html.push_str(&hidden_companion(name, unselect)?);
        }
        html.push_str(&Tag::input("file").attributes(&attrs).render()?);
        Ok(html)
    }

    fn box_clone(&self) -> Box<dyn InputWidget> {
        Box::new(self.clone())
    }
}
