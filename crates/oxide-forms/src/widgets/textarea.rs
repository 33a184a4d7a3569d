//! Multi-line text input.

use super::{ensure_value, InputBase, InputWidget, WidgetKind};
use crate::error::{FormError, Result};
use crate::input_data::InputData;
use crate::tag::Tag;
use crate::value::ValueKind;

/// A `<textarea>`; the value is rendered as escaped content.
#[derive(Debug, Clone, PartialEq)]
pub struct Textarea {
    base: InputBase,
}

input_widget_attributes!(Textarea);

impl Textarea {
    /// A textarea for `data`.
    pub fn new(data: InputData) -> Self {
        Self {
            base: InputBase::new(data),
        }
    }

    #[must_use]
    pub fn rows(mut self, rows: usize) -> Self {
        self.base.attributes.set("rows", rows);
        self
    }

    #[must_use]
    pub fn cols(mut self, cols: usize) -> Self {
        self.base.attributes.set("cols", cols);
        self
    }

    #[must_use]
    pub fn maxlength(mut self, maxlength: usize) -> Self {
        self.base.attributes.set("maxlength", maxlength);
        self
    }

    #[must_use]
    pub fn minlength(mut self, minlength: usize) -> Self {
        self.base.attributes.set("minlength", minlength);
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

    /// Sets the wrapping mode, `hard` or `soft`.
    pub fn wrap(mut self, wrap: &str) -> Result<Self> {
        if !matches!(wrap, "hard" | "soft") {
            return Err(FormError::invalid_config(format!(
                "wrap must be \"hard\" or \"soft\", got \"{wrap}\""
            )));
        }
        self.base.attributes.set("wrap", wrap);
        Ok(self)
    }

    /// Submits the text direction under `dirname`; it must not be empty.
    pub fn dirname(mut self, dirname: &str) -> Result<Self> {
        if dirname.trim().is_empty() {
            return Err(FormError::invalid_config("dirname must not be empty"));
        }
        self.base.attributes.set("dirname", dirname);
        Ok(self)
    }
}

impl InputWidget for Textarea {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Textarea
    }

    fn base(&self) -> &InputBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InputBase {
        &mut self.base
    }

    fn render(&self) -> Result<String> {
        let value = self.base.data.get_value();
        ensure_value("Textarea", value, &[ValueKind::String, ValueKind::Null])?;

        let mut attrs = self.base.input_attributes();
        self.base.apply_placeholder(&mut attrs);

        Tag::new("textarea")
            .attributes(&attrs)
            .text(value.as_str().unwrap_or_default())
            .render()
    }

    fn box_clone(&self) -> Box<dyn InputWidget> {
        Box::new(self.clone())
    }
}
