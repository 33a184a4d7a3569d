//! Field hint.

use super::{render_text_tag, GlobalAttributes};
use crate::error::Result;
use crate::input_data::InputData;
use crate::tag::Attributes;

/// Help text shown under an input, in a `<div>` by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    text: String,
    tag: String,
    attributes: Attributes,
    encode: bool,
}

impl GlobalAttributes for Hint {
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Hint {
    /// A hint showing `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: "div".to_string(),
            attributes: Attributes::new(),
            encode: true,
        }
    }

    /// A hint showing the hint of `data`.
    pub fn for_data(data: &InputData) -> Self {
        Self::new(data.get_hint().unwrap_or_default())
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the wrapping tag; the empty tag renders the text bare.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    #[must_use]
    pub fn encode(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    /// Renders the hint, or `""` when there is no text.
    pub fn render(&self) -> Result<String> {
        if self.text.is_empty() {
            return Ok(String::new());
        }
        render_text_tag(&self.tag, &self.attributes, &self.text, self.encode)
    }
}
