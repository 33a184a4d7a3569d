//! Field validation error.

use super::{render_text_tag, GlobalAttributes};
use crate::error::Result;
use crate::input_data::InputData;
use crate::tag::Attributes;

/// The first validation error of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    messages: Vec<String>,
    show_all: bool,
    separator: String,
    tag: String,
    attributes: Attributes,
    encode: bool,
}

impl GlobalAttributes for Error {
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Error {
    /// An error showing `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_messages(vec![message.into()])
    }

    pub fn with_messages(messages: Vec<String>) -> Self {
        Self {
            messages,
            show_all: false,
            separator: "<br>".to_string(),
            tag: "div".to_string(),
            attributes: Attributes::new(),
            encode: true,
        }
    }

    /// An error showing the first validation message of `data`.
    pub fn for_data(data: &InputData) -> Self {
        Self::with_messages(data.get_validation_errors().to_vec())
    }

    /// Renders every message joined by the separator instead of the first.
    #[must_use]
    pub fn show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
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

    /// Renders the error, or `""` when there is no message.
    pub fn render(&self) -> Result<String> {
        let messages: Vec<&str> = self
            .messages
            .iter()
            .map(String::as_str)
            .filter(|m| !m.is_empty())
            .collect();
        let Some(first) = messages.first() else {
            return Ok(String::new());
        };
        if !self.show_all {
            return render_text_tag(&self.tag, &self.attributes, first, self.encode);
        }
        let content = messages
            .iter()
            .map(|m| {
                if self.encode {
                    crate::tag::html_escape(m)
                } else {
                    (*m).to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(&self.separator);
        render_text_tag(&self.tag, &self.attributes, &content, false)
    }
}
