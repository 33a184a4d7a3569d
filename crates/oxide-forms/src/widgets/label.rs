//! Field label.

use super::{render_text_tag, GlobalAttributes};
use crate::error::Result;
use crate::input_data::InputData;
use crate::tag::Attributes;

/// A `<label>` around the attribute's label text.
///
/// An empty tag renders the text bare; empty text renders nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
    tag: String,
    for_id: Option<String>,
    attributes: Attributes,
    encode: bool,
}

impl GlobalAttributes for Label {
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Label {
    /// A label showing `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: "label".to_string(),
            for_id: None,
            attributes: Attributes::new(),
            encode: true,
        }
    }

    /// A label for the data's input, pointing at its id.
    pub fn for_data(data: &InputData) -> Self {
        let label = Self::new(data.get_label().unwrap_or_default());
        match data.get_id() {
            Some(id) => label.for_id(id),
            None => label,
        }
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the element name; an empty name renders the text bare.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Points the label at the element with id `id`.
    #[must_use]
    pub fn for_id(mut self, id: impl Into<String>) -> Self {
        self.for_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn without_for(mut self) -> Self {
        self.for_id = None;
        self
    }

    #[must_use]
    pub fn encode(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    pub fn get_text(&self) -> &str {
        &self.text
    }

    /// Renders the label, or `""` when there is no text.
    pub fn render(&self) -> Result<String> {
        if self.text.is_empty() {
            return Ok(String::new());
        }
        let mut attrs = Attributes::new();
        if let Some(id) = &self.for_id {
            attrs.set("for", id);
        }
        attrs.merge(&self.attributes);
        render_text_tag(&self.tag, &attrs, &self.text, self.encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_data() {
        let data = InputData::new().label("Job").id("textform-job");
        assert_eq!(
            Label::for_data(&data).render().unwrap(),
            r#"<label for="textform-job">Job</label>"#
        );
    }

    #[test]
    fn test_tag_override_and_bare() {
        let label = Label::new("Name").add_class("caption");
        assert_eq!(
            label.clone().tag("span").render().unwrap(),
            r#"<span class="caption">Name</span>"#
        );
        assert_eq!(label.tag("").render().unwrap(), "Name");
    }

    #[test]
    fn test_encoding() {
        assert_eq!(
            Label::new("<i>Name</i>").render().unwrap(),
            "<label>&lt;i&gt;Name&lt;/i&gt;</label>"
        );
        assert_eq!(
            Label::new("<i>Name</i>").encode(false).render().unwrap(),
            "<label><i>Name</i></label>"
        );
    }

    #[test]
    fn test_empty_text_renders_nothing() {
        assert_eq!(Label::new("").render().unwrap(), "");
    }
}
