//! Fieldset wrapper.

use super::{InputBase, InputWidget, WidgetKind};
use crate::error::Result;
use crate::input_data::InputData;
use crate::tag::{html_escape, Attributes, Tag};

/// A `<fieldset>` with an optional `<legend>`, rendered whole or as a
/// begin/end pair around other fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Fieldset {
    base: InputBase,
    legend: Option<String>,
    legend_attributes: Attributes,
    content: String,
    encode: bool,
}

input_widget_attributes!(Fieldset);

impl Fieldset {
    /// A fieldset for `data`.
    pub fn new(data: InputData) -> Self {
        Self {
            base: InputBase::new(data),
            legend: None,
            legend_attributes: Attributes::new(),
            content: String::new(),
            encode: true,
        }
    }

    /// Sets the legend; without one the label of the input data is used.
    #[must_use]
    pub fn legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    #[must_use]
    pub fn legend_attributes(mut self, attributes: Attributes) -> Self {
        self.legend_attributes = attributes;
        self
    }

    /// Sets the HTML placed between begin and end by [`InputWidget::render`].
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    #[must_use]
    pub fn encode(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    fn tag(&self) -> Tag {
        Tag::new("fieldset").attributes(&self.base.input_attributes())
    }
}

impl InputWidget for Fieldset {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Fieldset
    }

    fn base(&self) -> &InputBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InputBase {
        &mut self.base
    }

    fn begin(&self) -> Result<String> {
        let mut html = self.tag().open()?;
        let legend = self.legend.as_deref().or_else(|| self.base.data.get_label());
        if let Some(legend) = legend.filter(|l| !l.is_empty()) {
            let legend = if self.encode {
                html_escape(legend)
            } else {
                legend.to_string()
            };
            html.push('\n');
            html.push_str(
                &Tag::new("legend")
                    .attributes(&self.legend_attributes)
                    .html(&legend)
                    .render()?,
            );
        }
        Ok(html)
    }

    fn end(&self) -> Result<String> {
        Ok(self.tag().close())
    }

    fn render(&self) -> Result<String> {
        let mut html = self.begin()?;
        if !self.content.is_empty() {
            html.push('\n');
            html.push_str(&self.content);
        }
        html.push('\n');
        html.push_str(&self.end()?);
        Ok(html)
    }

    fn box_clone(&self) -> Box<dyn InputWidget> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::GlobalAttributes;

    #[test]
    fn test_begin_end() {
        let fieldset = Fieldset::new(InputData::new())
            .legend("Address")
            .disabled(true);
        assert_eq!(
            fieldset.begin().unwrap(),
            "<fieldset disabled>\n<legend>Address</legend>"
        );
        assert_eq!(fieldset.end().unwrap(), "</fieldset>");
    }

    #[test]
    fn test_legend_defaults_to_label() {
        let fieldset = Fieldset::new(InputData::new().label("Billing"));
        assert_eq!(fieldset.begin().unwrap(), "<fieldset>\n<legend>Billing</legend>");
        let fieldset = Fieldset::new(InputData::new().label("Billing")).legend("");
        assert_eq!(fieldset.begin().unwrap(), "<fieldset>");
    }

    #[test]
    fn test_render_with_content() {
        let html = Fieldset::new(InputData::new())
            .content("<input type=\"text\">")
            .render()
            .unwrap();
        assert_eq!(html, "<fieldset>\n<input type=\"text\">\n</fieldset>");
    }
}
