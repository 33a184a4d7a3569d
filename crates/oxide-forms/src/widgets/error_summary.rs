//! Validation error summary.

use ironhtml::typed::Element;
use ironhtml_elements::{Li, Ul};

use super::GlobalAttributes;
use crate::error::{Result, ValidationErrors};
use crate::model::FormModel;
use crate::tag::{AttrValue, Attributes, Tag};

/// A header, a list of error messages and a footer inside a `<div>`.
///
/// With no messages the summary is still rendered but hidden with
/// `display:none`, so client-side scripts can fill and reveal it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSummary {
    errors: ValidationErrors,
    header: String,
    footer: String,
    show_all_errors: bool,
    only_attributes: Vec<String>,
    attributes: Attributes,
    encode: bool,
}

impl GlobalAttributes for ErrorSummary {
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl ErrorSummary {
    /// Summarizes `errors` under the default header.
    pub fn new(errors: ValidationErrors) -> Self {
        Self {
            errors,
            header: "Please fix the following errors:".to_string(),
            footer: String::new(),
            show_all_errors: false,
            only_attributes: Vec::new(),
            attributes: Attributes::new(),
            encode: true,
        }
    }

    /// Summarizes the errors stored on `model` by its last validation run.
    pub fn for_model(model: &dyn FormModel) -> Self {
        Self::new(model.validation_errors().cloned().unwrap_or_default())
    }

    /// Sets the header HTML; it is not encoded.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Sets the footer HTML; it is not encoded.
    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Lists every message of an attribute instead of only the first.
    #[must_use]
    pub fn show_all_errors(mut self, show_all: bool) -> Self {
        self.show_all_errors = show_all;
        self
    }

    /// Restricts the summary to the given attributes.
    #[must_use]
    pub fn only_attributes<S: Into<String>>(mut self, attributes: impl IntoIterator<Item = S>) -> Self {
        self.only_attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Whether messages are HTML-encoded; on by default.
    #[must_use]
    pub fn encode(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    /// The messages the summary lists, in attribute order.
    pub fn messages(&self) -> Vec<&str> {
        let pairs = if self.show_all_errors {
            self.errors.all_errors()
        } else {
            self.errors.first_errors()
        };
        pairs
            .into_iter()
            .filter(|(attribute, _)| {
                self.only_attributes.is_empty() || self.only_attributes.iter().any(|a| a == attribute)
            })
            .map(|(_, message)| message)
            .collect()
    }

    /// Renders the summary.
    pub fn render(&self) -> Result<String> {
        let messages = self.messages();

        let mut attrs = self.attributes.clone();
        if messages.is_empty() {
            let style = match attrs.get("style").and_then(AttrValue::as_str) {
                Some(style) if !style.trim().is_empty() => {
                    format!("{}; display:none", style.trim_end_matches(';'))
                }
                _ => "display:none".to_string(),
            };
            attrs.set("style", style);
        }

        let list = Element::<Ul>::new()
            .children(messages.iter().copied(), |message, li: Element<Li>| {
                if self.encode {
                    li.text(message)
                } else {
                    li.raw(message)
                }
            })
            .render();

        let mut lines = Vec::new();
        let wrapper = Tag::new("div").attributes(&attrs);
        lines.push(wrapper.open()?);
        if !self.header.is_empty() {
            lines.push(Tag::new("p").html(&self.header).render()?);
        }
        lines.push(list);
        if !self.footer.is_empty() {
            lines.push(self.footer.clone());
        }
        lines.push(wrapper.close());
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors() -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Name cannot be blank.");
        errors.add("name", "Name is too short.");
        errors.add("email", "Email is not valid.");
        errors
    }

    #[test]
    fn test_empty_summary_is_hidden_not_omitted() {
        let html = ErrorSummary::new(ValidationErrors::new()).render().unwrap();
        assert!(html.starts_with(r#"<div style="display:none">"#));
        assert!(html.contains("Please fix the following errors:"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_first_errors_only() {
        let summary = ErrorSummary::new(errors());
        assert_eq!(
            summary.messages(),
            vec!["Name cannot be blank.", "Email is not valid."]
        );
        let html = summary.render().unwrap();
        assert!(!html.contains("display:none"));
        assert!(html.contains("Name cannot be blank."));
        assert!(!html.contains("Name is too short."));
    }

    #[test]
    fn test_show_all_and_only_attributes() {
        let summary = ErrorSummary::new(errors())
            .show_all_errors(true)
            .only_attributes(["name"]);
        assert_eq!(
            summary.messages(),
            vec!["Name cannot be blank.", "Name is too short."]
        );
    }

    #[test]
    fn test_style_is_extended() {
        let html = ErrorSummary::new(ValidationErrors::new())
            .attr("style", "color:red;")
            .add_class("summary")
            .footer("<hr>")
            .render()
            .unwrap();
        assert!(html.starts_with(r#"<div class="summary" style="color:red; display:none">"#));
        assert!(html.contains("\n<hr>\n</div>"));
    }

    #[test]
    fn test_messages_encoded_by_default() {
        let mut errors = ValidationErrors::new();
        errors.add("bio", "Use <b> sparingly & wisely.");
        let html = ErrorSummary::new(errors).render().unwrap();
        assert!(html.contains("<li>Use &lt;b&gt; sparingly &amp; wisely.</li>"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_messages_raw_when_not_encoded() {
        let mut errors = ValidationErrors::new();
        errors.add("bio", "Use <b>bold</b> sparingly.");
        let html = ErrorSummary::new(errors).encode(false).render().unwrap();
        assert!(html.contains("<li>Use <b>bold</b> sparingly.</li>"));
    }
}
