//! Form wrapper.

use super::{hidden_companion, InputBase, InputWidget, WidgetKind};
use crate::error::{FormError, Result};
use crate::input_data::InputData;
use crate::tag::Tag;

/// A `<form>` rendered whole or as a begin/end pair.
///
/// Browsers only submit `GET` and `POST`; any other method is sent as
/// `POST` with a hidden `_method` input carrying the requested one.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    base: InputBase,
    action: String,
    method: String,
    content: String,
}

input_widget_attributes!(Form);

impl Form {
    /// A `POST` form.
    pub fn new(data: InputData) -> Self {
        Self {
            base: InputBase::new(data),
            action: String::new(),
            method: "POST".to_string(),
            content: String::new(),
        }
    }

    /// Sets the URL the form submits to.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Sets the HTTP method; it must not be empty.
    pub fn method(mut self, method: &str) -> Result<Self> {
        let method = method.trim();
        if method.is_empty() {
            return Err(FormError::invalid_config("form method must not be empty"));
        }
        self.method = method.to_uppercase();
        Ok(self)
    }

    #[must_use]
    pub fn enctype(mut self, enctype: &str) -> Self {
        self.base.attributes.set("enctype", enctype);
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    fn tag(&self) -> Tag {
        let method = match self.method.as_str() {
            "GET" => "GET",
            _ => "POST",
        };
        Tag::new("form")
            .attr("action", self.action.as_str())
            .attr("method", method)
            .attributes(&self.base.input_attributes())
    }
}

impl InputWidget for Form {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Form
    }

    fn base(&self) -> &InputBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InputBase {
        &mut self.base
    }

    fn begin(&self) -> Result<String> {
        let mut html = self.tag().open()?;
        if !matches!(self.method.as_str(), "GET" | "POST") {
            html.push('\n');
            html.push_str(&hidden_companion("_method", &self.method)?);
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

    #[test]
    fn test_post() {
        let form = Form::new(InputData::new()).action("/profile");
        assert_eq!(
            form.begin().unwrap(),
            r#"<form action="/profile" method="POST">"#
        );
        assert_eq!(form.end().unwrap(), "</form>");
    }

    #[test]
    fn test_method_override() {
        let form = Form::new(InputData::new())
            .action("/posts/1")
            .method("put")
            .unwrap();
        assert_eq!(
            form.begin().unwrap(),
            "<form action=\"/posts/1\" method=\"POST\">\n<input type=\"hidden\" name=\"_method\" value=\"PUT\">"
        );
    }

    #[test]
    fn test_get_has_no_override() {
        let form = Form::new(InputData::new()).method("get").unwrap();
        assert!(!form.begin().unwrap().contains("_method"));
    }

    #[test]
    fn test_empty_method() {
        assert!(matches!(
            Form::new(InputData::new()).method(" "),
            Err(FormError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_render_with_content() {
        let html = Form::new(InputData::new())
            .action("/search")
            .method("GET")
            .unwrap()
            .content("<input name=\"q\">")
            .render()
            .unwrap();
        assert_eq!(
            html,
            "<form action=\"/search\" method=\"GET\">\n<input name=\"q\">\n</form>"
        );
    }
}
