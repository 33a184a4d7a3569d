//! Buttons and button groups.

use super::{InputBase, InputWidget, WidgetKind};
use crate::error::{FormError, Result};
use crate::input_data::InputData;
use crate::tag::{html_escape, Attributes, Tag};

/// A `<button>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    base: InputBase,
    button_type: &'static str,
    content: String,
    encode: bool,
    visible: bool,
}

input_widget_attributes!(Button);

impl Button {
    fn with_type(button_type: &'static str, content: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(InputData::new()),
            button_type,
            content: content.into(),
            encode: true,
            visible: true,
        }
    }

    /// A `<button type="submit">`.
    pub fn submit(content: impl Into<String>) -> Self {
        Self::with_type("submit", content)
    }

    /// A `<button type="reset">`.
    pub fn reset(content: impl Into<String>) -> Self {
        Self::with_type("reset", content)
    }

    /// A plain `<button type="button">`.
    pub fn button(content: impl Into<String>) -> Self {
        Self::with_type("button", content)
    }

    /// A submit button labelled with the data's label and submitting its
    /// name and value.
    pub fn from_data(data: InputData) -> Self {
        let content = data.get_label().unwrap_or_default().to_string();
        let mut button = Self::submit(content);
        button.base = InputBase::new(data);
        button
    }

    #[must_use]
    pub fn encode(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    /// Hidden buttons render as the empty string.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl InputWidget for Button {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
    }

    fn base(&self) -> &InputBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InputBase {
        &mut self.base
    }

    fn render(&self) -> Result<String> {
        if !self.visible {
            return Ok(String::new());
        }
        let mut attrs = self.base.input_attributes();
        if let Some(value) = self.base.data.get_value().to_attr_string() {
            attrs.set_default("value", value);
        }
        let content = if self.encode {
            html_escape(&self.content)
        } else {
            self.content.clone()
        };
        Tag::new("button")
            .attr("type", self.button_type)
            .attributes(&attrs)
            .html(&content)
            .render()
    }

    fn box_clone(&self) -> Box<dyn InputWidget> {
        Box::new(self.clone())
    }
}

/// Several buttons rendered together, by default inside a `<div>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonGroup {
    base: InputBase,
    buttons: Vec<Button>,
    button_attributes: Attributes,
    container_tag: Option<String>,
    separator: String,
}

input_widget_attributes!(ButtonGroup);

impl Default for ButtonGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonGroup {
    pub fn new() -> Self {
        Self {
            base: InputBase::new(InputData::new()),
            buttons: Vec::new(),
            button_attributes: Attributes::new(),
            container_tag: Some("div".to_string()),
            separator: "\n".to_string(),
        }
    }

    /// Sets the buttons of the group.
    #[must_use]
    pub fn buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    /// Attributes applied to every button, under the button's own.
    #[must_use]
    pub fn button_attributes(mut self, attributes: Attributes) -> Self {
        self.button_attributes = attributes;
        self
    }

    #[must_use]
    pub fn container_tag(mut self, tag: impl Into<String>) -> Self {
        self.container_tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn without_container(mut self) -> Self {
        self.container_tag = None;
        self
    }

    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl InputWidget for ButtonGroup {
    fn kind(&self) -> WidgetKind {
        WidgetKind::ButtonGroup
    }

    fn base(&self) -> &InputBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InputBase {
        &mut self.base
    }

    fn render(&self) -> Result<String> {
        let mut rendered = Vec::with_capacity(self.buttons.len());
        for button in self.buttons.iter().filter(|b| b.visible) {
            let mut button = button.clone();
            button.base.attributes = self.button_attributes.merged(&button.base.attributes);
            rendered.push(button.render()?);
        }
        let buttons = rendered.join(&self.separator);

        match self.container_tag.as_deref() {
            None => Ok(buttons),
            Some("") => Err(FormError::invalid_config(
                "button group container tag must not be empty",
            )),
            Some(tag) => {
                let container = Tag::new(tag).attributes(&self.base.input_attributes());
                let mut html = container.open()?;
                if !buttons.is_empty() {
                    html.push('\n');
                    html.push_str(&buttons);
                }
                html.push('\n');
                html.push_str(&container.close());
                Ok(html)
            }
        }
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
    fn test_button() {
        assert_eq!(
            Button::submit("Save & exit").render().unwrap(),
            r#"<button type="submit">Save &amp; exit</button>"#
        );
        assert_eq!(
            Button::button("<b>Go</b>").encode(false).render().unwrap(),
            r#"<button type="button"><b>Go</b></button>"#
        );
    }

    #[test]
    fn test_from_data() {
        let data = InputData::new().name("action").value("publish").label("Publish");
        assert_eq!(
            Button::from_data(data).render().unwrap(),
            r#"<button type="submit" name="action" value="publish">Publish</button>"#
        );
    }

    #[test]
    fn test_group_with_per_button_attributes() {
        let html = ButtonGroup::new()
            .add_class("btn-group")
            .button_attributes(Attributes::new().with("class", "btn"))
            .buttons(vec![
                Button::submit("Save").add_class("btn-primary"),
                Button::reset("Reset").visible(false),
                Button::button("Cancel").attr("data-dismiss", "modal"),
            ])
            .render()
            .unwrap();
        assert_eq!(
            html,
            [
                r#"<div class="btn-group">"#,
                r#"<button type="submit" class="btn btn-primary">Save</button>"#,
                r#"<button type="button" class="btn" data-dismiss="modal">Cancel</button>"#,
                "</div>",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_hidden_button_renders_nothing() {
        assert_eq!(Button::submit("x").visible(false).render().unwrap(), "");
    }
}
