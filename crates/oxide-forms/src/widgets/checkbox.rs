//! Single checkbox and radio inputs.

use super::{ensure_value, hidden_companion, InputBase, InputWidget, WidgetKind, SCALAR_OR_NULL};
use crate::error::Result;
use crate::input_data::InputData;
use crate::tag::{html_escape, Attributes, Tag};

/// A checkbox or radio input, checked when the current value equals the
/// checked value.
///
/// By default the input is enclosed in its own `<label>`. With an uncheck
/// value set, a hidden input carrying it is emitted right before the
/// visible one so that an unchecked box still submits a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkbox {
    kind: WidgetKind,
    base: InputBase,
    checked_value: String,
    uncheck_value: Option<String>,
    label: Option<String>,
    label_attributes: Attributes,
    encode_label: bool,
}

input_widget_attributes!(Checkbox);

impl Checkbox {
    fn with_kind(kind: WidgetKind, data: InputData) -> Self {
        let mut base = InputBase::new(data);
        base.enclosed_by_label = true;
        Self {
            kind,
            base,
            checked_value: "1".to_string(),
            uncheck_value: None,
            label: None,
            label_attributes: Attributes::new(),
            encode_label: true,
        }
    }

    /// A checkbox submitting `1` when checked and `0` when unchecked.
    pub fn checkbox(data: InputData) -> Self {
        Self::with_kind(WidgetKind::Checkbox, data).uncheck_value(Some("0"))
    }

    /// A radio button submitting `1` when checked.
    pub fn radio(data: InputData) -> Self {
        Self::with_kind(WidgetKind::Radio, data)
    }

    /// Sets the value submitted when checked; `1` by default.
    #[must_use]
    pub fn checked_value(mut self, value: impl Into<String>) -> Self {
        self.checked_value = value.into();
        self
    }

    /// Sets the value of the hidden companion input; `None` disables it.
    #[must_use]
    pub fn uncheck_value(mut self, value: Option<&str>) -> Self {
        self.uncheck_value = value.map(String::from);
        self
    }

    /// Overrides the label text taken from the input data.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn label_attributes(mut self, attributes: Attributes) -> Self {
        self.label_attributes = attributes;
        self
    }

    #[must_use]
    pub fn encode_label(mut self, encode: bool) -> Self {
        self.encode_label = encode;
        self
    }

    /// Whether the input sits inside its own `<label>`.
    #[must_use]
    pub fn enclosed_by_label(mut self, enclosed: bool) -> Self {
        self.base.enclosed_by_label = enclosed;
        self
    }

    /// Returns whether the current value equals the checked value.
    pub fn is_checked(&self) -> bool {
        self.base.data.get_value().matches(&self.checked_value)
    }

    fn label_text(&self) -> Option<&str> {
        match &self.label {
            Some(label) => Some(label.as_str()).filter(|l| !l.is_empty()),
            None => self.base.data.get_label(),
        }
    }
}

impl InputWidget for Checkbox {
    fn kind(&self) -> WidgetKind {
        self.kind
    }

    fn base(&self) -> &InputBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InputBase {
        &mut self.base
    }

    fn owns_label(&self) -> bool {
        self.base.enclosed_by_label
    }

    fn render(&self) -> Result<String> {
        let widget = match self.kind {
            WidgetKind::Radio => "Radio",
            _ => "Checkbox",
        };
        ensure_value(widget, self.base.data.get_value(), SCALAR_OR_NULL)?;

        let input_type = match self.kind {
            WidgetKind::Radio => "radio",
            _ => "checkbox",
        };
        let attrs = self.base.input_attributes();
        let input = Tag::input(input_type)
            .attr("value", self.checked_value.as_str())
            .attr("checked", self.is_checked())
            .attributes(&attrs)
            .render()?;

        let mut html = String::new();
        if let Some(uncheck) = &self.uncheck_value {
            html.push_str(&hidden_companion(self.base.data.get_name(), uncheck)?);
        }
        html.push_str(&input);

        if !self.base.enclosed_by_label {
            return Ok(html);
        }
        let Some(label) = self.label_text() else {
            return Ok(html);
        };
        let label = if self.encode_label {
            html_escape(label)
        } else {
            label.to_string()
        };
        Tag::new("label")
            .attributes(&self.label_attributes)
            .html(&html)
            .html(" ")
            .html(&label)
            .render()
    }

    fn box_clone(&self) -> Box<dyn InputWidget> {
        Box::new(self.clone())
    }
}
