//! Form widgets for rendering HTML inputs.
//!
//! Every input widget wraps an [`InputBase`]: the [`InputData`] snapshot of
//! one attribute plus caller-supplied HTML attributes. Widgets are
//! configured with consuming builder methods and render without side
//! effects, so a configured widget can be rendered any number of times.

use std::fmt;
use std::str::FromStr;

use crate::error::{FormError, Result};
use crate::input_data::InputData;
use crate::tag::{AttrValue, Attributes, Tag};
use crate::value::{Value, ValueKind};

/// Implements [`GlobalAttributes`] for widgets holding a `base: InputBase`.
macro_rules! input_widget_attributes {
    ($($widget:ty),* $(,)?) => {
        $(impl $crate::widgets::GlobalAttributes for $widget {
            fn attributes_mut(&mut self) -> &mut $crate::tag::Attributes {
                &mut self.base.attributes
            }
        })*
    };
}

mod button;
mod checkbox;
mod choice_list;
mod error;
mod error_summary;
mod fieldset;
mod file;
mod form;
mod hidden;
mod hint;
mod label;
mod number;
mod select;
mod text;
mod textarea;

pub use button::{Button, ButtonGroup};
pub use checkbox::Checkbox;
pub use choice_list::{ChoiceItem, ChoiceList, ItemFormatter};
pub use error::Error;
pub use error_summary::ErrorSummary;
pub use fieldset::Fieldset;
pub use file::File;
pub use form::Form;
pub use hidden::Hidden;
pub use hint::Hint;
pub use label::Label;
pub use number::Number;
pub use select::{Select, SelectItem};
pub use text::TextInput;
pub use textarea::Textarea;

/// Widget type identifiers, as used in theme `fieldConfigs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Text,
    Email,
    Url,
    Telephone,
    Password,
    Date,
    DateTime,
    DateTimeLocal,
    Number,
    Range,
    Textarea,
    Hidden,
    Checkbox,
    Radio,
    CheckboxList,
    RadioList,
    Select,
    File,
    Button,
    ButtonGroup,
    Fieldset,
    Form,
}

impl WidgetKind {
    pub const ALL: &'static [Self] = &[
        Self::Text,
        Self::Email,
        Self::Url,
        Self::Telephone,
        Self::Password,
        Self::Date,
        Self::DateTime,
        Self::DateTimeLocal,
        Self::Number,
        Self::Range,
        Self::Textarea,
        Self::Hidden,
        Self::Checkbox,
        Self::Radio,
        Self::CheckboxList,
        Self::RadioList,
        Self::Select,
        Self::File,
        Self::Button,
        Self::ButtonGroup,
        Self::Fieldset,
        Self::Form,
    ];

    /// Returns the identifier of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Url => "url",
            Self::Telephone => "telephone",
            Self::Password => "password",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::DateTimeLocal => "dateTimeLocal",
            Self::Number => "number",
            Self::Range => "range",
            Self::Textarea => "textarea",
            Self::Hidden => "hidden",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::CheckboxList => "checkboxList",
            Self::RadioList => "radioList",
            Self::Select => "select",
            Self::File => "file",
            Self::Button => "button",
            Self::ButtonGroup => "buttonGroup",
            Self::Fieldset => "fieldset",
            Self::Form => "form",
        }
    }

    /// Builds a widget of this kind with default options.
    pub fn build(self, data: InputData) -> Box<dyn InputWidget> {
        match self {
            Self::Text => Box::new(TextInput::text(data)),
            Self::Email => Box::new(TextInput::email(data)),
            Self::Url => Box::new(TextInput::url(data)),
            Self::Telephone => Box::new(TextInput::telephone(data)),
            Self::Password => Box::new(TextInput::password(data)),
            Self::Date => Box::new(TextInput::date(data)),
            Self::DateTime => Box::new(TextInput::datetime(data)),
            Self::DateTimeLocal => Box::new(TextInput::datetime_local(data)),
            Self::Number => Box::new(Number::number(data)),
            Self::Range => Box::new(Number::range(data)),
            Self::Textarea => Box::new(Textarea::new(data)),
            Self::Hidden => Box::new(Hidden::new(data)),
            Self::Checkbox => Box::new(Checkbox::checkbox(data)),
            Self::Radio => Box::new(Checkbox::radio(data)),
            Self::CheckboxList => Box::new(ChoiceList::checkbox_list(data)),
            Self::RadioList => Box::new(ChoiceList::radio_list(data)),
            Self::Select => Box::new(Select::new(data)),
            Self::File => Box::new(File::new(data)),
            Self::Button => Box::new(Button::from_data(data)),
            Self::ButtonGroup => Box::new(ButtonGroup::new()),
            Self::Fieldset => Box::new(Fieldset::new(data)),
            Self::Form => Box::new(Form::new(data)),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FormError::UnknownWidget(s.to_string()))
    }
}

/// State shared by every input widget.
#[derive(Debug, Clone, PartialEq)]
pub struct InputBase {
    pub(crate) data: InputData,
    pub(crate) attributes: Attributes,
    pub(crate) use_placeholder: bool,
    pub(crate) enclosed_by_label: bool,
}

impl InputBase {
    /// Wraps `data` with no extra attributes.
    pub fn new(data: InputData) -> Self {
        Self {
            data,
            attributes: Attributes::new(),
            use_placeholder: true,
            enclosed_by_label: false,
        }
    }

    /// The input data snapshot.
    pub fn data(&self) -> &InputData {
        &self.data
    }

    /// Caller-supplied attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// `id` and `name` from the input data under the caller's attributes.
    pub fn input_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        if let Some(id) = self.data.get_id() {
            attrs.set("id", id);
        }
        if !self.data.get_name().is_empty() {
            attrs.set("name", self.data.get_name());
        }
        attrs.merge(&self.attributes);
        attrs
    }

    /// The element id the rendered input ends up with.
    pub fn effective_id(&self) -> Option<String> {
        self.input_attributes()
            .get("id")
            .and_then(AttrValue::as_str)
            .map(String::from)
    }

    pub(crate) fn apply_placeholder(&self, attrs: &mut Attributes) {
        if self.use_placeholder {
            if let Some(placeholder) = self.data.get_placeholder() {
                attrs.set_default("placeholder", placeholder);
            }
        }
    }
}

/// A widget rendering one form control from an [`InputData`].
pub trait InputWidget: fmt::Debug + Send + Sync {
    fn kind(&self) -> WidgetKind;

    fn base(&self) -> &InputBase;

    fn base_mut(&mut self) -> &mut InputBase;

    /// Renders the widget. Fails before emitting anything when the value
    /// has a type the widget cannot render.
    fn render(&self) -> Result<String>;

    fn box_clone(&self) -> Box<dyn InputWidget>;

    /// Whether the widget renders its own label.
    fn owns_label(&self) -> bool {
        false
    }

    /// Attributes shared by the item inputs of a list widget, `None` for
    /// single-input widgets.
    fn items_attributes_mut(&mut self) -> Option<&mut Attributes> {
        None
    }

    /// Renders the opening part of a wrapping widget.
    fn begin(&self) -> Result<String> {
        Err(FormError::invalid_config(format!(
            "{} widget cannot be rendered in begin/end form",
            self.kind()
        )))
    }

    /// Renders the closing part of a wrapping widget.
    fn end(&self) -> Result<String> {
        Err(FormError::invalid_config(format!(
            "{} widget cannot be rendered in begin/end form",
            self.kind()
        )))
    }
}

impl Clone for Box<dyn InputWidget> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Fluent setters for global HTML attributes.
///
/// Caller values set here take precedence over theme attributes.
pub trait GlobalAttributes: Sized {
    fn attributes_mut(&mut self) -> &mut Attributes;

    #[must_use]
    fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes_mut().set(key, value);
        self
    }

    /// Merges `attributes` over the ones already set.
    #[must_use]
    fn attributes(mut self, attributes: &Attributes) -> Self {
        self.attributes_mut().merge(attributes);
        self
    }

    #[must_use]
    fn add_class(mut self, class: &str) -> Self {
        self.attributes_mut().add_class(class);
        self
    }

    #[must_use]
    fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id.into())
    }

    #[must_use]
    fn disabled(self, disabled: bool) -> Self {
        self.attr("disabled", disabled)
    }

    #[must_use]
    fn required(self, required: bool) -> Self {
        self.attr("required", required)
    }

    #[must_use]
    fn readonly(self, readonly: bool) -> Self {
        self.attr("readonly", readonly)
    }

    #[must_use]
    fn autofocus(self, autofocus: bool) -> Self {
        self.attr("autofocus", autofocus)
    }

    #[must_use]
    fn tabindex(self, tabindex: i32) -> Self {
        self.attr("tabindex", tabindex)
    }

    /// Associates the control with a form element by id.
    #[must_use]
    fn form(self, form_id: &str) -> Self {
        self.attr("form", form_id)
    }

    #[must_use]
    fn title(self, title: &str) -> Self {
        self.attr("title", title)
    }

    #[must_use]
    fn min(self, min: impl Into<AttrValue>) -> Self {
        self.attr("min", min)
    }

    #[must_use]
    fn max(self, max: impl Into<AttrValue>) -> Self {
        self.attr("max", max)
    }
}

/// Fails with [`FormError::InvalidValueType`] unless `value` has one of
/// the `allowed` kinds.
pub(crate) fn ensure_value(widget: &'static str, value: &Value, allowed: &[ValueKind]) -> Result<()> {
    if allowed.contains(&value.kind()) {
        Ok(())
    } else {
        Err(FormError::InvalidValueType {
            widget,
            expected: ValueKind::join(allowed),
            actual: value.kind().as_str(),
        })
    }
}

/// Scalar kinds and null.
pub(crate) const SCALAR_OR_NULL: &[ValueKind] = &[
    ValueKind::String,
    ValueKind::Int,
    ValueKind::Float,
    ValueKind::Bool,
    ValueKind::Null,
];

/// The hidden companion input submitted for unchecked or unselected controls.
pub(crate) fn hidden_companion(name: &str, value: &str) -> Result<String> {
    Tag::input("hidden").attr("name", name).attr("value", value).render()
}

/// Renders `text` in `tag`, or bare when `tag` is empty.
pub(crate) fn render_text_tag(
    tag: &str,
    attributes: &Attributes,
    text: &str,
    encode: bool,
) -> Result<String> {
    let content = if encode {
        crate::tag::html_escape(text)
    } else {
        text.to_string()
    };
    if tag.is_empty() {
        return Ok(content);
    }
    Tag::new(tag).attributes(attributes).html(&content).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in WidgetKind::ALL {
            assert_eq!(kind.as_str().parse::<WidgetKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "slider".parse::<WidgetKind>().unwrap_err();
        assert!(matches!(err, FormError::UnknownWidget(ref kind) if kind == "slider"));
    }

    #[test]
    fn test_build_matches_kind() {
        for kind in WidgetKind::ALL {
            assert_eq!(kind.build(InputData::new()).kind(), *kind);
        }
    }

    #[test]
    fn test_ensure_value() {
        assert!(ensure_value("Text", &Value::from("a"), &[ValueKind::String]).is_ok());
        let err = ensure_value(
            "Text",
            &Value::Int(1),
            &[ValueKind::String, ValueKind::Null],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Text widget requires a value of type string|null, got int"
        );
    }

    #[test]
    fn test_input_attributes_caller_wins() {
        let mut base = InputBase::new(InputData::new().name("q").id("q-id"));
        base.attributes.set("id", "custom");
        assert_eq!(base.input_attributes().render(), r#" id="custom" name="q""#);
        assert_eq!(base.effective_id().as_deref(), Some("custom"));
    }

    #[test]
    fn test_render_text_tag() {
        let attrs = Attributes::new().with("class", "hint");
        assert_eq!(
            render_text_tag("div", &attrs, "a < b", true).unwrap(),
            r#"<div class="hint">a &lt; b</div>"#
        );
        assert_eq!(
            render_text_tag("", &attrs, "<b>x</b>", false).unwrap(),
            "<b>x</b>"
        );
    }
}
