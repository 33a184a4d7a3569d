//! Single-line text inputs: text, email, url, telephone, password and the
//! date/time variants.

use super::{ensure_value, InputBase, InputWidget, WidgetKind};
use crate::error::{FormError, Result};
use crate::input_data::InputData;
use crate::tag::{AttrValue, Tag};
use crate::value::ValueKind;

const STRING_OR_NULL: &[ValueKind] = &[ValueKind::String, ValueKind::Null];

/// A single `<input>` holding a string value.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    kind: WidgetKind,
    base: InputBase,
}

input_widget_attributes!(TextInput);

impl TextInput {
    fn with_kind(kind: WidgetKind, data: InputData) -> Self {
        Self {
            kind,
            base: InputBase::new(data),
        }
    }

    /// An `<input type="text">`.
    pub fn text(data: InputData) -> Self {
        Self::with_kind(WidgetKind::Text, data)
    }

    /// An `<input type="email">`.
    pub fn email(data: InputData) -> Self {
        Self::with_kind(WidgetKind::Email, data)
    }

    /// An `<input type="url">`.
    pub fn url(data: InputData) -> Self {
        Self::with_kind(WidgetKind::Url, data)
    }

    /// An `<input type="tel">`.
    pub fn telephone(data: InputData) -> Self {
        Self::with_kind(WidgetKind::Telephone, data)
    }

    /// An `<input type="password">`.
    pub fn password(data: InputData) -> Self {
        Self::with_kind(WidgetKind::Password, data)
    }

    /// An `<input type="date">`.
    pub fn date(data: InputData) -> Self {
        Self::with_kind(WidgetKind::Date, data)
    }

    /// An `<input type="datetime">`.
    pub fn datetime(data: InputData) -> Self {
        Self::with_kind(WidgetKind::DateTime, data)
    }

    /// An `<input type="datetime-local">`.
    pub fn datetime_local(data: InputData) -> Self {
        Self::with_kind(WidgetKind::DateTimeLocal, data)
    }

    /// The HTML `type` attribute for this input.
    pub const fn input_type(&self) -> &'static str {
        match self.kind {
            WidgetKind::Email => "email",
            WidgetKind::Url => "url",
            WidgetKind::Telephone => "tel",
            WidgetKind::Password => "password",
            WidgetKind::Date => "date",
            WidgetKind::DateTime => "datetime",
            WidgetKind::DateTimeLocal => "datetime-local",
            _ => "text",
        }
    }

    const fn widget_name(&self) -> &'static str {
        match self.kind {
            WidgetKind::Email => "Email",
            WidgetKind::Url => "Url",
            WidgetKind::Telephone => "Telephone",
            WidgetKind::Password => "Password",
            WidgetKind::Date => "Date",
            WidgetKind::DateTime => "DateTime",
            WidgetKind::DateTimeLocal => "DateTimeLocal",
            _ => "Text",
        }
    }

    /// Sets an explicit placeholder, overriding the model's.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.base.attributes.set("placeholder", placeholder);
        self
    }

    /// Disables filling in the model's placeholder.
    #[must_use]
    pub fn use_placeholder(mut self, use_placeholder: bool) -> Self {
        self.base.use_placeholder = use_placeholder;
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
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.base.attributes.set("pattern", pattern);
        self
    }

    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.base.attributes.set("size", size);
        self
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

impl InputWidget for TextInput {
    fn kind(&self) -> WidgetKind {
        self.kind
    }

    fn base(&self) -> &InputBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InputBase {
        &mut self.base
    }

    fn render(&self) -> Result<String> {
        let value = self.base.data.get_value();
        ensure_value(self.widget_name(), value, STRING_OR_NULL)?;

        let mut attrs = self.base.input_attributes();
        if let Some(value) = AttrValue::from_value(value) {
            attrs.set_default("value", value);
        }
        self.base.apply_placeholder(&mut attrs);

        Tag::input(self.input_type()).attributes(&attrs).render()
    }

    fn box_clone(&self) -> Box<dyn InputWidget> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::GlobalAttributes;

    fn job() -> InputData {
        InputData::new()
            .name("TextForm[job]")
            .id("textform-job")
            .value("")
    }

    #[test]
    fn test_empty_value_renders_bare_attribute() {
        assert_eq!(
            TextInput::text(job()).render().unwrap(),
            r#"<input type="text" id="textform-job" name="TextForm[job]" value>"#
        );
    }

    #[test]
    fn test_null_value_omits_attribute() {
        let html = TextInput::text(job().value(crate::value::Value::Null))
            .render()
            .unwrap();
        assert_eq!(
            html,
            r#"<input type="text" id="textform-job" name="TextForm[job]">"#
        );
    }

    #[test]
    fn test_value_is_encoded() {
        let html = TextInput::text(job().value("a \"b\"")).render().unwrap();
        assert!(html.contains(r#"value="a &quot;b&quot;""#));
    }

    #[test]
    fn test_rejects_non_string() {
        let err = TextInput::date(job().value(5)).render().unwrap_err();
        assert!(matches!(
            err,
            FormError::InvalidValueType { widget: "Date", .. }
        ));
    }

    #[test]
    fn test_placeholder_from_model_and_override() {
        let data = job().placeholder("Your job");
        assert!(TextInput::text(data.clone())
            .render()
            .unwrap()
            .contains(r#"placeholder="Your job""#));
        assert!(TextInput::text(data.clone())
            .placeholder("Other")
            .render()
            .unwrap()
            .contains(r#"placeholder="Other""#));
        assert!(!TextInput::text(data)
            .use_placeholder(false)
            .render()
            .unwrap()
            .contains("placeholder"));
    }

    #[test]
    fn test_input_types() {
        assert!(TextInput::telephone(job())
            .render()
            .unwrap()
            .starts_with(r#"<input type="tel""#));
        assert!(TextInput::datetime_local(job())
            .render()
            .unwrap()
            .starts_with(r#"<input type="datetime-local""#));
    }

    #[test]
    fn test_builders_leave_original_untouched() {
        let widget = TextInput::email(job());
        let before = widget.render().unwrap();
        let configured = widget.clone().required(true).maxlength(10);
        assert_ne!(configured, widget);
        assert_eq!(widget.render().unwrap(), before);
        assert_eq!(widget.render().unwrap(), widget.render().unwrap());
        assert!(configured.render().unwrap().ends_with(r#" maxlength="10" required>"#));
    }

    #[test]
    fn test_empty_dirname() {
        assert!(matches!(
            TextInput::text(job()).dirname(" "),
            Err(FormError::InvalidConfiguration(_))
        ));
        let html = TextInput::text(job()).dirname("job.dir").unwrap().render().unwrap();
        assert!(html.contains(r#"dirname="job.dir""#));
    }
}
