//! Normalized per-attribute input data consumed by widgets.

use crate::error::Result;
use crate::model::{self, FormModel};
use crate::value::Value;

/// A value snapshot of one attribute for a single render pass.
///
/// Built either from a model path ([`InputData::from_model`]) or by hand
/// for pure rendering without a backing model ([`InputData::new`]). It never
/// borrows from the model it was extracted from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputData {
    name: String,
    value: Value,
    label: Option<String>,
    hint: Option<String>,
    placeholder: Option<String>,
    id: Option<String>,
    skip_generated_id: bool,
    validation_errors: Vec<String>,
}

impl InputData {
    /// Creates empty pure-mode data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts data for `path` using the model's form name as scope.
    pub fn from_model(model: &dyn FormModel, path: &str) -> Result<Self> {
        Self::from_model_scoped(model, path, None)
    }

    /// Extracts data for `path` with an explicit form scope.
    ///
    /// `None` uses the model's form name, `Some("")` emits bare attribute
    /// names without a prefix.
    pub fn from_model_scoped(
        model: &dyn FormModel,
        path: &str,
        scope: Option<&str>,
    ) -> Result<Self> {
        let resolved = model::resolve(model, path)?;
        let name = input_name(scope.unwrap_or(model.form_name()), path);
        let with_id = model::generates_input_id(model, path)?;

        Ok(Self {
            id: with_id.then(|| input_id(&name)),
            skip_generated_id: !with_id,
            name,
            value: resolved.value,
            label: Some(resolved.label),
            hint: Some(resolved.hint),
            placeholder: Some(resolved.placeholder),
            validation_errors: resolved.errors,
        })
    }

    /// Sets the HTML `name`.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the current value.
    #[must_use]
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the label text.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the hint text.
    #[must_use]
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the element id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Clears the id; a render context may still generate one.
    #[must_use]
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    /// Clears the id and keeps render contexts from generating one.
    #[must_use]
    pub fn without_generated_id(mut self) -> Self {
        self.id = None;
        self.skip_generated_id = true;
        self
    }

    /// Whether a render context may give this input a generated id.
    pub fn accepts_generated_id(&self) -> bool {
        !self.skip_generated_id
    }

    /// Sets the validation messages; any message marks the input invalid.
    #[must_use]
    pub fn validation_errors(mut self, errors: Vec<String>) -> Self {
        self.validation_errors = errors;
        self
    }

    /// The HTML `name`, possibly empty.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// The current value.
    pub fn get_value(&self) -> &Value {
        &self.value
    }

    /// Label text; `None` and `""` both mean there is none.
    pub fn get_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }

    /// Hint text; `None` and `""` both mean there is none.
    pub fn get_hint(&self) -> Option<&str> {
        self.hint.as_deref().filter(|h| !h.is_empty())
    }

    /// Placeholder text; `None` and `""` both mean there is none.
    pub fn get_placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref().filter(|p| !p.is_empty())
    }

    /// The element id, if any.
    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// All validation messages.
    pub fn get_validation_errors(&self) -> &[String] {
        &self.validation_errors
    }

    /// The only validity signal used for styling.
    pub fn is_valid(&self) -> bool {
        self.validation_errors.is_empty()
    }

    /// The message shown by error widgets.
    pub fn first_error(&self) -> Option<&str> {
        self.validation_errors.first().map(String::as_str)
    }
}

/// Builds the HTML `name` of a dotted path: `Scope[a][b][c]`.
///
/// With an empty scope the first segment stays bare: `a[b][c]`.
pub fn input_name(scope: &str, path: &str) -> String {
    let mut segments = path.split('.');
    let mut name = if scope.is_empty() {
        segments.next().unwrap_or_default().to_string()
    } else {
        scope.to_string()
    };
    for segment in segments {
        name.push('[');
        name.push_str(segment);
        name.push(']');
    }
    name
}

/// Derives an element id from an input name: `TextForm[job]` → `textform-job`.
pub fn input_id(name: &str) -> String {
    name.to_lowercase()
        .replace("[]", "")
        .replace("][", "-")
        .replace('[', "-")
        .replace(']', "")
        .replace([' ', '.'], "-")
}
