//! Error types for forms.

use indexmap::IndexMap;
use thiserror::Error;

/// Form-specific errors.
///
/// Every variant is raised at the point of misuse and propagated to the
/// caller of the render or resolve operation; nothing is rendered partially.
#[derive(Debug, Error)]
pub enum FormError {
    /// The attribute path does not exist on the model chain.
    #[error("attribute \"{attribute}\" does not exist on {model}")]
    AttributeNotFound { model: String, attribute: String },

    /// No theme is registered under the requested name.
    #[error("theme \"{0}\" is not registered")]
    ThemeNotFound(String),

    /// A widget received a value it cannot render.
    #[error("{widget} widget requires a value of type {expected}, got {actual}")]
    InvalidValueType {
        widget: &'static str,
        expected: String,
        actual: &'static str,
    },

    /// A raw value could not be coerced to the declared attribute type.
    #[error("cannot assign {actual} to attribute \"{attribute}\" declared as \"{declared}\"")]
    TypeMismatch {
        attribute: String,
        declared: &'static str,
        actual: &'static str,
    },

    /// Structural misuse of a widget or theme option.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The widget type identifier is not known to the field factory.
    #[error("unknown widget type: {0}")]
    UnknownWidget(String),

    /// Theme configuration could not be parsed.
    #[error("failed to parse theme configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl FormError {
    pub(crate) fn attribute_not_found(model: &str, attribute: impl Into<String>) -> Self {
        Self::AttributeNotFound {
            model: model.to_string(),
            attribute: attribute.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

/// Collection of validation errors by attribute.
///
/// Attributes keep the order in which their first error was added, so
/// summaries render in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Errors keyed by attribute name.
    pub errors: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self {
            errors: IndexMap::new(),
        }
    }

    /// Adds an error for an attribute.
    pub fn add(&mut self, attribute: &str, message: impl Into<String>) {
        self.errors
            .entry(attribute.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    /// Returns the number of attributes with errors.
    pub fn len(&self) -> usize {
        self.errors.values().filter(|m| !m.is_empty()).count()
    }

    /// Returns errors for a specific attribute.
    pub fn get(&self, attribute: &str) -> Option<&Vec<String>> {
        self.errors.get(attribute)
    }

    /// Returns the first error of an attribute.
    pub fn first(&self, attribute: &str) -> Option<&str> {
        self.errors
            .get(attribute)
            .and_then(|m| m.first())
            .map(String::as_str)
    }

    /// Removes every error of an attribute.
    pub fn clear(&mut self, attribute: &str) {
        self.errors.shift_remove(attribute);
    }

    /// Returns all errors as a flat list.
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(attribute, messages)| {
                messages
                    .iter()
                    .map(move |msg| (attribute.as_str(), msg.as_str()))
            })
            .collect()
    }

    /// Returns the first message of every attribute that has one.
    pub fn first_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .filter_map(|(attribute, messages)| {
                messages.first().map(|m| (attribute.as_str(), m.as_str()))
            })
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (attribute, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{attribute}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
