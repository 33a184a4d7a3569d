//! Attribute validators and rule sets.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{Result, ValidationErrors};
use crate::model::{self, FormModel};
use crate::tag::Attributes;
use crate::value::Value;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Trait for attribute validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    fn validate(&self, value: &Value) -> std::result::Result<(), String>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;

    /// HTML attributes mirroring this rule for client-side validation.
    fn html_attributes(&self) -> Attributes {
        Attributes::new()
    }
}

fn text_of(value: &Value) -> String {
    value.to_attr_string().unwrap_or_default()
}

/// Validator that requires a non-empty value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new RequiredValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Value cannot be blank.".to_string(),
        }
    }

    /// Creates a new RequiredValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        let blank = match value {
            Value::String(s) => s.trim().is_empty(),
            other => other.is_empty(),
        };
        if blank {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn html_attributes(&self) -> Attributes {
        Attributes::new().with("required", true)
    }
}

/// Validator that enforces a maximum length in characters.
///
/// Like every validator except [`RequiredValidator`], empty values pass.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("This value must contain at most {max_length} characters."),
        }
    }

    /// Creates a new MaxLengthValidator with custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        if value.is_empty() || text_of(value).chars().count() <= self.max_length {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn html_attributes(&self) -> Attributes {
        Attributes::new().with("maxlength", self.max_length)
    }
}

/// Validator that enforces a minimum length in characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("This value must contain at least {min_length} characters."),
        }
    }

    /// Creates a new MinLengthValidator with custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        if value.is_empty() || text_of(value).chars().count() >= self.min_length {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn html_attributes(&self) -> Attributes {
        Attributes::new().with("minlength", self.min_length)
    }
}

/// Validator for email addresses.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    /// Creates a new EmailValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "This value is not a valid email address.".to_string(),
        }
    }

    /// Creates a new EmailValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        if value.is_empty() || EMAIL_PATTERN.is_match(&text_of(value)) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for URL values.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    message: String,
}

impl UrlValidator {
    /// Creates a new UrlValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "This value is not a valid URL.".to_string(),
        }
    }

    /// Creates a new UrlValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for UrlValidator {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        let text = text_of(value);
        if value.is_empty() || text.starts_with("http://") || text.starts_with("https://") {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator using a custom regex pattern.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    message: String,
}

impl RegexValidator {
    /// Creates a new RegexValidator.
    pub fn new(pattern: &str, message: impl Into<String>) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        if value.is_empty() || self.pattern.is_match(&text_of(value)) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn html_attributes(&self) -> Attributes {
        // The `pattern` attribute is implicitly anchored.
        let source = self.pattern.as_str();
        let source = source.strip_prefix('^').unwrap_or(source);
        let source = source.strip_suffix('$').unwrap_or(source);
        Attributes::new().with("pattern", source)
    }
}

/// Validator for numeric range.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
    message: String,
}

impl RangeValidator {
    /// Creates a new RangeValidator with min and max bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("Value must be between {min} and {max}."),
            (Some(min), None) => format!("Value must be at least {min}."),
            (None, Some(max)) => format!("Value must be at most {max}."),
            (None, None) => "Invalid value.".to_string(),
        };
        Self { min, max, message }
    }

    /// Creates a new RangeValidator with custom message.
    pub fn with_message(min: Option<f64>, max: Option<f64>, message: impl Into<String>) -> Self {
        Self {
            min,
            max,
            message: message.into(),
        }
    }
}

impl Validator for RangeValidator {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        if value.is_empty() {
            return Ok(());
        }
        let num: f64 = text_of(value)
            .trim()
            .parse()
            .map_err(|_| "Value must be a number.".to_string())?;

        if let Some(min) = self.min {
            if num < min {
                return Err(self.message.clone());
            }
        }

        if let Some(max) = self.max {
            if num > max {
                return Err(self.message.clone());
            }
        }

        Ok(())
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn html_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        if let Some(min) = self.min {
            attrs.set("min", min);
        }
        if let Some(max) = self.max {
            attrs.set("max", max);
        }
        attrs
    }
}

/// The outcome of a validation run, keyed by dotted attribute path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: ValidationErrors,
}

impl ValidationResult {
    /// Returns whether no rule failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The collected errors.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn errors_indexed_by_attribute(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors.errors
    }
}

/// Validators keyed by dotted attribute path, applied in declaration order.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<(String, Box<dyn Validator>)>,
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("paths", &self.rules.iter().map(|(p, _)| p).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a validator for an attribute path.
    #[must_use]
    pub fn rule(mut self, path: impl Into<String>, validator: impl Validator + 'static) -> Self {
        self.rules.push((path.into(), Box::new(validator)));
        self
    }

    /// Returns the validators registered for `path`.
    pub fn rules_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a dyn Validator> {
        self.rules
            .iter()
            .filter(move |(p, _)| p == path)
            .map(|(_, v)| v.as_ref())
    }

    /// HTML attributes contributed by the rules of `path`.
    pub fn html_attributes(&self, path: &str) -> Attributes {
        let mut attrs = Attributes::new();
        for validator in self.rules_for(path) {
            attrs.merge(&validator.html_attributes());
        }
        attrs
    }

    /// Validates the current state of `model`.
    ///
    /// A rule naming a path the model does not declare is an error.
    pub fn validate(&self, model: &dyn FormModel) -> Result<ValidationResult> {
        let mut errors = ValidationErrors::new();
        for (path, validator) in &self.rules {
            let value = model::attribute_value(model, path)?;
            if let Err(message) = validator.validate(&value) {
                errors.add(path, message);
            }
        }
        Ok(ValidationResult { errors })
    }

    /// Validates and stores each error on the deepest model of its path,
    /// keyed by the leaf segment. Models touched by a rule lose their
    /// previous errors.
    pub(crate) fn validate_and_store(&self, model: &mut dyn FormModel) -> Result<bool> {
        let result = self.validate(model)?;

        let mut grouped: IndexMap<&str, ValidationErrors> = IndexMap::new();
        for (path, _) in &self.rules {
            grouped.entry(split_parent(path).0).or_default();
        }
        for (path, messages) in result.errors_indexed_by_attribute() {
            let (parent, leaf) = split_parent(path);
            let target = grouped.entry(parent).or_default();
            for message in messages {
                target.add(leaf, message.clone());
            }
        }
        for (parent, errors) in grouped {
            model::nested_at_mut(model, parent)?.set_validation_errors(errors);
        }

        Ok(result.is_valid())
    }
}

fn split_parent(path: &str) -> (&str, &str) {
    path.rsplit_once('.').unwrap_or(("", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::ProfileForm;
    use crate::model::FormModelExt;

    #[test]
    fn test_required_validator() {
        let v = RequiredValidator::new();
        assert!(v.validate(&Value::from("hello")).is_ok());
        assert!(v.validate(&Value::from("")).is_err());
        assert!(v.validate(&Value::from("   ")).is_err());
        assert!(v.validate(&Value::Null).is_err());
        assert!(v.validate(&Value::Int(0)).is_ok());
    }

    #[test]
    fn test_max_length_validator() {
        let v = MaxLengthValidator::new(5);
        assert!(v.validate(&Value::from("hello")).is_ok());
        assert!(v.validate(&Value::from("héllo")).is_ok());
        assert!(v.validate(&Value::from("hello world")).is_err());
    }

    #[test]
    fn test_min_length_validator() {
        let v = MinLengthValidator::new(5);
        assert!(v.validate(&Value::from("hello")).is_ok());
        assert!(v.validate(&Value::from("hi")).is_err());
        assert!(v.validate(&Value::from("")).is_ok());
    }

    #[test]
    fn test_email_validator() {
        let v = EmailValidator::new();
        assert!(v.validate(&Value::from("user@example.com")).is_ok());
        assert!(v.validate(&Value::from("user.name@domain.co.uk")).is_ok());
        assert!(v.validate(&Value::from("invalid")).is_err());
        assert!(v.validate(&Value::from("@example.com")).is_err());
    }

    #[test]
    fn test_url_validator() {
        let v = UrlValidator::new();
        assert!(v.validate(&Value::from("https://example.com")).is_ok());
        assert!(v.validate(&Value::from("example.com")).is_err());
    }

    #[test]
    fn test_regex_validator() {
        let v = RegexValidator::new(r"^\d{4}-\d{2}-\d{2}$", "Enter a valid date.").unwrap();
        assert!(v.validate(&Value::from("2024-01-15")).is_ok());
        assert!(v.validate(&Value::from("not a date")).is_err());
        assert_eq!(
            v.html_attributes().render(),
            r#" pattern="\d{4}-\d{2}-\d{2}""#
        );
    }

    #[test]
    fn test_range_validator() {
        let v = RangeValidator::new(Some(0.0), Some(100.0));
        assert!(v.validate(&Value::Int(50)).is_ok());
        assert!(v.validate(&Value::from("100")).is_ok());
        assert!(v.validate(&Value::Int(-1)).is_err());
        assert!(v.validate(&Value::Float(100.5)).is_err());
    }

    #[test]
    fn test_rule_set_html_attributes() {
        let rules = RuleSet::new()
            .rule("name", RequiredValidator::new())
            .rule("name", MaxLengthValidator::new(20))
            .rule("age", RangeValidator::new(Some(18.0), None));
        assert_eq!(
            rules.html_attributes("name").render(),
            r#" maxlength="20" required"#
        );
        assert_eq!(rules.html_attributes("age").render(), r#" min="18""#);
    }

    #[test]
    fn test_validate_stores_errors_on_deepest_model() {
        let mut form = ProfileForm::default();
        let rules = RuleSet::new()
            .rule("name", RequiredValidator::new())
            .rule("address.city", RequiredValidator::with_message("City is required."));

        assert!(!form.validate(&rules).unwrap());
        assert_eq!(form.errors.first("name"), Some("Value cannot be blank."));
        assert_eq!(form.address.errors.first("city"), Some("City is required."));
        assert!(form.errors.get("address.city").is_none());
        assert!(!form.is_valid());

        form.name = "Ann".to_string();
        form.address.city = "Oslo".to_string();
        assert!(form.validate(&rules).unwrap());
        assert!(form.is_valid());
        assert!(form.address.errors.is_empty());
    }

    #[test]
    fn test_validate_result_is_keyed_by_path() {
        let form = ProfileForm::default();
        let rules = RuleSet::new().rule("address.city", RequiredValidator::new());
        let result = rules.validate(&form).unwrap();
        assert!(!result.is_valid());
        assert!(result
            .errors_indexed_by_attribute()
            .contains_key("address.city"));
    }

    #[test]
    fn test_validate_unknown_path() {
        let form = ProfileForm::default();
        let rules = RuleSet::new().rule("nope", RequiredValidator::new());
        assert!(rules.validate(&form).is_err());
    }
}
