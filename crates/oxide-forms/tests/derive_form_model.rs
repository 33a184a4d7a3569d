//! Tests for the `#[derive(FormModel)]` macro output.
//!
//! These tests verify that the derive macro generates:
//! - the form name, defaulting to the struct name
//! - value, label, hint and placeholder lookups per attribute
//! - typed assignment through `FromValue`
//! - nested model access for dotted paths
//! - storage of validation errors

use std::sync::Arc;

use oxide_forms::validation::{MinLengthValidator, RequiredValidator, RuleSet};
use oxide_forms::{
    FormError, FormModel, FormModelExt, InputData, RenderContext, ScalarType, ThemeRegistry,
    ValidationErrors, Value,
};
use serde_json::json;

#[derive(Debug, Default, FormModel)]
pub struct PageData {
    #[form(hint = "Pick one or more sources")]
    pub source_ids: Vec<String>,
    #[form(placeholder = "Page title")]
    pub title: String,
    #[form(errors)]
    pub errors: ValidationErrors,
}

#[derive(Debug, Default, FormModel)]
pub struct Address {
    pub city: String,
    pub zip: Option<i64>,
    #[form(name = "pageData", nested)]
    pub page_data: PageData,
    #[form(errors)]
    pub errors: ValidationErrors,
}

#[derive(Debug, Default, FormModel)]
#[form(name = "Profile")]
pub struct ProfileForm {
    #[form(label = "Full name", placeholder = "Your name")]
    pub name: String,
    pub first_name: String,
    pub age: u32,
    pub newsletter: bool,
    #[form(nested)]
    pub address: Address,
    #[form(skip)]
    pub submitted: bool,
    #[form(errors)]
    pub errors: ValidationErrors,
}

// =============================================================================
// Test: Names and metadata
// =============================================================================

#[test]
fn test_form_name() {
    assert_eq!(ProfileForm::default().form_name(), "Profile");
    assert_eq!(Address::default().form_name(), "Address");
}

#[test]
fn test_has_attribute() {
    let form = ProfileForm::default();
    assert!(form.has_attribute("name"));
    assert!(form.has_attribute("address"));
    assert!(!form.has_attribute("submitted"));
    assert!(!form.has_attribute("errors"));
    assert!(form.has_attribute_path("address.pageData.source_ids"));
    assert!(!form.has_attribute_path("address.page_data.source_ids"));
}

#[test]
fn test_labels() {
    let form = ProfileForm::default();
    assert_eq!(form.get_attribute_label("name").unwrap(), "Full name");
    assert_eq!(form.get_attribute_label("first_name").unwrap(), "First Name");
    assert_eq!(
        form.get_attribute_label("address.pageData.source_ids").unwrap(),
        "Source Ids"
    );
}

#[test]
fn test_hint_and_placeholder() {
    let form = ProfileForm::default();
    assert_eq!(
        form.get_attribute_hint("address.pageData.source_ids").unwrap(),
        "Pick one or more sources"
    );
    assert_eq!(form.get_attribute_hint("name").unwrap(), "");
    assert_eq!(form.get_attribute_placeholder("name").unwrap(), "Your name");
    assert_eq!(
        form.get_attribute_placeholder("address.pageData.title").unwrap(),
        "Page title"
    );
}

#[test]
fn test_declared_types() {
    let form = ProfileForm::default();
    assert_eq!(form.attribute_type("name"), ScalarType::String);
    assert_eq!(form.attribute_type("age"), ScalarType::Int);
    assert_eq!(form.attribute_type("newsletter"), ScalarType::Bool);
    assert_eq!(form.address.attribute_type("zip"), ScalarType::Int);
    assert_eq!(form.address.page_data.attribute_type("source_ids"), ScalarType::Array);
}

// =============================================================================
// Test: Values
// =============================================================================

#[test]
fn test_values() {
    let mut form = ProfileForm {
        name: "Ann".to_string(),
        age: 42,
        ..Default::default()
    };
    form.address.page_data.source_ids = vec!["1".to_string(), "3".to_string()];

    assert_eq!(form.get_attribute_value("name").unwrap(), Value::from("Ann"));
    assert_eq!(form.get_attribute_value("age").unwrap(), Value::Int(42));
    assert_eq!(form.get_attribute_value("address.zip").unwrap(), Value::Null);
    assert_eq!(
        form.get_attribute_value_at(&["address", "pageData", "source_ids"])
            .unwrap(),
        Value::from(vec!["1", "3"])
    );
}

#[test]
fn test_set_attribute_casts() {
    let mut form = ProfileForm::default();
    form.set_attribute("age", "42").unwrap();
    form.set_attribute("newsletter", "on").unwrap();
    form.set_attribute("address.zip", "").unwrap();
    form.set_attribute("address.pageData.source_ids", "7").unwrap();

    assert_eq!(form.age, 42);
    assert!(form.newsletter);
    assert_eq!(form.address.zip, None);
    assert_eq!(form.address.page_data.source_ids, vec!["7".to_string()]);
}

#[test]
fn test_set_attribute_type_mismatch() {
    let mut form = ProfileForm::default();
    let err = form.set_attribute("age", "many").unwrap_err();
    assert!(matches!(
        err,
        FormError::TypeMismatch { ref attribute, declared: "int", actual: "string" }
            if attribute == "age"
    ));
}

#[test]
fn test_set_attribute_value_rejects_wrong_shape() {
    let mut form = ProfileForm::default();
    let err = form
        .set_attribute_value("age", Value::from(vec![1, 2]))
        .unwrap_err();
    assert!(matches!(err, FormError::TypeMismatch { .. }));
}

#[test]
fn test_unknown_attribute() {
    let form = ProfileForm::default();
    assert!(matches!(
        form.get_attribute_value("address.pageData.noExist"),
        Err(FormError::AttributeNotFound { ref model, ref attribute })
            if model == "PageData" && attribute == "noExist"
    ));
    assert!(matches!(
        form.get_attribute_value("submitted"),
        Err(FormError::AttributeNotFound { .. })
    ));
}

#[test]
fn test_load_nested() {
    let mut form = ProfileForm::default();
    let data = json!({
        "Profile": {
            "name": "Ann",
            "age": "41",
            "unknown": "ignored",
            "address": {
                "city": "Oslo",
                "pageData": {"source_ids": ["2", "5"]}
            }
        }
    });
    assert!(form.load(&data, None).unwrap());
    assert_eq!(form.name, "Ann");
    assert_eq!(form.age, 41);
    assert_eq!(form.address.city, "Oslo");
    assert_eq!(form.address.page_data.source_ids, vec!["2", "5"]);

    assert!(!form.load(&json!({"Other": {}}), None).unwrap());
}

#[test]
fn test_scalar_for_nested_attribute() {
    let mut form = ProfileForm::default();
    assert!(matches!(
        form.set_attribute("address", "x"),
        Err(FormError::TypeMismatch { ref attribute, declared: "object", .. })
            if attribute == "address"
    ));
    assert!(matches!(
        form.set_attribute_value("address", Value::from("x")),
        Err(FormError::TypeMismatch { declared: "object", .. })
    ));
    assert!(matches!(
        form.load(&json!({"Profile": {"address": "x"}}), None),
        Err(FormError::TypeMismatch { declared: "object", actual: "string", .. })
    ));
    assert!(form.resolve("address").is_ok());
}

#[test]
fn test_attribute_without_generated_id() {
    #[derive(Debug, Default, FormModel)]
    struct Comment {
        #[form(no_id)]
        body: String,
        author: String,
    }

    let comment = Comment::default();
    assert!(!comment.generates_input_id("body"));
    assert!(comment.generates_input_id("author"));

    let body = InputData::from_model(&comment, "body").unwrap();
    assert_eq!(body.get_id(), None);
    assert!(!body.accepts_generated_id());
    let author = InputData::from_model(&comment, "author").unwrap();
    assert_eq!(author.get_id(), Some("comment-author"));

    let ctx = RenderContext::new(Arc::new(ThemeRegistry::new()));
    let html = ctx.model_field("text", &comment, "body").unwrap().render().unwrap();
    assert!(!html.contains("id="));
    assert!(html.contains("<label>Body</label>"));
}

// =============================================================================
// Test: Validation errors
// =============================================================================

#[test]
fn test_validate_stores_errors_on_deepest_model() {
    let rules = RuleSet::new()
        .rule("name", RequiredValidator::new())
        .rule("address.pageData.title", MinLengthValidator::new(3));
    let mut form = ProfileForm::default();
    form.address.page_data.title = "ab".to_string();

    assert!(!form.validate(&rules).unwrap());
    assert!(!form.is_valid());
    assert_eq!(form.errors.first("name"), Some("Value cannot be blank."));
    assert_eq!(
        form.get_attribute_errors("address.pageData.title").unwrap(),
        vec!["This value must contain at least 3 characters.".to_string()]
    );

    let data = InputData::from_model(&form, "address.pageData.title").unwrap();
    assert_eq!(data.get_name(), "Profile[address][pageData][title]");
    assert!(!data.is_valid());
}

#[test]
fn test_model_without_errors_field() {
    #[derive(Debug, Default, FormModel)]
    struct Search {
        q: String,
    }

    let search = Search::default();
    assert!(search.validation_errors().is_none());
    assert!(search.is_valid());
    assert!(search.get_attribute_errors("q").unwrap().is_empty());
}
