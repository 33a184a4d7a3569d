//! Bootstrap 5 theme preset.

use super::{FieldConfig, Theme};

const CONTROL_KINDS: &[&str] = &[
    "text",
    "email",
    "url",
    "telephone",
    "password",
    "date",
    "dateTime",
    "dateTimeLocal",
    "number",
    "textarea",
    "file",
];

fn class(name: &str) -> Option<String> {
    Some(name.to_string())
}

pub(super) fn bootstrap5() -> Theme {
    let mut theme = Theme::new("bootstrap5").global(FieldConfig {
        container_class: class("mb-3"),
        hint_class: class("form-text"),
        error_class: class("invalid-feedback"),
        input_invalid_class: class("is-invalid"),
        enrich_from_validation_rules: Some(true),
        ..Default::default()
    });

    for kind in CONTROL_KINDS {
        theme = theme.field_config(
            *kind,
            FieldConfig {
                input_class: class("form-control"),
                label_class: class("form-label"),
                ..Default::default()
            },
        );
    }

    let check = FieldConfig {
        container_class: class("form-check"),
        input_class: class("form-check-input"),
        label_class: class("form-check-label"),
        template: Some("{input}\n{label}\n{hint}\n{error}".to_string()),
        enclosed_by_label: Some(false),
        ..Default::default()
    };

    theme
        .field_config("checkbox", check.clone())
        .field_config("radio", check)
        .field_config(
            "select",
            FieldConfig {
                input_class: class("form-select"),
                label_class: class("form-label"),
                ..Default::default()
            },
        )
        .field_config(
            "range",
            FieldConfig {
                input_class: class("form-range"),
                label_class: class("form-label"),
                ..Default::default()
            },
        )
        .field_config(
            "checkboxList",
            FieldConfig {
                input_class: class("form-check-input"),
                label_class: class("form-label d-block"),
                ..Default::default()
            },
        )
        .field_config(
            "radioList",
            FieldConfig {
                input_class: class("form-check-input"),
                label_class: class("form-label d-block"),
                ..Default::default()
            },
        )
        .field_config(
            "hidden",
            FieldConfig {
                use_container: Some(false),
                ..Default::default()
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_controls() {
        let settings = bootstrap5().settings("text", &FieldConfig::new());
        assert_eq!(settings.container_attributes.classes(), vec!["mb-3"]);
        assert_eq!(settings.input_attributes.classes(), vec!["form-control"]);
        assert_eq!(settings.label_attributes.classes(), vec!["form-label"]);
        assert_eq!(settings.input_invalid_class.as_deref(), Some("is-invalid"));
        assert!(settings.enrich_from_validation_rules);
    }

    #[test]
    fn test_checkbox_layout() {
        let settings = bootstrap5().settings("checkbox", &FieldConfig::new());
        assert_eq!(
            settings.container_attributes.classes(),
            vec!["mb-3", "form-check"]
        );
        assert_eq!(settings.input_attributes.classes(), vec!["form-check-input"]);
        assert_eq!(settings.template, "{input}\n{label}\n{hint}\n{error}");
        assert_eq!(settings.enclosed_by_label, Some(false));
    }

    #[test]
    fn test_name() {
        assert_eq!(bootstrap5().name(), "bootstrap5");
    }
}
