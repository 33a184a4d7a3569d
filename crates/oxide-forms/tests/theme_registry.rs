//! Theme registry configuration and lookup.

use std::sync::Arc;
use std::thread;

use oxide_forms::{FieldConfig, FormError, InputData, RenderContext, Theme, ThemeRegistry};

const CONFIG: &str = r#"{
    "default": "compact",
    "themes": {
        "compact": {
            "containerClass": "row",
            "labelClass": "col-form-label",
            "inputAttributes": {"autocomplete": "off"},
            "fieldConfigs": {
                "text": {"inputClass": "form-control-sm"},
                "hidden": {"useContainer": false}
            }
        },
        "plain": {
            "useContainer": false,
            "template": "{label}{input}"
        }
    }
}"#;

fn registry() -> Arc<ThemeRegistry> {
    Arc::new(ThemeRegistry::from_json(CONFIG).unwrap())
}

#[test]
fn test_from_json() {
    let registry = registry();
    assert_eq!(registry.default_name(), Some("compact"));
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["compact", "plain"]);
    assert_eq!(registry.default_theme().name(), "compact");
    assert_eq!(
        registry.get(Some("plain")).unwrap().global_config().use_container,
        Some(false)
    );
}

#[test]
fn test_unknown_theme() {
    assert!(matches!(
        registry().get(Some("missing-theme")),
        Err(FormError::ThemeNotFound(ref name)) if name == "missing-theme"
    ));
}

#[test]
fn test_unknown_default() {
    let err = ThemeRegistry::from_json(r#"{"default": "nope", "themes": {}}"#).unwrap_err();
    assert!(matches!(err, FormError::ThemeNotFound(ref name) if name == "nope"));
}

#[test]
fn test_malformed_config() {
    assert!(matches!(
        ThemeRegistry::from_json(r#"{"themes": {"a": {"useContainer": "yes"}}}"#),
        Err(FormError::Config(_))
    ));
}

#[test]
fn test_empty_registry_uses_neutral_theme() {
    let registry = ThemeRegistry::new();
    let theme = registry.get(None).unwrap();
    assert_eq!(*theme, Theme::neutral());
    assert_eq!(registry.get(Some("")).unwrap().name(), "");
}

#[test]
fn test_reinitialize_replaces_themes() {
    let mut registry = ThemeRegistry::from_json(CONFIG).unwrap();
    registry
        .reinitialize([Theme::new("dense")], Some("dense"))
        .unwrap();
    assert!(registry.contains("dense"));
    assert!(!registry.contains("compact"));
    assert_eq!(registry.default_name(), Some("dense"));
}

#[test]
fn test_layered_configuration() {
    let ctx = RenderContext::new(registry());
    let html = ctx
        .field("text", InputData::new().name("q").id("q").label("Search"))
        .unwrap()
        .config(&FieldConfig {
            container_class: Some("g-2".to_string()),
            ..Default::default()
        })
        .render()
        .unwrap();
    assert_eq!(
        html,
        [
            r#"<div class="row g-2">"#,
            r#"<label class="col-form-label" for="q">Search</label>"#,
            r#"<input type="text" id="q" class="form-control-sm" name="q" autocomplete="off">"#,
            "</div>",
        ]
        .join("\n")
    );
}

#[test]
fn test_named_theme_per_context() {
    let ctx = RenderContext::new(registry()).with_theme("plain");
    let html = ctx
        .field("text", InputData::new().name("q").id("q").label("Search"))
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(
        html,
        r#"<label for="q">Search</label><input type="text" id="q" name="q">"#
    );
}

#[test]
fn test_shared_across_threads() {
    let registry = registry();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let ctx = RenderContext::new(registry);
                ctx.field("text", InputData::new().name(format!("f{i}")))
                    .and_then(|field| field.render())
            })
        })
        .collect();

    for handle in handles {
        let html = handle.join().unwrap().unwrap();
        assert!(html.starts_with(r#"<div class="row">"#));
        assert!(html.contains(r#"id="field-1""#));
    }
}
