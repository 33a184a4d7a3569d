//! Themes: named bundles of tags, classes and templates for fields.
//!
//! A theme holds one global [`FieldConfig`] plus per widget type overrides.
//! Resolving a field's settings layers, from weakest to strongest, the
//! global config, the widget type's config and the call-site config. Later
//! layers win for every scalar option and attribute; CSS classes are joined
//! across all layers instead.

mod bootstrap;
mod registry;

pub use registry::{RegistryConfig, ThemeRegistry};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::tag::Attributes;

/// The template used when no layer provides one.
pub const DEFAULT_TEMPLATE: &str = "{label}\n{input}\n{hint}\n{error}";

/// One layer of field configuration. Unset options defer to weaker layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfig {
    pub container_tag: Option<String>,
    pub container_attributes: Option<Attributes>,
    pub container_class: Option<String>,
    pub input_attributes: Option<Attributes>,
    pub input_class: Option<String>,
    pub label_tag: Option<String>,
    pub label_attributes: Option<Attributes>,
    pub label_class: Option<String>,
    pub hint_tag: Option<String>,
    pub hint_attributes: Option<Attributes>,
    pub hint_class: Option<String>,
    pub error_tag: Option<String>,
    pub error_attributes: Option<Attributes>,
    pub error_class: Option<String>,
    /// Added to the container when there are no validation errors.
    pub valid_class: Option<String>,
    /// Added to the container when there are validation errors.
    pub invalid_class: Option<String>,
    pub input_valid_class: Option<String>,
    pub input_invalid_class: Option<String>,
    pub template: Option<String>,
    pub template_begin: Option<String>,
    pub template_end: Option<String>,
    pub use_container: Option<bool>,
    pub set_input_id: Option<bool>,
    pub use_placeholder: Option<bool>,
    pub enrich_from_validation_rules: Option<bool>,
    /// Whether checkbox and radio inputs render inside their own label.
    pub enclosed_by_label: Option<bool>,
}

fn override_with<T: Clone>(slot: &mut Option<T>, over: &Option<T>) {
    if over.is_some() {
        slot.clone_from(over);
    }
}

fn join_classes(slot: &mut Option<String>, over: &Option<String>) {
    let Some(over) = over else { return };
    let mut attrs = Attributes::new();
    if let Some(current) = slot.as_deref() {
        attrs.add_class(current);
    }
    attrs.add_class(over);
    *slot = Some(attrs.classes().join(" "));
}

fn merge_attributes(slot: &mut Option<Attributes>, over: &Option<Attributes>) {
    let Some(over) = over else { return };
    match slot {
        Some(current) => current.merge(over),
        None => *slot = Some(over.clone()),
    }
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers `over` on top of `self`.
    pub fn merge(&mut self, over: &Self) {
        override_with(&mut self.container_tag, &over.container_tag);
        merge_attributes(&mut self.container_attributes, &over.container_attributes);
        join_classes(&mut self.container_class, &over.container_class);
        merge_attributes(&mut self.input_attributes, &over.input_attributes);
        join_classes(&mut self.input_class, &over.input_class);
        override_with(&mut self.label_tag, &over.label_tag);
        merge_attributes(&mut self.label_attributes, &over.label_attributes);
        join_classes(&mut self.label_class, &over.label_class);
        override_with(&mut self.hint_tag, &over.hint_tag);
        merge_attributes(&mut self.hint_attributes, &over.hint_attributes);
        join_classes(&mut self.hint_class, &over.hint_class);
        override_with(&mut self.error_tag, &over.error_tag);
        merge_attributes(&mut self.error_attributes, &over.error_attributes);
        join_classes(&mut self.error_class, &over.error_class);
        join_classes(&mut self.valid_class, &over.valid_class);
        join_classes(&mut self.invalid_class, &over.invalid_class);
        join_classes(&mut self.input_valid_class, &over.input_valid_class);
        join_classes(&mut self.input_invalid_class, &over.input_invalid_class);
        override_with(&mut self.template, &over.template);
        override_with(&mut self.template_begin, &over.template_begin);
        override_with(&mut self.template_end, &over.template_end);
        override_with(&mut self.use_container, &over.use_container);
        override_with(&mut self.set_input_id, &over.set_input_id);
        override_with(&mut self.use_placeholder, &over.use_placeholder);
        override_with(
            &mut self.enrich_from_validation_rules,
            &over.enrich_from_validation_rules,
        );
        override_with(&mut self.enclosed_by_label, &over.enclosed_by_label);
    }

    /// Returns `self` with `over` layered on top.
    #[must_use]
    pub fn merged(&self, over: &Self) -> Self {
        let mut merged = self.clone();
        merged.merge(over);
        merged
    }

    /// Fills in defaults for everything no layer has set.
    pub fn resolve(&self) -> FieldSettings {
        fn attrs(base: &Option<Attributes>, class: &Option<String>) -> Attributes {
            let mut attrs = base.clone().unwrap_or_default();
            if let Some(class) = class {
                attrs.add_class(class);
            }
            attrs
        }

        FieldSettings {
            container_tag: self.container_tag.clone().unwrap_or_else(|| "div".to_string()),
            container_attributes: attrs(&self.container_attributes, &self.container_class),
            input_attributes: attrs(&self.input_attributes, &self.input_class),
            label_tag: self.label_tag.clone().unwrap_or_else(|| "label".to_string()),
            label_attributes: attrs(&self.label_attributes, &self.label_class),
            hint_tag: self.hint_tag.clone().unwrap_or_else(|| "div".to_string()),
            hint_attributes: attrs(&self.hint_attributes, &self.hint_class),
            error_tag: self.error_tag.clone().unwrap_or_else(|| "div".to_string()),
            error_attributes: attrs(&self.error_attributes, &self.error_class),
            valid_class: self.valid_class.clone(),
            invalid_class: self.invalid_class.clone(),
            input_valid_class: self.input_valid_class.clone(),
            input_invalid_class: self.input_invalid_class.clone(),
            template: self
                .template
                .clone()
                .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
            template_begin: self
                .template_begin
                .clone()
                .unwrap_or_else(|| "{label}\n{input}".to_string()),
            template_end: self
                .template_end
                .clone()
                .unwrap_or_else(|| "{input}\n{hint}\n{error}".to_string()),
            use_container: self.use_container.unwrap_or(true),
            set_input_id: self.set_input_id.unwrap_or(true),
            use_placeholder: self.use_placeholder.unwrap_or(true),
            enrich_from_validation_rules: self.enrich_from_validation_rules.unwrap_or(false),
            enclosed_by_label: self.enclosed_by_label,
        }
    }
}

/// Fully resolved settings of one field render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSettings {
    pub container_tag: String,
    pub container_attributes: Attributes,
    pub input_attributes: Attributes,
    /// An empty tag renders the label text bare.
    pub label_tag: String,
    pub label_attributes: Attributes,
    pub hint_tag: String,
    pub hint_attributes: Attributes,
    pub error_tag: String,
    pub error_attributes: Attributes,
    pub valid_class: Option<String>,
    pub invalid_class: Option<String>,
    pub input_valid_class: Option<String>,
    pub input_invalid_class: Option<String>,
    pub template: String,
    pub template_begin: String,
    pub template_end: String,
    pub use_container: bool,
    pub set_input_id: bool,
    pub use_placeholder: bool,
    pub enrich_from_validation_rules: bool,
    pub enclosed_by_label: Option<bool>,
}

/// A named, immutable configuration bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(skip)]
    name: String,
    #[serde(flatten)]
    global: FieldConfig,
    #[serde(default)]
    field_configs: IndexMap<String, FieldConfig>,
}

impl Theme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The theme with no configuration at all.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// The built-in Bootstrap 5 theme.
    pub fn bootstrap5() -> Self {
        bootstrap::bootstrap5()
    }

    /// Sets the configuration applied to every widget type.
    #[must_use]
    pub fn global(mut self, config: FieldConfig) -> Self {
        self.global = config;
        self
    }

    /// Sets the override of one widget type (`"text"`, `"checkboxList"`, ...).
    #[must_use]
    pub fn field_config(mut self, kind: impl Into<String>, config: FieldConfig) -> Self {
        self.field_configs.insert(kind.into(), config);
        self
    }

    /// The registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Options applied to every widget type.
    pub fn global_config(&self) -> &FieldConfig {
        &self.global
    }

    /// Options of one widget type, if configured.
    pub fn config_for(&self, kind: &str) -> Option<&FieldConfig> {
        self.field_configs.get(kind)
    }

    /// Resolves the settings of a widget type under call-site overrides.
    pub fn settings(&self, kind: &str, call_site: &FieldConfig) -> FieldSettings {
        let mut config = self.global.clone();
        if let Some(per_type) = self.field_configs.get(kind) {
            config.merge(per_type);
        }
        config.merge(call_site);
        config.resolve()
    }
}
