//! Field composition: label, input, hint and error under a theme.
//!
//! A [`Field`] binds a theme, an input widget and call-site overrides for a
//! single render. Rendering resolves the field settings, decorates a copy of
//! the widget with the theme's input attributes, renders the four parts,
//! substitutes them into the template and wraps the result in the
//! container.

use std::sync::Arc;

use tracing::trace;

use crate::error::Result;
use crate::tag::{Attributes, Tag};
use crate::template::{Template, TemplateParts};
use crate::theme::{FieldConfig, FieldSettings, Theme};
use crate::validation::RuleSet;
use crate::widgets::{Error, GlobalAttributes, Hint, InputWidget, Label, WidgetKind};

/// One composed render unit.
#[derive(Debug, Clone)]
pub struct Field {
    theme: Arc<Theme>,
    widget: Box<dyn InputWidget>,
    config: FieldConfig,
    label: Option<String>,
    hint: Option<String>,
    error: Option<String>,
    rule_attributes: Attributes,
}

impl Field {
    /// Binds `widget` to `theme`.
    pub fn new(theme: Arc<Theme>, widget: impl InputWidget + 'static) -> Self {
        Self::from_boxed(theme, Box::new(widget))
    }

    /// Like [`Field::new`] for an already boxed widget.
    pub fn from_boxed(theme: Arc<Theme>, widget: Box<dyn InputWidget>) -> Self {
        Self {
            theme,
            widget,
            config: FieldConfig::new(),
            label: None,
            hint: None,
            error: None,
            rule_attributes: Attributes::new(),
        }
    }

    /// The widget as configured, without theme decoration.
    pub fn widget(&self) -> &dyn InputWidget {
        self.widget.as_ref()
    }

    /// The theme this field renders with.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Layers call-site options over the theme for this field.
    #[must_use]
    pub fn config(mut self, config: &FieldConfig) -> Self {
        self.config.merge(config);
        self
    }

    /// Overrides the `{label}{input}{hint}{error}` template.
    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.config.template = Some(template.into());
        self
    }

    /// Turns the container element on or off.
    #[must_use]
    pub fn use_container(mut self, use_container: bool) -> Self {
        self.config.use_container = Some(use_container);
        self
    }

    /// Sets the container element name.
    #[must_use]
    pub fn container_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.container_tag = Some(tag.into());
        self
    }

    /// Adds container classes.
    #[must_use]
    pub fn container_class(self, class: &str) -> Self {
        self.config(&FieldConfig {
            container_class: Some(class.to_string()),
            ..Default::default()
        })
    }

    /// Merges container attributes over the theme's.
    #[must_use]
    pub fn container_attributes(self, attributes: Attributes) -> Self {
        self.config(&FieldConfig {
            container_attributes: Some(attributes),
            ..Default::default()
        })
    }

    /// Adds input classes.
    #[must_use]
    pub fn input_class(self, class: &str) -> Self {
        self.config(&FieldConfig {
            input_class: Some(class.to_string()),
            ..Default::default()
        })
    }

    /// Adds label classes.
    #[must_use]
    pub fn label_class(self, class: &str) -> Self {
        self.config(&FieldConfig {
            label_class: Some(class.to_string()),
            ..Default::default()
        })
    }

    /// Adds hint classes.
    #[must_use]
    pub fn hint_class(self, class: &str) -> Self {
        self.config(&FieldConfig {
            hint_class: Some(class.to_string()),
            ..Default::default()
        })
    }

    /// Adds error classes.
    #[must_use]
    pub fn error_class(self, class: &str) -> Self {
        self.config(&FieldConfig {
            error_class: Some(class.to_string()),
            ..Default::default()
        })
    }

    /// Overrides the label text of the input data.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Overrides the hint text of the input data.
    #[must_use]
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Overrides the error message of the input data.
    #[must_use]
    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Takes client-side validation attributes from the rules of `path`.
    /// They are applied when the theme enables `enrichFromValidationRules`.
    #[must_use]
    pub fn validation_rules(mut self, rules: &RuleSet, path: &str) -> Self {
        self.rule_attributes = rules.html_attributes(path);
        self
    }

    /// Resolves the settings of this field.
    pub fn settings(&self) -> FieldSettings {
        self.theme
            .settings(self.widget.kind().as_str(), &self.config)
    }

    /// A copy of the widget carrying the theme's input decoration.
    ///
    /// List widgets take the decoration on their item inputs; their own
    /// attributes stay on the list container.
    fn prepared_widget(&self, settings: &FieldSettings) -> Box<dyn InputWidget> {
        let mut widget = self.widget.box_clone();
        let base = widget.base_mut();
        if !settings.set_input_id {
            base.data = std::mem::take(&mut base.data).without_id();
        }
        if let Some(label) = &self.label {
            base.data = std::mem::take(&mut base.data).label(label.as_str());
        }
        if !settings.use_placeholder {
            base.use_placeholder = false;
        }
        if let Some(enclosed) = settings.enclosed_by_label {
            base.enclosed_by_label = enclosed;
        }
        let valid = base.data.is_valid();

        let mut attrs = Attributes::new();
        let is_list = widget.items_attributes_mut().is_some();
        if settings.enrich_from_validation_rules && !is_list {
            attrs.merge(&self.rule_attributes);
        }
        attrs.merge(&settings.input_attributes);
        let state_class = if valid {
            &settings.input_valid_class
        } else {
            &settings.input_invalid_class
        };
        if let Some(class) = state_class {
            attrs.add_class(class);
        }

        if let Some(items) = widget.items_attributes_mut() {
            attrs.merge(items);
            *items = attrs;
        } else {
            let base = widget.base_mut();
            attrs.merge(&base.attributes);
            base.attributes = attrs;
        }
        widget
    }

    fn parts(
        &self,
        settings: &FieldSettings,
        widget: &dyn InputWidget,
        input: String,
    ) -> Result<TemplateParts> {
        let data = widget.base().data();

        // Self-labelled widgets and fieldsets (through their legend) carry
        // the label already.
        let label = if widget.owns_label() || widget.kind() == WidgetKind::Fieldset {
            String::new()
        } else {
            let text = data.get_label().unwrap_or_default();
            let mut label = Label::new(text)
                .tag(settings.label_tag.as_str())
                .attributes(&settings.label_attributes);
            let points_at_input = !matches!(
                widget.kind(),
                WidgetKind::CheckboxList
                    | WidgetKind::RadioList
                    | WidgetKind::ButtonGroup
                    | WidgetKind::Fieldset
                    | WidgetKind::Form
            );
            if let Some(id) = widget.base().effective_id().filter(|_| points_at_input) {
                label = label.for_id(id);
            }
            label.render()?
        };

        let hint = self
            .hint
            .as_deref()
            .map_or_else(|| Hint::for_data(data), Hint::new)
            .tag(settings.hint_tag.as_str())
            .attributes(&settings.hint_attributes)
            .render()?;

        let error = self
            .error
            .as_deref()
            .map_or_else(|| Error::for_data(data), Error::new)
            .tag(settings.error_tag.as_str())
            .attributes(&settings.error_attributes)
            .render()?;

        Ok(TemplateParts {
            label,
            input,
            hint,
            error,
        })
    }

    fn container(&self, settings: &FieldSettings, valid: bool) -> Tag {
        let mut attrs = settings.container_attributes.clone();
        let state_class = if valid {
            &settings.valid_class
        } else {
            &settings.invalid_class
        };
        if let Some(class) = state_class {
            attrs.add_class(class);
        }
        Tag::new(settings.container_tag.as_str()).attributes(&attrs)
    }

    /// Renders the complete field.
    pub fn render(&self) -> Result<String> {
        let settings = self.settings();
        let widget = self.prepared_widget(&settings);
        trace!(
            kind = %widget.kind(),
            theme = self.theme.name(),
            template = settings.template.as_str(),
            "composing field"
        );

        if widget.kind() == WidgetKind::Hidden {
            return widget.render();
        }

        let input = widget.render()?;
        let parts = self.parts(&settings, widget.as_ref(), input)?;
        let content = Template::parse(&settings.template).render(&parts);

        if !settings.use_container {
            return Ok(content);
        }
        let container = self.container(&settings, widget.base().data().is_valid());
        Ok(format!(
            "{}\n{}\n{}",
            container.open()?,
            content,
            container.close()
        ))
    }

    /// Renders the opening half of a wrapping widget (`Fieldset`, `Form`)
    /// through the `templateBegin` template.
    pub fn begin(&self) -> Result<String> {
        let settings = self.settings();
        let widget = self.prepared_widget(&settings);
        let input = widget.begin()?;
        let parts = self.parts(&settings, widget.as_ref(), input)?;
        let content = Template::parse(&settings.template_begin).render(&parts);

        if !settings.use_container {
            return Ok(content);
        }
        let container = self.container(&settings, widget.base().data().is_valid());
        Ok(format!("{}\n{}", container.open()?, content))
    }

    /// Renders the closing half through the `templateEnd` template.
    pub fn end(&self) -> Result<String> {
        let settings = self.settings();
        let widget = self.prepared_widget(&settings);
        let input = widget.end()?;
        let parts = self.parts(&settings, widget.as_ref(), input)?;
        let content = Template::parse(&settings.template_end).render(&parts);

        if !settings.use_container {
            return Ok(content);
        }
        let container = self.container(&settings, widget.base().data().is_valid());
        // Validates the container tag name like `begin` does.
        container.open()?;
        Ok(format!("{}\n{}", content, container.close()))
    }
}
