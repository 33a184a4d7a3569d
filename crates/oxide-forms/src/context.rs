//! Per-request render context.

use std::cell::Cell;
use std::sync::Arc;

use crate::error::Result;
use crate::field::Field;
use crate::input_data::InputData;
use crate::model::FormModel;
use crate::theme::{Theme, ThemeRegistry};
use crate::widgets::{InputWidget, WidgetKind};

/// Renders fields against a shared [`ThemeRegistry`].
///
/// Holds the theme selection and the sequence used to give inputs without
/// an id a unique one (`field-1`, `field-2`, ...). Create one per request
/// or render session; the registry itself is shared.
#[derive(Debug)]
pub struct RenderContext {
    registry: Arc<ThemeRegistry>,
    theme: Option<String>,
    next_id: Cell<usize>,
}

impl RenderContext {
    /// Creates a context rendering with the registry's default theme.
    pub fn new(registry: Arc<ThemeRegistry>) -> Self {
        Self {
            registry,
            theme: None,
            next_id: Cell::new(1),
        }
    }

    /// Renders with the named theme instead of the registry default.
    #[must_use]
    pub fn with_theme(mut self, name: impl Into<String>) -> Self {
        self.theme = Some(name.into());
        self
    }

    /// The shared theme registry.
    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// The theme fields of this context render with.
    pub fn theme(&self) -> Result<Arc<Theme>> {
        self.registry.get(self.theme.as_deref())
    }

    /// Returns the next generated element id.
    pub fn next_id(&self) -> String {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        format!("field-{id}")
    }

    /// Restarts the generated id sequence.
    pub fn reset_ids(&self) {
        self.next_id.set(1);
    }

    /// Creates a field for a widget type identifier (`"text"`,
    /// `"checkboxList"`, ...) with default widget options.
    ///
    /// Unknown identifiers are [`crate::FormError::UnknownWidget`].
    pub fn field(&self, kind: &str, data: InputData) -> Result<Field> {
        let kind: WidgetKind = kind.parse()?;
        self.boxed_field(kind.build(data))
    }

    /// Creates a field for a configured widget.
    pub fn field_for(&self, widget: impl InputWidget + 'static) -> Result<Field> {
        self.boxed_field(Box::new(widget))
    }

    /// Creates a field for a widget type and a model attribute path.
    pub fn model_field(&self, kind: &str, model: &dyn FormModel, path: &str) -> Result<Field> {
        self.field(kind, InputData::from_model(model, path)?)
    }

    fn boxed_field(&self, mut widget: Box<dyn InputWidget>) -> Result<Field> {
        let structural = matches!(
            widget.kind(),
            WidgetKind::Button | WidgetKind::ButtonGroup | WidgetKind::Fieldset | WidgetKind::Form
        );
        if !structural
            && widget.base().effective_id().is_none()
            && widget.base().data().accepts_generated_id()
        {
            let base = widget.base_mut();
            base.data = std::mem::take(&mut base.data).id(self.next_id());
        }
        Ok(Field::from_boxed(self.theme()?, widget))
    }
}
