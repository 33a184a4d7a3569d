//! Drop-down selection.

use super::{ensure_value, hidden_companion, InputBase, InputWidget, WidgetKind, SCALAR_OR_NULL};
use crate::error::Result;
use crate::input_data::InputData;
use crate::tag::{AttrValue, Attributes, Tag};
use crate::value::{Value, ValueKind};

/// An `<option>` or an `<optgroup>` of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectItem {
    Option {
        value: String,
        label: String,
        attributes: Attributes,
    },
    Group {
        label: String,
        options: Vec<SelectItem>,
        attributes: Attributes,
    },
}

impl SelectItem {
    /// A single option.
    pub fn option(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Option {
            value: value.into(),
            label: label.into(),
            attributes: Attributes::new(),
        }
    }

    /// An `<optgroup>` of options.
    pub fn group(label: impl Into<String>, options: Vec<Self>) -> Self {
        Self::Group {
            label: label.into(),
            options,
            attributes: Attributes::new(),
        }
    }

    /// Sets the attributes of the `<option>` or `<optgroup>` tag.
    #[must_use]
    pub fn with_attributes(mut self, attrs: Attributes) -> Self {
        match &mut self {
            Self::Option { attributes, .. } | Self::Group { attributes, .. } => *attributes = attrs,
        }
        self
    }

    fn render(&self, value: &Value, lines: &mut Vec<String>) -> Result<()> {
        match self {
            Self::Option {
                value: option_value,
                label,
                attributes,
            } => {
                let option = Tag::new("option")
                    .attr("value", option_value.as_str())
                    .attr("selected", value.matches(option_value))
                    .attributes(attributes)
                    .text(label)
                    .render()?;
                lines.push(option);
            }
            Self::Group {
                label,
                options,
                attributes,
            } => {
                let group = Tag::new("optgroup")
                    .attr("label", label.as_str())
                    .attributes(attributes);
                lines.push(group.open()?);
                for option in options {
                    option.render(value, lines)?;
                }
                lines.push(group.close());
            }
        }
        Ok(())
    }
}

/// A `<select>` built from flat or grouped items.
///
/// In `multiple` mode the value must be a list (or null), the name gets a
/// `[]` suffix and a hidden input carrying the unselect value precedes the
/// select so that an empty selection still submits.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    base: InputBase,
    items: Vec<SelectItem>,
    prompt: Option<SelectItem>,
    multiple: bool,
    unselect_value: Option<String>,
}

input_widget_attributes!(Select);

impl Select {
    /// A select for `data` with no items.
    pub fn new(data: InputData) -> Self {
        Self {
            base: InputBase::new(data),
            items: Vec::new(),
            prompt: None,
            multiple: false,
            unselect_value: None,
        }
    }

    /// Sets the options and groups.
    #[must_use]
    pub fn items(mut self, items: Vec<SelectItem>) -> Self {
        self.items = items;
        self
    }

    /// Sets flat items from `(value, label)` pairs.
    #[must_use]
    pub fn options<V, L>(self, options: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        self.items(
            options
                .into_iter()
                .map(|(value, label)| SelectItem::option(value, label))
                .collect(),
        )
    }

    /// Adds a first option with an empty value.
    #[must_use]
    pub fn prompt(mut self, text: impl Into<String>) -> Self {
        self.prompt = Some(SelectItem::option("", text));
        self
    }

    /// Allows several selections; the name gets a `[]` suffix.
    #[must_use]
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.base.attributes.set("size", size);
        self
    }

    /// Sets the value of the hidden unselect input. Multiple selects always
    /// emit one, with the empty string by default.
    #[must_use]
    pub fn unselect_value(mut self, value: Option<&str>) -> Self {
        self.unselect_value = value.map(String::from);
        self
    }
}

impl InputWidget for Select {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Select
    }

    fn base(&self) -> &InputBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InputBase {
        &mut self.base
    }

    fn render(&self) -> Result<String> {
        let value = self.base.data.get_value();
        if self.multiple {
            ensure_value("Select", value, &[ValueKind::Array, ValueKind::Null])?;
        } else if !matches!(value, Value::List(_)) {
            ensure_value("Select", value, SCALAR_OR_NULL)?;
        }

        let name = self.base.data.get_name();
        let mut attrs = self.base.input_attributes();
        if self.multiple {
            attrs.set("multiple", true);
            if !name.is_empty() && attrs.get("name").and_then(AttrValue::as_str) == Some(name) {
                attrs.set("name", format!("{name}[]"));
            }
        }

        let mut lines = Vec::new();
        let unselect = match (&self.unselect_value, self.multiple) {
            (Some(value), _) => Some(value.as_str()),
            (None, true) => Some(""),
            (None, false) => None,
        };
        // Without a name there is nothing to submit.
        if let Some(unselect) = unselect.filter(|_| !name.is_empty()) {
            lines.push(hidden_companion(name, unselect)?);
        }

        let select = Tag::new("select").attributes(&attrs);
        lines.push(select.open()?);
        if let Some(prompt) = &self.prompt {
            prompt.render(&Value::Null, &mut lines)?;
        }
        for item in &self.items {
            item.render(value, &mut lines)?;
        }
        lines.push(select.close());
        Ok(lines.join("\n"))
    }

    fn box_clone(&self) -> Box<dyn InputWidget> {
        Box::new(self.clone())
    }
}
