//! Checkbox and radio lists.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::{ensure_value, hidden_companion, InputBase, InputWidget, WidgetKind, SCALAR_OR_NULL};
use crate::error::{FormError, Result};
use crate::input_data::InputData;
use crate::tag::{html_escape, Attributes, Tag};
use crate::value::ValueKind;

/// One item as handed to an [`ItemFormatter`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceItem<'a> {
    pub index: usize,
    pub value: &'a str,
    pub label: &'a str,
    pub checked: bool,
    /// The `name` of the item input (`Form[tags][]` for checkbox lists).
    pub name: &'a str,
    pub attributes: Attributes,
}

/// Custom rendering of a single list item.
#[derive(Clone)]
pub struct ItemFormatter(Arc<dyn Fn(&ChoiceItem<'_>) -> String + Send + Sync>);

impl ItemFormatter {
    pub fn new(f: impl Fn(&ChoiceItem<'_>) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for ItemFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ItemFormatter")
    }
}

impl PartialEq for ItemFormatter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A list of checkboxes or radio buttons, one per item.
///
/// Checkbox lists take a list value and check every item it contains;
/// radio lists take a scalar and check the item equal to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceList {
    kind: WidgetKind,
    base: InputBase,
    items: Vec<(String, String)>,
    item_attributes: IndexMap<String, Attributes>,
    items_attributes: Attributes,
    container_tag: Option<String>,
    container_attributes: Attributes,
    separator: String,
    uncheck_value: Option<String>,
    encode_labels: bool,
    formatter: Option<ItemFormatter>,
}

input_widget_attributes!(ChoiceList);

impl ChoiceList {
    fn with_kind(kind: WidgetKind, data: InputData) -> Self {
        Self {
            kind,
            base: InputBase::new(data),
            items: Vec::new(),
            item_attributes: IndexMap::new(),
            items_attributes: Attributes::new(),
            container_tag: Some("div".to_string()),
            container_attributes: Attributes::new(),
            separator: "\n".to_string(),
            uncheck_value: None,
            encode_labels: true,
            formatter: None,
        }
    }

    /// A list of checkboxes submitting `name[]`.
    pub fn checkbox_list(data: InputData) -> Self {
        Self::with_kind(WidgetKind::CheckboxList, data)
    }

    /// A list of radio buttons sharing one name.
    pub fn radio_list(data: InputData) -> Self {
        Self::with_kind(WidgetKind::RadioList, data)
    }

    /// Sets the items as ordered `(value, label)` pairs.
    #[must_use]
    pub fn items<V, L>(mut self, items: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        self.items = items
            .into_iter()
            .map(|(value, label)| (value.into(), label.into()))
            .collect();
        self
    }

    /// Sets the items from labels; their positions are the values.
    #[must_use]
    pub fn items_from_labels<L: Into<String>>(self, labels: impl IntoIterator<Item = L>) -> Self {
        self.items(
            labels
                .into_iter()
                .enumerate()
                .map(|(index, label)| (index.to_string(), label.into())),
        )
    }

    /// Attributes of the item with the given value, over `items_attributes`.
    #[must_use]
    pub fn item_attributes(mut self, value: impl Into<String>, attributes: Attributes) -> Self {
        self.item_attributes.insert(value.into(), attributes);
        self
    }

    /// Attributes shared by every item input.
    #[must_use]
    pub fn items_attributes(mut self, attributes: Attributes) -> Self {
        self.items_attributes = attributes;
        self
    }

    /// Sets the element wrapping the items.
    #[must_use]
    pub fn container_tag(mut self, tag: impl Into<String>) -> Self {
        self.container_tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn container_attributes(mut self, attributes: Attributes) -> Self {
        self.container_attributes = attributes;
        self
    }

    /// Renders the items without a wrapping container.
    #[must_use]
    pub fn without_container(mut self) -> Self {
        self.container_tag = None;
        self
    }

    /// Sets the text between items; a newline by default.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the value of the hidden input submitted when nothing is checked.
    #[must_use]
    pub fn uncheck_value(mut self, value: Option<&str>) -> Self {
        self.uncheck_value = value.map(String::from);
        self
    }

    #[must_use]
    pub fn encode_labels(mut self, encode: bool) -> Self {
        self.encode_labels = encode;
        self
    }

    /// Renders each item with `formatter` instead of the default markup.
    #[must_use]
    pub fn formatter(mut self, formatter: ItemFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    fn item_name(&self) -> String {
        let name = self.base.data.get_name();
        match self.kind {
            WidgetKind::CheckboxList if !name.is_empty() => format!("{name}[]"),
            _ => name.to_string(),
        }
    }

    fn render_item(&self, item: &ChoiceItem<'_>) -> Result<String> {
        if let Some(formatter) = &self.formatter {
            return Ok((formatter.0)(item));
        }
        let input_type = match self.kind {
            WidgetKind::RadioList => "radio",
            _ => "checkbox",
        };
        let mut input = Tag::input(input_type);
        if !item.name.is_empty() {
            input = input.attr("name", item.name);
        }
        let input = input
            .attr("value", item.value)
            .attr("checked", item.checked)
            .attributes(&item.attributes)
            .render()?;
        let label = if self.encode_labels {
            html_escape(item.label)
        } else {
            item.label.to_string()
        };
        Tag::new("label").html(&input).html(" ").html(&label).render()
    }
}

impl InputWidget for ChoiceList {
    fn kind(&self) -> WidgetKind {
        self.kind
    }

    fn base(&self) -> &InputBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InputBase {
        &mut self.base
    }

    fn items_attributes_mut(&mut self) -> Option<&mut Attributes> {
        Some(&mut self.items_attributes)
    }

    fn render(&self) -> Result<String> {
        let value = self.base.data.get_value();
        match self.kind {
            WidgetKind::CheckboxList => {
                ensure_value("CheckboxList", value, &[ValueKind::Array, ValueKind::Null])?;
            }
            _ => ensure_value("RadioList", value, SCALAR_OR_NULL)?,
        }

        let name = self.item_name();
        let mut items = Vec::with_capacity(self.items.len());
        for (index, (item_value, label)) in self.items.iter().enumerate() {
            let mut attributes = self.items_attributes.clone();
            if let Some(over) = self.item_attributes.get(item_value) {
                attributes.merge(over);
            }
            let item = ChoiceItem {
                index,
                value: item_value,
                label,
                checked: value.matches(item_value),
                name: &name,
                attributes,
            };
            items.push(self.render_item(&item)?);
        }
        let items = items.join(&self.separator);

        let mut html = String::new();
        if let Some(uncheck) = &self.uncheck_value {
            html.push_str(&hidden_companion(self.base.data.get_name(), uncheck)?);
            html.push('\n');
        }

        match &self.container_tag {
            None => html.push_str(&items),
            Some(tag) if tag.is_empty() => {
                return Err(FormError::invalid_config(
                    "choice list container tag must not be empty",
                ));
            }
            Some(tag) => {
                // The list container carries the id; the item inputs do not.
                let mut attrs = Attributes::new();
                if let Some(id) = self.base.data.get_id() {
                    attrs.set("id", id);
                }
                attrs.merge(&self.base.attributes);
                attrs.merge(&self.container_attributes);
                let container = Tag::new(tag.as_str()).attributes(&attrs);
                html.push_str(&container.open()?);
                if !items.is_empty() {
                    html.push('\n');
                    html.push_str(&items);
                }
                html.push('\n');
                html.push_str(&container.close());
            }
        }
        Ok(html)
    }

    fn box_clone(&self) -> Box<dyn InputWidget> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn sex(value: impl Into<Value>) -> InputData {
        InputData::new()
            .name("Profile[sex]")
            .id("profile-sex")
            .value(value)
    }

    #[test]
    fn test_checkbox_list_membership() {
        let html = ChoiceList::checkbox_list(sex(vec![1]))
            .items_from_labels(["Female", "Male"])
            .render()
            .unwrap();
        assert_eq!(
            html,
            concat!(
                "<div id=\"profile-sex\">\n",
                r#"<label><input type="checkbox" name="Profile[sex][]" value="0"> Female</label>"#,
                "\n",
                r#"<label><input type="checkbox" name="Profile[sex][]" value="1" checked> Male</label>"#,
                "\n</div>"
            )
        );
    }

    #[test]
    fn test_radio_list_equality() {
        let html = ChoiceList::radio_list(sex("m"))
            .items([("f", "Female"), ("m", "Male")])
            .without_container()
            .separator("<br>")
            .render()
            .unwrap();
        assert_eq!(
            html,
            concat!(
                r#"<label><input type="radio" name="Profile[sex]" value="f"> Female</label><br>"#,
                r#"<label><input type="radio" name="Profile[sex]" value="m" checked> Male</label>"#
            )
        );
    }

    #[test]
    fn test_item_attributes() {
        let html = ChoiceList::radio_list(sex(Value::Null))
            .items([("f", "Female"), ("m", "Male")])
            .items_attributes(Attributes::new().with("class", "choice"))
            .item_attributes("m", Attributes::new().with("disabled", true))
            .without_container()
            .render()
            .unwrap();
        assert!(html.contains(r#"class="choice" name="Profile[sex]" value="f">"#));
        assert!(html.contains(r#"class="choice" name="Profile[sex]" value="m" disabled>"#));
    }

    #[test]
    fn test_formatter_and_uncheck() {
        let html = ChoiceList::checkbox_list(sex(Value::Null))
            .items([("a", "A")])
            .uncheck_value(Some(""))
            .formatter(ItemFormatter::new(|item| {
                format!("[{}:{}:{}]", item.index, item.value, item.checked)
            }))
            .render()
            .unwrap();
        assert_eq!(
            html,
            "<input type=\"hidden\" name=\"Profile[sex]\" value>\n<div id=\"profile-sex\">\n[0:a:false]\n</div>"
        );
    }

    #[test]
    fn test_checkbox_list_rejects_scalar() {
        assert!(matches!(
            ChoiceList::checkbox_list(sex("x")).render(),
            Err(FormError::InvalidValueType { widget: "CheckboxList", .. })
        ));
    }
}
