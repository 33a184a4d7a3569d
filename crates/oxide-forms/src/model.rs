//! Form models and dotted attribute path resolution.
//!
//! A form model answers, per attribute name, its current value and display
//! metadata. Nested models are reached with dotted paths such as
//! `address.pageData.source_ids`: every segment but the last must name a
//! nested model, and the last segment is looked up on the deepest model.

use tracing::trace;

use crate::error::{FormError, Result, ValidationErrors};
use crate::typecast::ScalarType;
use crate::validation::RuleSet;
use crate::value::Value;

/// The capability interface every form model implements.
///
/// Implement it by hand or with `#[derive(FormModel)]`. Lookups are keyed
/// by a single attribute name; path handling lives in the free functions of
/// this module.
pub trait FormModel {
    /// Name used as the default form scope (`TextForm` → `TextForm[job]`).
    fn form_name(&self) -> &str;

    /// Returns whether the model declares `name` (leaf or nested model).
    fn has_attribute(&self, name: &str) -> bool;

    /// Returns the current value of a leaf attribute.
    fn attribute_value(&self, name: &str) -> Option<Value>;

    /// Assigns an already coerced value to a leaf attribute.
    fn set_attribute_value(&mut self, name: &str, value: Value) -> Result<()>;

    /// Declared type used when loading raw data.
    fn attribute_type(&self, _name: &str) -> ScalarType {
        ScalarType::Untyped
    }

    fn attribute_label(&self, _name: &str) -> Option<String> {
        None
    }

    fn attribute_hint(&self, _name: &str) -> Option<String> {
        None
    }

    fn attribute_placeholder(&self, _name: &str) -> Option<String> {
        None
    }

    /// Whether inputs for `name` get an element id derived from their path.
    fn generates_input_id(&self, _name: &str) -> bool {
        true
    }

    /// Returns the nested model stored under `name`, if any.
    fn nested_model(&self, _name: &str) -> Option<&dyn FormModel> {
        None
    }

    fn nested_model_mut(&mut self, _name: &str) -> Option<&mut dyn FormModel> {
        None
    }

    /// Errors of the last validation run, keyed by attribute name.
    fn validation_errors(&self) -> Option<&ValidationErrors> {
        None
    }

    /// Replaces the stored validation errors.
    fn set_validation_errors(&mut self, _errors: ValidationErrors) {}
}

/// Everything known about one resolved attribute.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedAttribute {
    pub value: Value,
    pub label: String,
    pub hint: String,
    pub placeholder: String,
    pub errors: Vec<String>,
}

/// Splits a dotted path into its segments.
pub fn split_path(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() {
        return Err(FormError::invalid_config(
            "attribute path must not be empty when a model is given",
        ));
    }
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(FormError::invalid_config(format!(
            "attribute path \"{path}\" contains an empty segment"
        )));
    }
    Ok(segments)
}

/// Walks to the model owning the last segment and checks that it exists.
fn walk<'m, 'p>(
    model: &'m dyn FormModel,
    segments: &[&'p str],
) -> Result<(&'m dyn FormModel, &'p str)> {
    let Some((leaf, parents)) = segments.split_last() else {
        return Err(FormError::attribute_not_found(model.form_name(), ""));
    };
    let mut current = model;
    for segment in parents {
        current = current
            .nested_model(segment)
            .ok_or_else(|| FormError::attribute_not_found(current.form_name(), *segment))?;
    }
    if !current.has_attribute(leaf) {
        return Err(FormError::attribute_not_found(current.form_name(), *leaf));
    }
    Ok((current, *leaf))
}

fn walk_mut<'m, 'p>(
    model: &'m mut dyn FormModel,
    segments: &[&'p str],
) -> Result<(&'m mut dyn FormModel, &'p str)> {
    let Some((leaf, parents)) = segments.split_last() else {
        return Err(FormError::attribute_not_found(model.form_name(), ""));
    };
    let mut current = model;
    for segment in parents {
        let form_name = current.form_name().to_string();
        match current.nested_model_mut(segment) {
            Some(nested) => current = nested,
            None => return Err(FormError::attribute_not_found(&form_name, *segment)),
        }
    }
    if !current.has_attribute(leaf) {
        return Err(FormError::attribute_not_found(current.form_name(), *leaf));
    }
    Ok((current, *leaf))
}

/// Returns the nested model addressed by `path`; `""` is the model itself.
pub(crate) fn nested_at_mut<'m>(
    model: &'m mut dyn FormModel,
    path: &str,
) -> Result<&'m mut dyn FormModel> {
    let mut current = model;
    if path.is_empty() {
        return Ok(current);
    }
    for segment in split_path(path)? {
        let form_name = current.form_name().to_string();
        match current.nested_model_mut(segment) {
            Some(nested) => current = nested,
            None => return Err(FormError::attribute_not_found(&form_name, segment)),
        }
    }
    Ok(current)
}

/// Resolves value, label, hint, placeholder and errors of a dotted path.
///
/// Display fields the model does not provide resolve to `""`; a leaf the
/// model does not declare is [`FormError::AttributeNotFound`]. Errors come
/// from the deepest model only, keyed by the leaf segment.
pub fn resolve(model: &dyn FormModel, path: &str) -> Result<ResolvedAttribute> {
    let segments = split_path(path)?;
    let (owner, leaf) = walk(model, &segments)?;
    Ok(ResolvedAttribute {
        value: owner.attribute_value(leaf).unwrap_or_default(),
        label: owner.attribute_label(leaf).unwrap_or_default(),
        hint: owner.attribute_hint(leaf).unwrap_or_default(),
        placeholder: owner.attribute_placeholder(leaf).unwrap_or_default(),
        errors: errors_of(owner, leaf),
    })
}

fn errors_of(owner: &dyn FormModel, leaf: &str) -> Vec<String> {
    owner
        .validation_errors()
        .and_then(|e| e.get(leaf))
        .cloned()
        .unwrap_or_default()
}

/// Asks the model owning the leaf of `path` whether its input gets an id.
pub(crate) fn generates_input_id(model: &dyn FormModel, path: &str) -> Result<bool> {
    let (owner, leaf) = walk(model, &split_path(path)?)?;
    Ok(owner.generates_input_id(leaf))
}

/// Returns whether the dotted path exists on the model chain.
pub fn has_attribute_path(model: &dyn FormModel, path: &str) -> bool {
    split_path(path).is_ok_and(|segments| walk(model, &segments).is_ok())
}

/// Returns the value of a dotted path.
pub fn attribute_value(model: &dyn FormModel, path: &str) -> Result<Value> {
    attribute_value_at(model, &split_path(path)?)
}

/// Returns the value addressed by a list of segments.
///
/// `attribute_value_at(m, &["a", "b", "c"])` is equivalent to
/// `attribute_value(m, "a.b.c")`.
pub fn attribute_value_at(model: &dyn FormModel, segments: &[&str]) -> Result<Value> {
    let (owner, leaf) = walk(model, segments)?;
    Ok(owner.attribute_value(leaf).unwrap_or_default())
}

/// Returns the label of a dotted path, `""` when unset.
pub fn attribute_label(model: &dyn FormModel, path: &str) -> Result<String> {
    let (owner, leaf) = walk(model, &split_path(path)?)?;
    Ok(owner.attribute_label(leaf).unwrap_or_default())
}

/// Returns the hint of a dotted path, `""` when unset.
pub fn attribute_hint(model: &dyn FormModel, path: &str) -> Result<String> {
    let (owner, leaf) = walk(model, &split_path(path)?)?;
    Ok(owner.attribute_hint(leaf).unwrap_or_default())
}

/// Returns the placeholder of a dotted path, `""` when unset.
pub fn attribute_placeholder(model: &dyn FormModel, path: &str) -> Result<String> {
    let (owner, leaf) = walk(model, &split_path(path)?)?;
    Ok(owner.attribute_placeholder(leaf).unwrap_or_default())
}

/// Returns the validation errors stored for a dotted path.
pub fn attribute_errors(model: &dyn FormModel, path: &str) -> Result<Vec<String>> {
    let (owner, leaf) = walk(model, &split_path(path)?)?;
    Ok(errors_of(owner, leaf))
}

/// Casts `value` to the declared type of the leaf and assigns it.
pub fn set_attribute(model: &mut dyn FormModel, path: &str, value: Value) -> Result<()> {
    let segments = split_path(path)?;
    let (owner, leaf) = walk_mut(model, &segments)?;
    assign(owner, leaf, value)
}

/// Casts and assigns a value to an attribute known to exist on `owner`.
/// A nested model only takes an object, which `load` recurses into.
fn assign(owner: &mut dyn FormModel, leaf: &str, value: Value) -> Result<()> {
    if owner.nested_model(leaf).is_some() {
        return Err(FormError::TypeMismatch {
            attribute: leaf.to_string(),
            declared: "object",
            actual: value.kind().as_str(),
        });
    }
    let value = owner.attribute_type(leaf).cast(leaf, value)?;
    owner.set_attribute_value(leaf, value)
}

/// Populates a model from raw nested request data.
///
/// `scope` selects the sub-document: `None` uses the model's form name,
/// `Some("")` uses the whole document. Object values addressed to nested
/// models are loaded recursively; unknown keys are skipped. Returns whether
/// data for the scope was present.
pub fn load(
    model: &mut dyn FormModel,
    data: &serde_json::Value,
    scope: Option<&str>,
) -> Result<bool> {
    let scope = scope.map_or_else(|| model.form_name().to_string(), str::to_string);
    let scoped = if scope.is_empty() {
        Some(data)
    } else {
        data.get(&scope)
    };
    let Some(serde_json::Value::Object(map)) = scoped else {
        return Ok(false);
    };
    populate(model, map)?;
    Ok(true)
}

fn populate(
    model: &mut dyn FormModel,
    map: &serde_json::Map<String, serde_json::Value>,
) -> Result<()> {
    for (key, raw) in map {
        if let serde_json::Value::Object(inner) = raw {
            if let Some(nested) = model.nested_model_mut(key) {
                populate(nested, inner)?;
                continue;
            }
        }
        if !model.has_attribute(key) {
            trace!(form = model.form_name(), attribute = %key, "skipping unknown attribute");
            continue;
        }
        assign(model, key, Value::from(raw.clone()))?;
    }
    Ok(())
}

/// Path-aware convenience methods for concrete model types.
pub trait FormModelExt: FormModel + Sized {
    fn resolve(&self, path: &str) -> Result<ResolvedAttribute> {
        resolve(self, path)
    }

    fn has_attribute_path(&self, path: &str) -> bool {
        has_attribute_path(self, path)
    }

    fn get_attribute_value(&self, path: &str) -> Result<Value> {
        attribute_value(self, path)
    }

    fn get_attribute_value_at(&self, segments: &[&str]) -> Result<Value> {
        attribute_value_at(self, segments)
    }

    fn get_attribute_label(&self, path: &str) -> Result<String> {
        attribute_label(self, path)
    }

    fn get_attribute_hint(&self, path: &str) -> Result<String> {
        attribute_hint(self, path)
    }

    fn get_attribute_placeholder(&self, path: &str) -> Result<String> {
        attribute_placeholder(self, path)
    }

    fn get_attribute_errors(&self, path: &str) -> Result<Vec<String>> {
        attribute_errors(self, path)
    }

    fn set_attribute(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        set_attribute(self, path, value.into())
    }

    fn load(&mut self, data: &serde_json::Value, scope: Option<&str>) -> Result<bool> {
        load(self, data, scope)
    }

    /// Runs `rules` and stores the errors on the models they belong to.
    fn validate(&mut self, rules: &RuleSet) -> Result<bool> {
        rules.validate_and_store(self)
    }

    /// Returns whether the last validation run left no errors on this model.
    fn is_valid(&self) -> bool {
        self.validation_errors().map_or(true, ValidationErrors::is_empty)
    }
}

impl<T: FormModel> FormModelExt for T {}
