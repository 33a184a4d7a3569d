//! # oxide-forms
//!
//! Model-driven HTML form fields with themeable layouts.
//!
//! This crate provides:
//! - Form models addressed by dotted attribute paths (`address.city`)
//! - Input widgets for every common form control
//! - Themes describing container, label, hint and error markup, with a
//!   built-in Bootstrap 5 preset
//! - A field composer that wraps a widget in its theme's layout
//! - Validation rules that feed errors back into rendered fields
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use oxide_forms::{FormModel, RenderContext, ThemeRegistry, ValidationErrors};
//!
//! #[derive(Debug, Default, FormModel)]
//! struct TextForm {
//!     #[form(hint = "What you do.")]
//!     job: String,
//!     #[form(errors)]
//!     errors: ValidationErrors,
//! }
//!
//! let ctx = RenderContext::new(Arc::new(ThemeRegistry::new()));
//! let html = ctx.model_field("text", &TextForm::default(), "job")?.render()?;
//! assert_eq!(
//!     html,
//!     "<div>\n\
//!      <label for=\"textform-job\">Job</label>\n\
//!      <input type=\"text\" id=\"textform-job\" name=\"TextForm[job]\" value>\n\
//!      <div>What you do.</div>\n\
//!      </div>"
//! );
//! # Ok::<(), oxide_forms::FormError>(())
//! ```
//!
//! ## Pure Rendering
//!
//! Widgets render without a model from hand-built [`InputData`]:
//!
//! ```rust
//! use oxide_forms::widgets::{InputWidget, Select};
//! use oxide_forms::InputData;
//!
//! let select = Select::new(InputData::new().name("size").value("m"))
//!     .options([("s", "Small"), ("m", "Medium")]);
//! assert_eq!(
//!     select.render()?,
//!     "<select name=\"size\">\n\
//!      <option value=\"s\">Small</option>\n\
//!      <option value=\"m\" selected>Medium</option>\n\
//!      </select>"
//! );
//! # Ok::<(), oxide_forms::FormError>(())
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use oxide_forms::validation::{RequiredValidator, RuleSet};
//! use oxide_forms::{FormModel, FormModelExt, ValidationErrors};
//!
//! #[derive(Debug, Default, FormModel)]
//! struct LoginForm {
//!     email: String,
//!     #[form(errors)]
//!     errors: ValidationErrors,
//! }
//!
//! let rules = RuleSet::new().rule("email", RequiredValidator::new());
//! let mut form = LoginForm::default();
//! assert!(!form.validate(&rules)?);
//! assert_eq!(form.get_attribute_errors("email")?.len(), 1);
//!
//! form.load(&serde_json::json!({"LoginForm": {"email": "ann@example.com"}}), None)?;
//! assert!(form.validate(&rules)?);
//! # Ok::<(), oxide_forms::FormError>(())
//! ```
//!
//! ## Themes
//!
//! Themes are plain data and can be loaded from JSON:
//!
//! ```rust
//! use oxide_forms::ThemeRegistry;
//!
//! let registry = ThemeRegistry::from_json(r#"{
//!     "default": "compact",
//!     "themes": {
//!         "compact": {
//!             "containerClass": "row",
//!             "fieldConfigs": {"hidden": {"useContainer": false}}
//!         }
//!     }
//! }"#)?;
//! assert_eq!(registry.default_name(), Some("compact"));
//! # Ok::<(), oxide_forms::FormError>(())
//! ```
//!
//! ## Widgets
//!
//! Available widgets, by factory identifier:
//! - `text`, `email`, `url`, `telephone`, `password`, `date`, `dateTime`,
//!   `dateTimeLocal` - [`widgets::TextInput`]
//! - `number`, `range` - [`widgets::Number`]
//! - `textarea`, `hidden`, `file`, `select`
//! - `checkbox`, `radio` - single choice inputs
//! - `checkboxList`, `radioList` - [`widgets::ChoiceList`]
//! - `button`, `buttonGroup`, `fieldset`, `form`

extern crate self as oxide_forms;

mod context;
mod error;
mod field;
pub mod input_data;
pub mod model;
pub mod tag;
mod template;
pub mod theme;
mod typecast;
pub mod validation;
mod value;
pub mod widgets;

pub use context::RenderContext;
pub use error::{FormError, Result, ValidationErrors};
pub use field::Field;
pub use input_data::InputData;
pub use model::{FormModel, FormModelExt, ResolvedAttribute};
pub use oxide_forms_derive::FormModel;
pub use tag::{html_escape, AttrValue, Attributes, Tag};
pub use theme::{FieldConfig, Theme, ThemeRegistry};
pub use typecast::ScalarType;
pub use value::{FromValue, Value, ValueKind};
