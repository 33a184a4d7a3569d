//! Derive macro for form models.
//!
//! This crate provides `#[derive(FormModel)]`, which implements the
//! `oxide_forms::FormModel` trait for a struct with named fields by
//! generating one `match` arm per attribute.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, Meta, Type};

/// Derives `oxide_forms::FormModel` for a struct.
///
/// # Attributes
///
/// - `#[form(name = "ProfileForm")]` - Form name used as the default input
///   name scope (optional, defaults to the struct name)
///
/// # Field Attributes
///
/// - `#[form(name = "pageData")]` - Attribute name (optional, defaults to
///   the field name)
/// - `#[form(label = "...")]` - Label text (optional, defaults to the
///   humanized attribute name, `first_name` becomes `First Name`)
/// - `#[form(hint = "...")]` - Hint text
/// - `#[form(placeholder = "...")]` - Placeholder text
/// - `#[form(nested)]` - The field is itself a form model reachable with a
///   dotted path
/// - `#[form(errors)]` - The field stores the `ValidationErrors` of the
///   last validation run
/// - `#[form(skip)]` - The field is not a form attribute
/// - `#[form(no_id)]` - Inputs for the field get no generated element id
///
/// Leaf fields convert to `Value` with `Value::from` and back with
/// `FromValue`, whose `SCALAR_TYPE` is the declared attribute type.
#[proc_macro_derive(FormModel, attributes(form))]
pub fn derive_form_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_form_model_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// How a struct field takes part in the model.
#[derive(Clone, Copy, PartialEq, Eq)]
enum FieldRole {
    Leaf,
    Nested,
    Errors,
    Skip,
}

struct AttributeInfo {
    field_name: Ident,
    field_type: Type,
    attribute_name: String,
    role: FieldRole,
    label: Option<String>,
    hint: Option<String>,
    placeholder: Option<String>,
    no_id: bool,
}

fn derive_form_model_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let form_name = get_form_name(&input.attrs)?.unwrap_or_else(|| struct_name.to_string());

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "FormModel derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "FormModel derive only supports structs",
            ));
        }
    };

    let mut infos: Vec<AttributeInfo> = Vec::new();
    let mut errors_field: Option<Ident> = None;
    for field in fields {
        let Some(field_name) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.role == FieldRole::Errors {
            if errors_field.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "only one field can be marked #[form(errors)]",
                ));
            }
            errors_field = Some(field_name);
            continue;
        }
        if attrs.role == FieldRole::Skip {
            continue;
        }
        infos.push(AttributeInfo {
            attribute_name: attrs.name.unwrap_or_else(|| field_name.to_string()),
            field_name,
            field_type: field.ty.clone(),
            role: attrs.role,
            label: attrs.label,
            hint: attrs.hint,
            placeholder: attrs.placeholder,
            no_id: attrs.no_id,
        });
    }

    let leaves: Vec<&AttributeInfo> = infos.iter().filter(|i| i.role == FieldRole::Leaf).collect();
    let nested: Vec<&AttributeInfo> = infos
        .iter()
        .filter(|i| i.role == FieldRole::Nested)
        .collect();

    let all_names: Vec<&str> = infos.iter().map(|i| i.attribute_name.as_str()).collect();

    let value_arms = leaves.iter().map(|info| {
        let name = &info.attribute_name;
        let field = &info.field_name;
        quote! {
            #name => ::core::option::Option::Some(
                ::oxide_forms::Value::from(::core::clone::Clone::clone(&self.#field)),
            ),
        }
    });

    let set_arms = leaves.iter().map(|info| {
        let name = &info.attribute_name;
        let field = &info.field_name;
        let ty = &info.field_type;
        quote! {
            #name => {
                let actual = value.kind().as_str();
                self.#field = <#ty as ::oxide_forms::FromValue>::from_value(value).ok_or_else(|| {
                    ::oxide_forms::FormError::TypeMismatch {
                        attribute: ::std::string::String::from(#name),
                        declared: <#ty as ::oxide_forms::FromValue>::SCALAR_TYPE.as_str(),
                        actual,
                    }
                })?;
                ::core::result::Result::Ok(())
            }
        }
    });

    let nested_set_arms = nested.iter().map(|info| {
        let name = &info.attribute_name;
        quote! {
            #name => ::core::result::Result::Err(::oxide_forms::FormError::TypeMismatch {
                attribute: ::std::string::String::from(#name),
                declared: "object",
                actual: value.kind().as_str(),
            }),
        }
    });

    let type_arms = leaves.iter().map(|info| {
        let name = &info.attribute_name;
        let ty = &info.field_type;
        quote! {
            #name => <#ty as ::oxide_forms::FromValue>::SCALAR_TYPE,
        }
    });

    let labels: Vec<(&str, String)> = infos
        .iter()
        .filter_map(|info| match (&info.label, info.role) {
            (Some(label), _) => Some((info.attribute_name.as_str(), label.clone())),
            (None, FieldRole::Leaf) => {
                Some((info.attribute_name.as_str(), humanize(&info.attribute_name)))
            }
            (None, _) => None,
        })
        .collect();
    let hints: Vec<(&str, String)> = infos
        .iter()
        .filter_map(|i| i.hint.clone().map(|h| (i.attribute_name.as_str(), h)))
        .collect();
    let placeholders: Vec<(&str, String)> = infos
        .iter()
        .filter_map(|i| i.placeholder.clone().map(|p| (i.attribute_name.as_str(), p)))
        .collect();

    let without_ids: Vec<&str> = infos
        .iter()
        .filter(|i| i.no_id)
        .map(|i| i.attribute_name.as_str())
        .collect();
    let input_id_fn = if without_ids.is_empty() {
        quote! {}
    } else {
        quote! {
            fn generates_input_id(&self, name: &str) -> bool {
                !matches!(name, #(#without_ids)|*)
            }
        }
    };

    let label_fn = text_lookup(quote!(attribute_label), &labels);
    let hint_fn = text_lookup(quote!(attribute_hint), &hints);
    let placeholder_fn = text_lookup(quote!(attribute_placeholder), &placeholders);

    let nested_fns = if nested.is_empty() {
        quote! {}
    } else {
        let names: Vec<&str> = nested.iter().map(|i| i.attribute_name.as_str()).collect();
        let fields: Vec<&Ident> = nested.iter().map(|i| &i.field_name).collect();
        quote! {
            fn nested_model(
                &self,
                name: &str,
            ) -> ::core::option::Option<&dyn ::oxide_forms::FormModel> {
                match name {
                    #(#names => ::core::option::Option::Some(&self.#fields),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn nested_model_mut(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<&mut dyn ::oxide_forms::FormModel> {
                match name {
                    #(#names => ::core::option::Option::Some(&mut self.#fields),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    let errors_fns = errors_field.map_or_else(
        || quote! {},
        |field| {
            quote! {
                fn validation_errors(&self) -> ::core::option::Option<&::oxide_forms::ValidationErrors> {
                    ::core::option::Option::Some(&self.#field)
                }

                fn set_validation_errors(&mut self, errors: ::oxide_forms::ValidationErrors) {
                    self.#field = errors;
                }
            }
        },
    );

    // Keeps a model without assignable fields free of unused-variable warnings.
    let value_param = if leaves.is_empty() && nested.is_empty() {
        quote!(_value)
    } else {
        quote!(value)
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::oxide_forms::FormModel for #struct_name #ty_generics #where_clause {
            fn form_name(&self) -> &str {
                #form_name
            }

            fn has_attribute(&self, name: &str) -> bool {
                const ATTRIBUTES: &[&str] = &[#(#all_names),*];
                ATTRIBUTES.contains(&name)
            }

            fn attribute_value(&self, name: &str) -> ::core::option::Option<::oxide_forms::Value> {
                match name {
                    #(#value_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn set_attribute_value(
                &mut self,
                name: &str,
                #value_param: ::oxide_forms::Value,
            ) -> ::oxide_forms::Result<()> {
                match name {
                    #(#set_arms)*
                    #(#nested_set_arms)*
                    _ => ::core::result::Result::Err(::oxide_forms::FormError::AttributeNotFound {
                        model: ::std::string::String::from(#form_name),
                        attribute: ::std::string::String::from(name),
                    }),
                }
            }

            fn attribute_type(&self, name: &str) -> ::oxide_forms::ScalarType {
                match name {
                    #(#type_arms)*
                    _ => ::oxide_forms::ScalarType::Untyped,
                }
            }

            #label_fn
            #hint_fn
            #placeholder_fn
            #input_id_fn
            #nested_fns
            #errors_fns
        }
    })
}

/// Generates a text accessor, or nothing when no attribute has a value so
/// the trait default applies.
fn text_lookup(method: TokenStream2, entries: &[(&str, String)]) -> TokenStream2 {
    if entries.is_empty() {
        return quote! {};
    }
    let names = entries.iter().map(|(name, _)| *name);
    let texts = entries.iter().map(|(_, text)| text);
    quote! {
        fn #method(&self, name: &str) -> ::core::option::Option<::std::string::String> {
            match name {
                #(#names => ::core::option::Option::Some(::std::string::String::from(#texts)),)*
                _ => ::core::option::Option::None,
            }
        }
    }
}

fn get_form_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;
    for attr in attrs {
        if !attr.path().is_ident("form") || matches!(attr.meta, Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(parse_str(&meta)?);
                Ok(())
            } else {
                Err(meta.error("unsupported form attribute, expected `name`"))
            }
        })?;
    }
    Ok(name)
}

struct FieldAttrs {
    name: Option<String>,
    label: Option<String>,
    hint: Option<String>,
    placeholder: Option<String>,
    role: FieldRole,
    no_id: bool,
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs {
        name: None,
        label: None,
        hint: None,
        placeholder: None,
        role: FieldRole::Leaf,
        no_id: false,
    };

    for attr in attrs {
        if !attr.path().is_ident("form") || matches!(attr.meta, Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                result.name = Some(parse_str(&meta)?);
            } else if meta.path.is_ident("label") {
                result.label = Some(parse_str(&meta)?);
            } else if meta.path.is_ident("hint") {
                result.hint = Some(parse_str(&meta)?);
            } else if meta.path.is_ident("placeholder") {
                result.placeholder = Some(parse_str(&meta)?);
            } else if meta.path.is_ident("nested") {
                result.role = FieldRole::Nested;
            } else if meta.path.is_ident("errors") {
                result.role = FieldRole::Errors;
            } else if meta.path.is_ident("skip") {
                result.role = FieldRole::Skip;
            } else if meta.path.is_ident("no_id") {
                result.no_id = true;
            } else {
                return Err(meta.error("unsupported form attribute"));
            }
            Ok(())
        })?;
    }

    Ok(result)
}

fn parse_str(meta: &ParseNestedMeta<'_>) -> syn::Result<String> {
    let value: Expr = meta.value()?.parse()?;
    if let Expr::Lit(lit) = &value {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(value, "expected a string literal"))
}

/// Turns `first_name` or `firstName` into `First Name`.
fn humanize(s: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
