//! Parsing of `#[field_doc(...)]` and `#[masked(...)]` field attributes.
//!
//! This module maps attribute syntax to attribute declarations and produces
//! structured errors for invalid forms.

use syn::{Attribute, LitBool, LitStr, Meta, Result, Token, meta::ParseNestedMeta, spanned::Spanned};

/// How a field is declared on the shape builder.
///
/// | Attribute             | Kind      | Declaration            |
/// |-----------------------|-----------|------------------------|
/// | None                  | `Value`   | `ShapeBuilder::field`  |
/// | `#[masked(nested)]`   | `Nested`  | `ShapeBuilder::nested` |
/// | `#[masked(flatten)]`  | `Flatten` | `ShapeBuilder::inherit`|
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Value,
    Nested,
    Flatten,
}

/// Arguments of `#[field_doc(...)]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FieldDocArgs {
    pub(crate) help: String,
    pub(crate) default_value: String,
    pub(crate) required: bool,
    pub(crate) sensitive: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldOptions {
    pub(crate) kind: FieldKind,
    pub(crate) doc: Option<FieldDocArgs>,
    pub(crate) rename: Option<String>,
}

/// Reads a boolean flag written either bare (`sensitive`) or as `sensitive = true`.
fn parse_flag(meta: &ParseNestedMeta<'_>) -> Result<bool> {
    if meta.input.peek(Token![=]) {
        let lit: LitBool = meta.value()?.parse()?;
        Ok(lit.value)
    } else {
        Ok(true)
    }
}

fn set_once<T>(
    target: &mut Option<T>,
    value: T,
    meta: &ParseNestedMeta<'_>,
    key: &str,
) -> Result<()> {
    if target.is_some() {
        return Err(meta.error(format!("duplicate `{key}` in attribute")));
    }
    *target = Some(value);
    Ok(())
}

fn parse_field_doc(attr: &Attribute) -> Result<FieldDocArgs> {
    match &attr.meta {
        Meta::Path(_) => Ok(FieldDocArgs::default()),
        Meta::NameValue(_) => Err(syn::Error::new(
            attr.span(),
            "expected #[field_doc(...)] syntax \
             (e.g., #[field_doc(sensitive = true, help = \"...\")])",
        )),
        Meta::List(_) => {
            let mut help = None;
            let mut default_value = None;
            let mut required = None;
            let mut sensitive = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("sensitive") {
                    let flag = parse_flag(&meta)?;
                    set_once(&mut sensitive, flag, &meta, "sensitive")
                } else if meta.path.is_ident("required") {
                    let flag = parse_flag(&meta)?;
                    set_once(&mut required, flag, &meta, "required")
                } else if meta.path.is_ident("help") {
                    let text: LitStr = meta.value()?.parse()?;
                    set_once(&mut help, text.value(), &meta, "help")
                } else if meta.path.is_ident("default_value") {
                    let text: LitStr = meta.value()?.parse()?;
                    set_once(&mut default_value, text.value(), &meta, "default_value")
                } else {
                    Err(meta.error(
                        "unknown field_doc key; expected `sensitive`, `required`, \
                         `help` or `default_value`",
                    ))
                }
            })?;
            Ok(FieldDocArgs {
                help: help.unwrap_or_default(),
                default_value: default_value.unwrap_or_default(),
                required: required.unwrap_or(false),
                sensitive: sensitive.unwrap_or(false),
            })
        }
    }
}

fn parse_masked(
    attr: &Attribute,
    kind: &mut Option<FieldKind>,
    rename: &mut Option<String>,
) -> Result<()> {
    if !matches!(attr.meta, Meta::List(_)) {
        return Err(syn::Error::new(
            attr.span(),
            "expected #[masked(...)] syntax (e.g., #[masked(nested)])",
        ));
    }
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("nested") {
            set_once(kind, FieldKind::Nested, &meta, "nested/flatten")
        } else if meta.path.is_ident("flatten") {
            set_once(kind, FieldKind::Flatten, &meta, "nested/flatten")
        } else if meta.path.is_ident("rename") {
            let name: LitStr = meta.value()?.parse()?;
            set_once(rename, name.value(), &meta, "rename")
        } else {
            Err(meta.error(
                "unknown masked field option; expected `nested`, `flatten` or `rename`",
            ))
        }
    })
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut doc: Option<FieldDocArgs> = None;
    let mut kind: Option<FieldKind> = None;
    let mut rename: Option<String> = None;

    for attr in attrs {
        if attr.path().is_ident("field_doc") {
            if doc.is_some() {
                return Err(syn::Error::new(
                    attr.span(),
                    "multiple #[field_doc] attributes on the same field",
                ));
            }
            doc = Some(parse_field_doc(attr)?);
        } else if attr.path().is_ident("masked") {
            parse_masked(attr, &mut kind, &mut rename)?;
        }
    }

    let kind = kind.unwrap_or(FieldKind::Value);
    if kind == FieldKind::Flatten {
        if let Some(attr) = attrs.iter().find(|attr| attr.path().is_ident("field_doc")) {
            if doc.is_some() {
                return Err(syn::Error::new(
                    attr.span(),
                    "#[field_doc] cannot be used on a #[masked(flatten)] field; \
                     document the base type's fields instead",
                ));
            }
        }
        if rename.is_some() {
            let span = attrs
                .iter()
                .find(|attr| attr.path().is_ident("masked"))
                .map_or_else(proc_macro2::Span::call_site, Spanned::span);
            return Err(syn::Error::new(
                span,
                "`rename` cannot be combined with `flatten`",
            ));
        }
    }

    Ok(FieldOptions { kind, doc, rename })
}
