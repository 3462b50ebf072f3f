//! Struct-specific shape declaration.
//!
//! Every field becomes one statement on the `ShapeBuilder`, in declaration
//! order. Generic parameters mentioned by a field are collected by the
//! capability that field needs.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{
    DataStruct, Field, Generics, Ident, Index, LitStr, Member, Result, ext::IdentExt,
    spanned::Spanned,
};

use crate::{
    container::ContainerOptions,
    field::{FieldDocArgs, FieldKind, parse_field_options},
    generics::collect_generics_from_type,
};

pub(crate) struct DeriveOutput {
    /// Statements run against `shape` inside `MaskedConfig::declare`.
    pub(crate) declarations: Vec<TokenStream>,
    pub(crate) serialize_generics: Vec<Ident>,
    pub(crate) nested_generics: Vec<Ident>,
    pub(crate) flatten_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    data: DataStruct,
    generics: &Generics,
    options: &ContainerOptions,
    root: &TokenStream,
) -> Result<DeriveOutput> {
    let mut output = DeriveOutput {
        declarations: Vec::new(),
        serialize_generics: Vec::new(),
        nested_generics: Vec::new(),
        flatten_generics: Vec::new(),
    };
    for (index, field) in data.fields.into_iter().enumerate() {
        let declaration = declare_field(&mut output, index, field, generics, options, root)?;
        output.declarations.push(declaration);
    }
    Ok(output)
}

fn declare_field(
    output: &mut DeriveOutput,
    index: usize,
    field: Field,
    generics: &Generics,
    options: &ContainerOptions,
    root: &TokenStream,
) -> Result<TokenStream> {
    let span = field.span();
    let field_options = parse_field_options(&field.attrs)?;
    let (member, declared_name) = match field.ident {
        Some(ident) => {
            let raw = ident.unraw().to_string();
            let name = options.rename_all.map_or_else(|| raw.clone(), |rule| rule.apply(&raw));
            (Member::Named(ident), name)
        }
        None => (Member::Unnamed(Index::from(index)), index.to_string()),
    };
    let name = LitStr::new(
        field_options.rename.as_deref().unwrap_or(&declared_name),
        span,
    );
    let doc = field_doc_tokens(field_options.doc.as_ref(), root);

    let declaration = match field_options.kind {
        FieldKind::Value => {
            collect_generics_from_type(&field.ty, generics, &mut output.serialize_generics);
            quote_spanned! { span =>
                shape.field(#name, #doc, |config: &Self| &config.#member);
            }
        }
        FieldKind::Nested => {
            collect_generics_from_type(&field.ty, generics, &mut output.nested_generics);
            quote_spanned! { span =>
                shape.nested(#name, #doc, |config: &Self| &config.#member);
            }
        }
        FieldKind::Flatten => {
            collect_generics_from_type(&field.ty, generics, &mut output.flatten_generics);
            quote_spanned! { span =>
                shape.inherit(|config: &Self| &config.#member);
            }
        }
    };
    Ok(declaration)
}

fn field_doc_tokens(doc: Option<&FieldDocArgs>, root: &TokenStream) -> TokenStream {
    match doc {
        None => quote! { ::core::option::Option::None },
        Some(FieldDocArgs {
            help,
            default_value,
            required,
            sensitive,
        }) => quote! {
            ::core::option::Option::Some(#root::FieldDoc {
                help: #help,
                default_value: #default_value,
                required: #required,
                sensitive: #sensitive,
            })
        },
    }
}
