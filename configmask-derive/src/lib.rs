//! Derive macro for `configmask`.
//!
//! `#[derive(MaskedConfig)]` turns a struct's fields into an attribute table:
//! - reads `#[field_doc(...)]` metadata and `#[masked(...)]` options
//! - emits `MaskedConfig`, `NestedConfig` and a masking `Debug` impl
//!
//! It does **not** decide what a mask looks like. The token and the traversal
//! live in the main `configmask` crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::struct_excessive_bools,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Result, parse_macro_input, parse_quote};

mod container;
mod derive_struct;
mod field;
mod generics;
mod rename;
use container::parse_container_options;
use derive_struct::{DeriveOutput, derive_struct};
use generics::{add_bounds, add_static_bounds};

/// Derives `configmask::MaskedConfig` (and related impls) for structs.
///
/// # Field Attributes
///
/// - **No annotation**: the field is a plain attribute. Its value is projected
///   through `serde::Serialize` and appears unchanged.
///
/// - `#[field_doc(sensitive = true, help = "...", default_value = "...", required = false)]`:
///   documentation metadata. A field whose `sensitive` entry is true has its
///   value replaced by `********` in every masked output. A bare `sensitive`
///   means `sensitive = true`.
///
/// - `#[masked(nested)]`: the field holds another configuration (possibly
///   behind `Option`, `Box`, `Rc`, `Arc`, `Weak`, `RefCell`, `Mutex`, `RwLock`
///   or `Vec`). It is masked recursively; references back to an object already
///   being masked are rendered as `{}`.
///
/// - `#[masked(flatten)]`: the field embeds a base configuration. Its
///   attributes are spliced in after the type's own, and an own attribute with
///   the same name shadows the inherited one.
///
/// - `#[masked(rename = "...")]`: the attribute's external name.
///
/// # Container Attributes
///
/// - `#[masked(rename_all = "camelCase")]`: external names for every field
///   (`lowercase`, `camelCase`, `PascalCase`, `snake_case`,
///   `SCREAMING_SNAKE_CASE`, `kebab-case`).
/// - `#[masked(skip_debug)]`: opt out of the generated `Debug` impl.
/// - `#[masked(display)]`: also implement `Display` as the masked flat listing
///   (`{name=value, ...}`). Requires `Self: Serialize`.
///
/// Enums and unions are rejected at compile time.
///
/// # Generated Impls
///
/// - `MaskedConfig` declaring every field, in order
/// - `NestedConfig`, so the type can sit behind `#[masked(nested)]` elsewhere
/// - `Debug` writing the masked projection, unless `skip_debug`
/// - `Display`, when `display` is set
#[proc_macro_derive(MaskedConfig, attributes(field_doc, masked))]
pub fn derive_masked_config(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let options = parse_container_options(&attrs)?;
    let root = crate_root();

    let data = match data {
        Data::Struct(data) => data,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "`MaskedConfig` can only be derived for structs; \
                 enum variants have no fixed attribute table",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "`MaskedConfig` cannot be derived for unions",
            ));
        }
    };
    let has_fields = !data.fields.is_empty();

    let DeriveOutput {
        declarations,
        serialize_generics,
        nested_generics,
        flatten_generics,
    } = derive_struct(data, &generics, &options, &root)?;

    let bounded = add_static_bounds(generics);
    let bounded = add_bounds(
        bounded,
        &serialize_generics,
        &quote! { #root::__private::Serialize },
    );
    let bounded = add_bounds(bounded, &nested_generics, &quote! { #root::NestedConfig });
    let bounded = add_bounds(bounded, &flatten_generics, &quote! { #root::MaskedConfig });
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    let shape_param = if has_fields {
        format_ident!("shape")
    } else {
        format_ident!("_shape")
    };

    let shape_impl = quote! {
        impl #impl_generics #root::MaskedConfig for #ident #ty_generics #where_clause {
            fn declare(
                #shape_param: &mut #root::ShapeBuilder<Self>,
            ) -> ::core::result::Result<(), #root::ShapeError> {
                #(#declarations)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics #root::NestedConfig for #ident #ty_generics #where_clause {
            fn project_nested(
                &self,
                traversal: &mut #root::Traversal,
            ) -> ::core::result::Result<#root::JsonValue, #root::AttributeError> {
                traversal.descend(self)
            }
        }
    };

    let debug_impl = if options.skip_debug {
        quote! {}
    } else {
        quote! {
            impl #impl_generics ::core::fmt::Debug for #ident #ty_generics #where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #root::text::fmt_masked_debug(self, stringify!(#ident), f)
                }
            }
        }
    };

    let display_impl = if options.display {
        let self_ty: syn::Type = parse_quote!(#ident #ty_generics);
        let mut display_generics = bounded.clone();
        display_generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#self_ty: #root::__private::Serialize));
        let (display_impl_generics, display_ty_generics, display_where_clause) =
            display_generics.split_for_impl();
        quote! {
            impl #display_impl_generics ::core::fmt::Display
                for #ident #display_ty_generics #display_where_clause
            {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    ::core::fmt::Display::fmt(
                        &#root::text::MaskedDisplayExt::masked_display(self),
                        f,
                    )
                }
            }
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        #shape_impl
        #debug_impl
        #display_impl
    })
}

/// Path to the `configmask` crate as seen from the expansion site.
///
/// Inside `configmask` itself (unit tests and doctests) this resolves through
/// its `extern crate self as configmask` alias.
fn crate_root() -> TokenStream {
    match crate_name("configmask") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::configmask },
    }
}
