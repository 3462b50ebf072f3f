//! Generic parameter discovery and trait bounds.
//!
//! Each field kind needs a different capability from the type parameters it
//! mentions: plain values are projected with `Serialize`, nested fields with
//! `NestedConfig`, flattened bases with `MaskedConfig`. Bounds are added only
//! for parameters a field actually mentions.
//!
//! `PhantomData<T>` is never read, so the `T` inside it gets no bound:
//!
//! ```ignore
//! struct TypedConfig<T> {
//!     name: String,
//!     _marker: PhantomData<T>, // T need not be Serialize
//! }
//! ```

use proc_macro2::TokenStream;
use syn::{Generics, Ident, Path, Type, parse_quote, visit::Visit};

struct GenericCollector<'a> {
    generics: &'a Generics,
    found: &'a mut Vec<Ident>,
}

impl<'ast> Visit<'ast> for GenericCollector<'_> {
    fn visit_path(&mut self, path: &'ast Path) {
        if path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "PhantomData")
        {
            return;
        }
        if let Some(first) = path.segments.first() {
            let ident = &first.ident;
            if self.generics.type_params().any(|param| param.ident == *ident)
                && !self.found.iter().any(|found| found == ident)
            {
                self.found.push(ident.clone());
            }
        }
        syn::visit::visit_path(self, path);
    }
}

/// Records every type parameter of `generics` that `ty` mentions outside `PhantomData`.
pub(crate) fn collect_generics_from_type(ty: &Type, generics: &Generics, found: &mut Vec<Ident>) {
    GenericCollector { generics, found }.visit_type(ty);
}

/// Adds `bound` to each type parameter listed in `used`.
pub(crate) fn add_bounds(mut generics: Generics, used: &[Ident], bound: &TokenStream) -> Generics {
    for param in generics.type_params_mut() {
        if used.iter().any(|ident| ident == &param.ident) {
            param.bounds.push(parse_quote!(#bound));
        }
    }
    generics
}

/// Adds `'static` to every type parameter.
///
/// Shapes are stored as boxed accessors, so every implementor is `'static`.
pub(crate) fn add_static_bounds(mut generics: Generics) -> Generics {
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }
    generics
}
