//! Container-level `#[masked(...)]` options.

use syn::{Attribute, LitStr, Meta, Result, spanned::Spanned};

use crate::rename::{RENAME_RULES, RenameRule};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ContainerOptions {
    pub(crate) rename_all: Option<RenameRule>,
    pub(crate) skip_debug: bool,
    pub(crate) display: bool,
}

pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();
    for attr in attrs {
        if !attr.path().is_ident("masked") {
            continue;
        }
        if !matches!(attr.meta, Meta::List(_)) {
            return Err(syn::Error::new(
                attr.span(),
                "expected #[masked(...)] syntax (e.g., #[masked(rename_all = \"camelCase\")])",
            ));
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip_debug") {
                options.skip_debug = true;
                Ok(())
            } else if meta.path.is_ident("display") {
                options.display = true;
                Ok(())
            } else if meta.path.is_ident("rename_all") {
                let value: LitStr = meta.value()?.parse()?;
                if options.rename_all.is_some() {
                    return Err(meta.error("duplicate `rename_all` in attribute"));
                }
                let rule = RenameRule::parse(&value.value()).ok_or_else(|| {
                    syn::Error::new(
                        value.span(),
                        format!("unknown rename rule; expected one of {RENAME_RULES}"),
                    )
                })?;
                options.rename_all = Some(rule);
                Ok(())
            } else {
                Err(meta.error(
                    "unknown masked container option; expected `rename_all`, `skip_debug` or `display`",
                ))
            }
        })?;
    }
    Ok(options)
}
