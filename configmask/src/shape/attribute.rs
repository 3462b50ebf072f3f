//! Attribute descriptors and the field metadata marker.

use std::{borrow::Cow, fmt, sync::Arc};

use serde_json::Value as JsonValue;

use crate::{engine::Traversal, error::AttributeError};

/// Documentation metadata attached to a configuration field.
///
/// Written as `#[field_doc(...)]` on a field of a `#[derive(MaskedConfig)]`
/// type. The engine only reads [`FieldDoc::sensitive`]; the other entries
/// travel with the descriptor for tooling that documents connector configs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldDoc {
    /// Human readable description of the field.
    pub help: &'static str,
    /// Default value, as documented.
    pub default_value: &'static str,
    /// Whether the field must be supplied.
    pub required: bool,
    /// Whether the field holds data that must never reach logs.
    pub sensitive: bool,
}

impl FieldDoc {
    /// Metadata with every entry empty and `sensitive = false`.
    pub const fn new() -> Self {
        Self {
            help: "",
            default_value: "",
            required: false,
            sensitive: false,
        }
    }

    /// Metadata for a sensitive field.
    pub const fn sensitive() -> Self {
        Self {
            sensitive: true,
            ..Self::new()
        }
    }

    #[must_use]
    pub const fn with_help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    #[must_use]
    pub const fn with_default_value(mut self, default_value: &'static str) -> Self {
        self.default_value = default_value;
        self
    }

    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

pub(crate) type Reader<T> =
    Arc<dyn Fn(&T, &mut Traversal) -> Result<JsonValue, AttributeError> + Send + Sync>;

/// One declared attribute of a configuration type.
///
/// Descriptors are derived from the type alone: the name, the declaring type
/// and the sensitivity never depend on a value. The accessor reads the current
/// value from an instance as a JSON value.
pub struct Attribute<T> {
    name: Cow<'static, str>,
    declared_in: &'static str,
    doc: Option<FieldDoc>,
    reader: Reader<T>,
}

impl<T> Attribute<T> {
    pub(crate) fn new(
        name: Cow<'static, str>,
        declared_in: &'static str,
        doc: Option<FieldDoc>,
        reader: Reader<T>,
    ) -> Self {
        Self {
            name,
            declared_in,
            doc,
            reader,
        }
    }

    /// Name under which the attribute appears in projections.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type name of the type that declares the attribute.
    ///
    /// For attributes spliced in from a base type this is the base, not the
    /// type being resolved.
    pub fn declared_in(&self) -> &'static str {
        self.declared_in
    }

    /// The attached metadata marker, if any.
    pub fn doc(&self) -> Option<&FieldDoc> {
        self.doc.as_ref()
    }

    pub(crate) fn name_cow(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    pub(crate) fn read(
        &self,
        config: &T,
        traversal: &mut Traversal,
    ) -> Result<JsonValue, AttributeError> {
        (self.reader)(config, traversal)
    }
}

impl<B: 'static> Attribute<B> {
    /// Re-targets a base type's attribute onto a type that embeds the base.
    pub(crate) fn lift<T: 'static>(
        self,
        project: Arc<dyn Fn(&T) -> &B + Send + Sync>,
    ) -> Attribute<T> {
        let base_reader = self.reader;
        Attribute {
            name: self.name,
            declared_in: self.declared_in,
            doc: self.doc,
            reader: Arc::new(move |config: &T, traversal: &mut Traversal| {
                base_reader(project(config), traversal)
            }),
        }
    }
}

impl<T> Clone for Attribute<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            declared_in: self.declared_in,
            doc: self.doc,
            reader: Arc::clone(&self.reader),
        }
    }
}

impl<T> fmt::Debug for Attribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("declared_in", &self.declared_in)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}
