//! Declaration of a type's attribute table.

use std::{any::type_name, borrow::Cow, sync::Arc};

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{
    MaskedConfig,
    attribute::{Attribute, FieldDoc, Reader},
    resolve_attributes,
};
use crate::{
    engine::{NestedConfig, Traversal},
    error::{AttributeError, ShapeError},
};

/// Collects the attributes a [`MaskedConfig`] type declares.
///
/// Own attributes keep their declaration order and come first. Attributes
/// inherited through [`ShapeBuilder::inherit`] follow, in the base's resolved
/// order, minus any name the type declares itself: a redeclared attribute is
/// reported once, under the declaring type.
///
/// ```rust
/// use configmask::{FieldDoc, MaskedConfig, ShapeBuilder, ShapeError, resolve_attributes};
///
/// struct Credentials {
///     user: String,
///     token: Option<String>,
/// }
///
/// impl MaskedConfig for Credentials {
///     fn declare(shape: &mut ShapeBuilder<Self>) -> Result<(), ShapeError> {
///         shape
///             .field("user", None, |c: &Self| &c.user)
///             .field("token", Some(FieldDoc::sensitive()), |c: &Self| &c.token);
///         Ok(())
///     }
/// }
///
/// let names: Vec<_> = resolve_attributes::<Credentials>()
///     .iter()
///     .map(|attribute| attribute.name().to_owned())
///     .collect();
/// assert_eq!(names, ["user", "token"]);
/// ```
pub struct ShapeBuilder<T> {
    own: Vec<Attribute<T>>,
    inherited: Vec<Attribute<T>>,
}

impl<T: MaskedConfig> ShapeBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            own: Vec::new(),
            inherited: Vec::new(),
        }
    }

    /// Declares an attribute read through a field reference.
    ///
    /// The value is projected with its `Serialize` impl; a value that cannot be
    /// represented as JSON is an attribute read failure.
    pub fn field<V, F>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        doc: Option<FieldDoc>,
        get: F,
    ) -> &mut Self
    where
        V: Serialize + ?Sized,
        F: Fn(&T) -> &V + Send + Sync + 'static,
    {
        self.push_own(
            name.into(),
            doc,
            Arc::new(move |config: &T, _: &mut Traversal| {
                serde_json::to_value(get(config)).map_err(AttributeError::from)
            }),
        )
    }

    /// Declares an attribute with a fallible accessor.
    pub fn field_with<F>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        doc: Option<FieldDoc>,
        read: F,
    ) -> &mut Self
    where
        F: Fn(&T) -> Result<JsonValue, AttributeError> + Send + Sync + 'static,
    {
        self.push_own(
            name.into(),
            doc,
            Arc::new(move |config: &T, _: &mut Traversal| read(config)),
        )
    }

    /// Declares an attribute holding a nested configuration.
    ///
    /// The nested value is masked recursively within the same traversal, so
    /// references back to an enclosing object are cut off.
    pub fn nested<N, F>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        doc: Option<FieldDoc>,
        get: F,
    ) -> &mut Self
    where
        N: NestedConfig + ?Sized,
        F: Fn(&T) -> &N + Send + Sync + 'static,
    {
        self.push_own(
            name.into(),
            doc,
            Arc::new(move |config: &T, traversal: &mut Traversal| {
                get(config).project_nested(traversal)
            }),
        )
    }

    /// Splices in every attribute of the base type `B` embedded in `T`.
    ///
    /// A base whose shape cannot be resolved contributes nothing.
    pub fn inherit<B, F>(&mut self, get: F) -> &mut Self
    where
        B: MaskedConfig,
        F: Fn(&T) -> &B + Send + Sync + 'static,
    {
        let project: Arc<dyn Fn(&T) -> &B + Send + Sync> = Arc::new(get);
        self.inherited.extend(
            resolve_attributes::<B>()
                .into_iter()
                .map(|attribute| attribute.lift(Arc::clone(&project))),
        );
        self
    }

    fn push_own(
        &mut self,
        name: Cow<'static, str>,
        doc: Option<FieldDoc>,
        reader: Reader<T>,
    ) -> &mut Self {
        self.own.push(Attribute::new(name, type_name::<T>(), doc, reader));
        self
    }

    pub(crate) fn finish(self) -> Result<Vec<Attribute<T>>, ShapeError> {
        let mut attributes: Vec<Attribute<T>> =
            Vec::with_capacity(self.own.len() + self.inherited.len());

        for attribute in self.own {
            if attributes.iter().any(|seen| seen.name() == attribute.name()) {
                return Err(ShapeError::DuplicateAttribute {
                    type_name: type_name::<T>(),
                    name: attribute.name().to_owned(),
                });
            }
            attributes.push(attribute);
        }

        for attribute in self.inherited {
            if !attributes.iter().any(|seen| seen.name() == attribute.name()) {
                attributes.push(attribute);
            }
        }

        Ok(attributes)
    }
}
