//! Error types for shape resolution, attribute reads and traversal.
//!
//! The taxonomy is deliberately small:
//!
//! - [`AttributeError`]: one attribute could not be read. Recovered by the
//!   engine (the attribute is omitted), except for the
//!   [`AttributeError::Traversal`] carrier used by nested configs.
//! - [`ShapeError`]: a type's attributes could not be enumerated. Recovered by
//!   the resolver as an empty shape.
//! - [`MaskError`]: the projection was aborted. Surfaced to adapters, which fall
//!   back to unmasked default serialization.

use thiserror::Error;

/// Failure to read a single attribute value.
#[derive(Debug, Error)]
pub enum AttributeError {
    /// The value sits behind a cell or lock that is currently held elsewhere.
    #[error("value is borrowed or locked elsewhere")]
    Busy,
    /// The value sits behind a poisoned lock.
    #[error("value is behind a poisoned lock")]
    Poisoned,
    /// The value could not be converted to its JSON projection.
    #[error("value could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    /// The accessor panicked while reading the value.
    #[error("accessor panicked: {0}")]
    Panicked(String),
    /// A hand-written accessor reported the value as unreadable.
    #[error("value is unavailable: {0}")]
    Unavailable(String),
    /// A nested configuration aborted its own projection.
    ///
    /// This is not recoverable: the enclosing projection is aborted too.
    #[error(transparent)]
    Traversal(Box<MaskError>),
}

impl AttributeError {
    /// Creates an [`AttributeError::Unavailable`] with the given reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}

impl From<MaskError> for AttributeError {
    fn from(err: MaskError) -> Self {
        Self::Traversal(Box::new(err))
    }
}

/// Failure that aborts a whole projection.
#[derive(Debug, Error)]
pub enum MaskError {
    /// Nested configurations went deeper than the configured limit.
    #[error("nested configurations exceed the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
    /// The projection panicked outside an attribute read, e.g. while a
    /// shape was being declared.
    #[error("masking `{type_name}` panicked: {message}")]
    Panicked {
        type_name: &'static str,
        message: String,
    },
}

/// Failure to enumerate the attributes of a type.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    /// Two own attributes of one type share a name.
    #[error("attribute `{name}` is declared more than once on `{type_name}`")]
    DuplicateAttribute {
        type_name: &'static str,
        name: String,
    },
    /// The type inherits from itself, directly or through its bases.
    #[error("`{type_name}` inherits from itself")]
    RecursiveInheritance { type_name: &'static str },
    /// A hand-written shape declaration could not describe the type.
    #[error("shape of `{type_name}` is unavailable: {reason}")]
    Unavailable {
        type_name: &'static str,
        reason: String,
    },
}

impl ShapeError {
    /// Creates a [`ShapeError::Unavailable`] for `T`.
    pub fn unavailable<T: ?Sized>(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            type_name: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }
}
