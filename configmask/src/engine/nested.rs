//! Nested configurations reachable through attribute values.
//!
//! Attributes declared with `#[masked(nested)]` (or
//! [`ShapeBuilder::nested`](crate::ShapeBuilder::nested)) are masked
//! recursively within the enclosing traversal. Every other attribute value is
//! projected as-is through its `Serialize` impl.

use std::{
    cell::RefCell,
    rc::{self, Rc},
    sync::{self, Arc, Mutex, RwLock, TryLockError},
};

use serde_json::Value as JsonValue;

use super::traversal::Traversal;
use crate::error::AttributeError;

/// A value that can be projected as a nested masked configuration.
///
/// `#[derive(MaskedConfig)]` implements this for the deriving type. The
/// implementations below cover the usual owning and sharing wrappers; absent
/// values (`None`, a dangling `Weak`) project to `null`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be masked as a nested configuration",
    label = "this type is not a nested configuration",
    note = "use `#[derive(MaskedConfig)]` on the nested type",
    note = "or drop `#[masked(nested)]` to pass the value through unmasked"
)]
pub trait NestedConfig {
    /// Projects `self` within an ongoing traversal.
    fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError>;
}

impl<T: NestedConfig> NestedConfig for Option<T> {
    fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
        match self {
            Some(inner) => inner.project_nested(traversal),
            None => Ok(JsonValue::Null),
        }
    }
}

impl<T: NestedConfig + ?Sized> NestedConfig for Box<T> {
    fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
        (**self).project_nested(traversal)
    }
}

impl<T: NestedConfig + ?Sized> NestedConfig for Rc<T> {
    fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
        (**self).project_nested(traversal)
    }
}

impl<T: NestedConfig + ?Sized> NestedConfig for Arc<T> {
    fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
        (**self).project_nested(traversal)
    }
}

impl<T: NestedConfig> NestedConfig for rc::Weak<T> {
    fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
        self.upgrade()
            .map_or(Ok(JsonValue::Null), |inner| inner.project_nested(traversal))
    }
}

impl<T: NestedConfig> NestedConfig for sync::Weak<T> {
    fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
        self.upgrade()
            .map_or(Ok(JsonValue::Null), |inner| inner.project_nested(traversal))
    }
}

impl<T: NestedConfig + ?Sized> NestedConfig for RefCell<T> {
    fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
        let inner = self.try_borrow().map_err(|_| AttributeError::Busy)?;
        inner.project_nested(traversal)
    }
}

impl<T: NestedConfig + ?Sized> NestedConfig for Mutex<T> {
    fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
        match self.try_lock() {
            Ok(inner) => inner.project_nested(traversal),
            Err(TryLockError::WouldBlock) => Err(AttributeError::Busy),
            Err(TryLockError::Poisoned(_)) => Err(AttributeError::Poisoned),
        }
    }
}

impl<T: NestedConfig + ?Sized> NestedConfig for RwLock<T> {
    fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
        match self.try_read() {
            Ok(inner) => inner.project_nested(traversal),
            Err(TryLockError::WouldBlock) => Err(AttributeError::Busy),
            Err(TryLockError::Poisoned(_)) => Err(AttributeError::Poisoned),
        }
    }
}

impl<T: NestedConfig> NestedConfig for [T] {
    fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
        self.iter()
            .map(|item| item.project_nested(traversal))
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array)
    }
}

impl<T: NestedConfig> NestedConfig for Vec<T> {
    fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
        self.as_slice().project_nested(traversal)
    }
}
