//! Cycle-aware projection of configuration objects.

use std::{
    any::{Any, TypeId, type_name},
    panic::{self, AssertUnwindSafe},
    ptr,
};

use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use super::projection::RedactedProjection;
use crate::{
    classify::{MASK_TOKEN, is_sensitive},
    error::{AttributeError, MaskError},
    shape::{Attribute, MaskedConfig, resolve_attributes},
};

/// Identity of an object: where it lives and what it is.
///
/// The type is part of the identity because a struct and its first field
/// share an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Identity {
    address: usize,
    type_id: TypeId,
}

impl Identity {
    fn of<C: MaskedConfig>(config: &C) -> Self {
        Self {
            address: ptr::from_ref(config).addr(),
            type_id: TypeId::of::<C>(),
        }
    }
}

/// State of one top-level masking call.
///
/// Holds the identities of the objects on the current path, outermost first;
/// its length is the current depth. It lives on the caller's stack for the
/// duration of a single call and is handed to
/// [`NestedConfig`](super::NestedConfig) impls so nested configurations share
/// it.
#[derive(Debug)]
pub struct Traversal {
    path: Vec<Identity>,
    max_depth: usize,
    catch_panics: bool,
}

impl Traversal {
    pub(crate) fn new(max_depth: usize, catch_panics: bool) -> Self {
        Self {
            path: Vec::new(),
            max_depth,
            catch_panics,
        }
    }

    /// Masks a nested configuration and returns its projection as a JSON object.
    ///
    /// An object already on the current path projects to `{}`.
    pub fn descend<C: MaskedConfig>(&mut self, config: &C) -> Result<JsonValue, AttributeError> {
        self.project(config)
            .map(RedactedProjection::into_json)
            .map_err(AttributeError::from)
    }

    pub(crate) fn project<C: MaskedConfig>(
        &mut self,
        config: &C,
    ) -> Result<RedactedProjection, MaskError> {
        let identity = Identity::of(config);
        if self.path.contains(&identity) {
            debug!(
                config = type_name::<C>(),
                "configuration refers back to itself, projecting the repeat as empty"
            );
            return Ok(RedactedProjection::new());
        }
        if self.path.len() >= self.max_depth {
            return Err(MaskError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        self.path.push(identity);
        let projection = self.project_attributes(config);
        self.path.pop();

        projection
    }

    fn project_attributes<C: MaskedConfig>(
        &mut self,
        config: &C,
    ) -> Result<RedactedProjection, MaskError> {
        let attributes = resolve_attributes::<C>();
        let mut projection = RedactedProjection::with_capacity(attributes.len());

        for attribute in &attributes {
            let value = match self.read(attribute, config) {
                Ok(value) => value,
                Err(AttributeError::Traversal(err)) => return Err(*err),
                Err(err) => {
                    warn!(
                        config = type_name::<C>(),
                        attribute = attribute.name(),
                        error = %err,
                        "failed to read attribute, omitting it from masked output"
                    );
                    continue;
                }
            };

            if is_sensitive(attribute) && !value.is_null() {
                projection.push(
                    attribute.name_cow(),
                    JsonValue::String(MASK_TOKEN.to_owned()),
                );
            } else {
                projection.push(attribute.name_cow(), value);
            }
        }

        Ok(projection)
    }

    /// Reads one attribute; a panicking accessor is an unreadable attribute.
    ///
    /// A panic can unwind out of nested projections, so the path is cut back
    /// to where this read started.
    fn read<C: MaskedConfig>(
        &mut self,
        attribute: &Attribute<C>,
        config: &C,
    ) -> Result<JsonValue, AttributeError> {
        if !self.catch_panics {
            return attribute.read(config, self);
        }
        let path_len = self.path.len();
        panic::catch_unwind(AssertUnwindSafe(|| attribute.read(config, self))).unwrap_or_else(
            |payload| {
                self.path.truncate(path_len);
                Err(AttributeError::Panicked(panic_message(payload.as_ref())))
            },
        )
    }
}

pub(super) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
