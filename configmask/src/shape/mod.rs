//! Attribute resolution: the static shape of configuration types.
//!
//! A type describes itself once, through [`MaskedConfig::declare`], instead of
//! being inspected at runtime. `#[derive(MaskedConfig)]` writes that
//! declaration from the struct definition (private fields included); hand
//! written impls use the same [`ShapeBuilder`].

mod attribute;
mod builder;

use std::{
    any::{TypeId, type_name},
    cell::RefCell,
};

pub use attribute::{Attribute, FieldDoc};
pub use builder::ShapeBuilder;
use tracing::warn;

use crate::error::ShapeError;

/// A configuration type whose attributes can be masked.
///
/// Implemented by `#[derive(MaskedConfig)]`. A hand-written impl declares
/// every attribute on the builder and may return an error when the shape
/// cannot be described; the resolver then treats the shape as empty.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `MaskedConfig`",
    label = "this type has no attribute table",
    note = "use `#[derive(MaskedConfig)]` on the type definition"
)]
pub trait MaskedConfig: Sized + 'static {
    /// Declares this type's attributes.
    fn declare(shape: &mut ShapeBuilder<Self>) -> Result<(), ShapeError>;
}

thread_local! {
    static RESOLVING: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

/// Marks `T` as being resolved on this thread until dropped.
struct ResolutionGuard;

impl ResolutionGuard {
    fn enter<T: 'static>() -> Result<Self, ShapeError> {
        RESOLVING.with_borrow_mut(|stack| {
            let id = TypeId::of::<T>();
            if stack.contains(&id) {
                return Err(ShapeError::RecursiveInheritance {
                    type_name: type_name::<T>(),
                });
            }
            stack.push(id);
            Ok(Self)
        })
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        RESOLVING.with_borrow_mut(|stack| {
            stack.pop();
        });
    }
}

fn declare_shape<T: MaskedConfig>() -> Result<Vec<Attribute<T>>, ShapeError> {
    let _guard = ResolutionGuard::enter::<T>()?;
    let mut shape = ShapeBuilder::new();
    T::declare(&mut shape)?;
    shape.finish()
}

/// Returns every attribute of `T`, its own first, then those of its bases.
///
/// Never fails: a shape that cannot be resolved is logged and returned empty.
pub fn resolve_attributes<T: MaskedConfig>() -> Vec<Attribute<T>> {
    match declare_shape::<T>() {
        Ok(attributes) => attributes,
        Err(err) => {
            warn!(
                config = type_name::<T>(),
                error = %err,
                "failed to resolve configuration shape, treating it as empty"
            );
            Vec::new()
        }
    }
}
