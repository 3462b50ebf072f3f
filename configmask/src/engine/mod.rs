//! The masking traversal engine.
//!
//! - **`projection`**: [`RedactedProjection`], the output of one call
//! - **`traversal`**: [`Traversal`], the per-call visited set and the walk itself
//! - **`nested`**: [`NestedConfig`], recursion into nested configurations

mod nested;
mod projection;
mod traversal;

use std::{
    any::type_name,
    panic::{self, AssertUnwindSafe},
};

pub use nested::NestedConfig;
pub(crate) use projection::write_flat;
pub use projection::RedactedProjection;
use tracing::error;
pub use traversal::Traversal;
use traversal::panic_message;

use crate::{error::MaskError, shape::MaskedConfig};

/// Default limit on nested configuration depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Masking settings.
///
/// ```rust
/// use configmask::Masker;
///
/// let masker = Masker::new().with_max_depth(8).with_catch_panics(false);
/// assert_eq!(masker.max_depth(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Masker {
    max_depth: usize,
    catch_panics: bool,
}

impl Default for Masker {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            catch_panics: true,
        }
    }
}

impl Masker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits how deep nested configurations are followed.
    ///
    /// Going deeper aborts the projection with [`MaskError::DepthExceeded`].
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether panics are caught instead of unwinding into the caller.
    ///
    /// A panicking accessor omits its attribute; any other panic becomes
    /// [`MaskError::Panicked`].
    #[must_use]
    pub const fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }

    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub const fn catches_panics(&self) -> bool {
        self.catch_panics
    }

    /// Builds the redacted projection of `config`.
    pub fn mask<C: MaskedConfig>(&self, config: &C) -> Result<RedactedProjection, MaskError> {
        let mut traversal = Traversal::new(self.max_depth, self.catch_panics);
        let result = if self.catch_panics {
            panic::catch_unwind(AssertUnwindSafe(|| traversal.project(config))).unwrap_or_else(
                |payload| {
                    Err(MaskError::Panicked {
                        type_name: type_name::<C>(),
                        message: panic_message(payload.as_ref()),
                    })
                },
            )
        } else {
            traversal.project(config)
        };

        if let Err(err) = &result {
            error!(
                config = type_name::<C>(),
                error = %err,
                "failed to build masked projection"
            );
        }
        result
    }

    /// Like [`Masker::mask`]; an absent config projects to an empty projection.
    pub fn mask_option<C: MaskedConfig>(
        &self,
        config: Option<&C>,
    ) -> Result<RedactedProjection, MaskError> {
        config.map_or_else(|| Ok(RedactedProjection::new()), |config| self.mask(config))
    }
}

/// Builds the redacted projection of `config` with default settings.
pub fn mask<C: MaskedConfig>(config: &C) -> Result<RedactedProjection, MaskError> {
    Masker::new().mask(config)
}

/// Builds the redacted projection of an optional config with default settings.
pub fn mask_option<C: MaskedConfig>(config: Option<&C>) -> Result<RedactedProjection, MaskError> {
    Masker::new().mask_option(config)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value as JsonValue, json};

    use super::*;
    use crate::{AttributeError, FieldDoc, ShapeBuilder, ShapeError};

    struct Flaky {
        name: String,
        secret: Option<String>,
    }

    impl MaskedConfig for Flaky {
        fn declare(shape: &mut ShapeBuilder<Self>) -> Result<(), ShapeError> {
            shape
                .field("name", None, |c: &Self| &c.name)
                .field_with("unreadable", None, |_: &Self| {
                    Err(AttributeError::unavailable("access denied"))
                })
                .field("secret", Some(FieldDoc::sensitive()), |c: &Self| &c.secret);
            Ok(())
        }
    }

    struct Explodes {
        secret: String,
    }

    impl MaskedConfig for Explodes {
        fn declare(shape: &mut ShapeBuilder<Self>) -> Result<(), ShapeError> {
            shape
                .field_with("boom", None, |_: &Self| panic!("accessor exploded"))
                .field("secret", Some(FieldDoc::sensitive()), |c: &Self| &c.secret);
            Ok(())
        }
    }

    struct NoShape;

    impl MaskedConfig for NoShape {
        fn declare(_: &mut ShapeBuilder<Self>) -> Result<(), ShapeError> {
            panic!("shape unavailable")
        }
    }

    impl NestedConfig for NoShape {
        fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
            traversal.descend(self)
        }
    }

    struct Leaf {
        id: u32,
    }

    impl MaskedConfig for Leaf {
        fn declare(shape: &mut ShapeBuilder<Self>) -> Result<(), ShapeError> {
            shape.field("id", None, |c: &Self| &c.id);
            Ok(())
        }
    }

    impl NestedConfig for Leaf {
        fn project_nested(&self, traversal: &mut Traversal) -> Result<JsonValue, AttributeError> {
            traversal.descend(self)
        }
    }

    struct Parent {
        broken: NoShape,
        leaf: Leaf,
    }

    impl MaskedConfig for Parent {
        fn declare(shape: &mut ShapeBuilder<Self>) -> Result<(), ShapeError> {
            shape
                .nested("broken", None, |c: &Self| &c.broken)
                .nested("leaf", None, |c: &Self| &c.leaf);
            Ok(())
        }
    }

    #[test]
    fn unreadable_attribute_is_omitted() {
        let config = Flaky {
            name: "sink".into(),
            secret: Some("hunter2".into()),
        };
        let projection = mask(&config).unwrap();
        let keys: Vec<_> = projection.keys().collect();
        assert_eq!(keys, ["name", "secret"]);
        assert_eq!(projection.get("secret"), Some(&json!("********")));
    }

    #[test]
    fn absent_sensitive_value_stays_null() {
        let config = Flaky {
            name: "sink".into(),
            secret: None,
        };
        let projection = mask(&config).unwrap();
        assert_eq!(projection.get("secret"), Some(&JsonValue::Null));
    }

    #[test]
    fn absent_config_projects_to_empty() {
        let projection = mask_option::<Flaky>(None).unwrap();
        assert!(projection.is_empty());
    }

    #[test]
    fn panicking_accessor_is_omitted() {
        let config = Explodes {
            secret: "hunter2".into(),
        };
        let projection = mask(&config).unwrap();
        assert_eq!(projection.into_json(), json!({"secret": "********"}));
    }

    #[test]
    fn panicking_declare_aborts_projection() {
        let err = mask(&NoShape).unwrap_err();
        match err {
            MaskError::Panicked { type_name, message } => {
                assert!(type_name.ends_with("NoShape"));
                assert_eq!(message, "shape unavailable");
            }
            other => panic!("expected Panicked, got {other:?}"),
        }
    }

    #[test]
    fn path_is_restored_after_nested_panic() {
        let config = Parent {
            broken: NoShape,
            leaf: Leaf { id: 7 },
        };
        // Depth two leaves room for exactly one level below the parent.
        let projection = Masker::new().with_max_depth(2).mask(&config).unwrap();
        assert_eq!(projection.into_json(), json!({"leaf": {"id": 7}}));
    }

    #[test]
    fn default_settings() {
        let masker = Masker::default();
        assert_eq!(masker.max_depth(), DEFAULT_MAX_DEPTH);
        assert!(masker.catches_panics());
    }
}
