//! The tagged outcome shared by every serialization adapter.

use std::any::type_name;

use tracing::warn;

use crate::{
    engine::{Masker, RedactedProjection},
    error::MaskError,
    shape::MaskedConfig,
};

/// Which path an adapter took to produce its output.
///
/// Adapters prefer availability over confidentiality: when the engine fails
/// they emit the original object through its default serialization, which may
/// contain secrets. That path is tagged [`Rendered::FallbackUnmasked`] (and
/// logged at `warn`) so callers and tests can tell it apart from a masked
/// result.
#[derive(Debug)]
#[must_use]
pub enum Rendered<O> {
    /// The redacted projection was emitted.
    Masked(O),
    /// The engine failed and the unmasked object was emitted instead.
    FallbackUnmasked { output: O, cause: MaskError },
    /// The engine failed and so did the default serialization.
    Failed {
        cause: MaskError,
        fallback: serde_json::Error,
    },
}

impl<O> Rendered<O> {
    pub fn is_masked(&self) -> bool {
        matches!(self, Self::Masked(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackUnmasked { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The emitted output, masked or not.
    pub fn output(&self) -> Option<&O> {
        match self {
            Self::Masked(output) | Self::FallbackUnmasked { output, .. } => Some(output),
            Self::Failed { .. } => None,
        }
    }

    /// Consumes `self`, returning the emitted output, masked or not.
    pub fn into_output(self) -> Option<O> {
        match self {
            Self::Masked(output) | Self::FallbackUnmasked { output, .. } => Some(output),
            Self::Failed { .. } => None,
        }
    }

    pub fn map<P>(self, f: impl FnOnce(O) -> P) -> Rendered<P> {
        match self {
            Self::Masked(output) => Rendered::Masked(f(output)),
            Self::FallbackUnmasked { output, cause } => Rendered::FallbackUnmasked {
                output: f(output),
                cause,
            },
            Self::Failed { cause, fallback } => Rendered::Failed { cause, fallback },
        }
    }
}

pub(crate) fn warn_fallback<C>(cause: &MaskError) {
    warn!(
        config = type_name::<C>(),
        error = %cause,
        "masking failed, falling back to unmasked serialization"
    );
}

/// Runs the engine and picks the masked or the fallback rendering.
pub(crate) fn render<C, O>(
    masker: &Masker,
    config: &C,
    masked: impl FnOnce(RedactedProjection) -> O,
    unmasked: impl FnOnce(&C) -> Result<O, serde_json::Error>,
) -> Rendered<O>
where
    C: MaskedConfig,
{
    match masker.mask(config) {
        Ok(projection) => Rendered::Masked(masked(projection)),
        Err(cause) => {
            warn_fallback::<C>(&cause);
            match unmasked(config) {
                Ok(output) => Rendered::FallbackUnmasked { output, cause },
                Err(fallback) => Rendered::Failed { cause, fallback },
            }
        }
    }
}
