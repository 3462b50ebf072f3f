//! Adapters for emitting masked configurations through `slog`.
//!
//! Values are emitted as nested structured JSON via `slog`'s nested-value
//! support. Logging never fails because of masking: an engine failure falls
//! back to the unmasked object like every other adapter, and a config that
//! cannot be serialized at all is logged as a placeholder string.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{json::Masked, render::Rendered, shape::MaskedConfig};

/// An already masked JSON value, ready to be logged.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskedJson(JsonValue);

impl MaskedJson {
    pub fn value(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_inner(self) -> JsonValue {
        self.0
    }
}

fn placeholder(cause: &impl std::fmt::Display) -> JsonValue {
    JsonValue::String(format!("Failed to serialize config: {cause}"))
}

impl From<Rendered<JsonValue>> for MaskedJson {
    fn from(rendered: Rendered<JsonValue>) -> Self {
        match rendered {
            Rendered::Masked(value) | Rendered::FallbackUnmasked { output: value, .. } => {
                Self(value)
            }
            Rendered::Failed { fallback, .. } => Self(placeholder(&fallback)),
        }
    }
}

impl SlogValue for MaskedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.0.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

impl<C> SlogValue for Masked<'_, C>
where
    C: MaskedConfig + Serialize,
{
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        MaskedJson::from(self.render_json()).serialize(record, key, serializer)
    }
}

/// Extension trait for logging masked configurations with `slog`.
///
/// ```ignore
/// use configmask::slog::SlogMaskedExt;
///
/// info!(logger, "loaded sink config"; "config" => config.slog_masked());
/// ```
pub trait SlogMaskedExt: MaskedConfig + Serialize {
    /// Masks `self` now and returns the result as a `slog::Value`.
    fn slog_masked(&self) -> MaskedJson {
        MaskedJson::from(Masked::new(self).render_json())
    }
}

impl<C> SlogMaskedExt for C where C: MaskedConfig + Serialize {}
