//! JSON output of masked configurations.
//!
//! Three ways in, all backed by the same engine:
//!
//! - [`to_masked_value`] / [`to_masked_json`]: one-shot rendering with the
//!   path taken reported as [`Rendered`]
//! - [`Masked`]: a `Serialize` wrapper, available on every masked config via
//!   [`MaskedSerializeExt::masked`] without per-type registration
//! - [`serialize`] / [`serialize_option`]: per-field overrides for
//!   `#[serde(serialize_with = "...")]`
//!
//! ```rust
//! use configmask::{MaskedConfig, json::MaskedSerializeExt};
//! use serde::Serialize;
//!
//! #[derive(MaskedConfig, Serialize)]
//! struct ClientConfig {
//!     service_url: String,
//!     #[field_doc(sensitive)]
//!     auth_token: String,
//! }
//!
//! let config = ClientConfig {
//!     service_url: "pulsar://localhost:6650".into(),
//!     auth_token: "eyJhbGciOi".into(),
//! };
//! let json = serde_json::to_string(&config.masked()).unwrap();
//! assert_eq!(json, r#"{"service_url":"pulsar://localhost:6650","auth_token":"********"}"#);
//! ```

use std::{any::type_name, fmt};

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::{
    engine::{Masker, RedactedProjection},
    render::{Rendered, render, warn_fallback},
    shape::MaskedConfig,
};

impl Masker {
    /// Renders `config` as a JSON value, masked when the engine succeeds.
    pub fn to_masked_value<C>(&self, config: &C) -> Rendered<JsonValue>
    where
        C: MaskedConfig + Serialize,
    {
        render(
            self,
            config,
            RedactedProjection::into_json,
            |config| serde_json::to_value(config),
        )
    }

    /// Renders `config` as a JSON string, masked when the engine succeeds.
    pub fn to_masked_json<C>(&self, config: &C) -> Rendered<String>
    where
        C: MaskedConfig + Serialize,
    {
        render(
            self,
            config,
            |projection| projection.into_json().to_string(),
            |config| serde_json::to_string(config),
        )
    }
}

/// Renders `config` as a JSON value with default settings.
pub fn to_masked_value<C>(config: &C) -> Rendered<JsonValue>
where
    C: MaskedConfig + Serialize,
{
    Masker::new().to_masked_value(config)
}

/// Renders `config` as a JSON string with default settings.
pub fn to_masked_json<C>(config: &C) -> Rendered<String>
where
    C: MaskedConfig + Serialize,
{
    Masker::new().to_masked_json(config)
}

/// `Serialize` wrapper that writes the redacted projection of a config.
///
/// When the engine fails the wrapped config is serialized as-is, after a
/// `warn` log. The engine runs before anything is written, so output is never
/// a mix of both.
pub struct Masked<'a, C> {
    config: &'a C,
    masker: Masker,
}

impl<'a, C> Masked<'a, C>
where
    C: MaskedConfig + Serialize,
{
    pub fn new(config: &'a C) -> Self {
        Self::with_masker(config, Masker::new())
    }

    pub fn with_masker(config: &'a C, masker: Masker) -> Self {
        Self { config, masker }
    }

    /// The wrapped config.
    pub fn config(&self) -> &'a C {
        self.config
    }

    /// Renders the wrapped config as a JSON value.
    pub fn render_json(&self) -> Rendered<JsonValue> {
        self.masker.to_masked_value(self.config)
    }
}

impl<C> fmt::Debug for Masked<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Masked")
            .field("config", &type_name::<C>())
            .field("masker", &self.masker)
            .finish()
    }
}

impl<C> Clone for Masked<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Masked<'_, C> {}

impl<C> Serialize for Masked<'_, C>
where
    C: MaskedConfig + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.masker.mask(self.config) {
            Ok(projection) => projection.serialize(serializer),
            Err(cause) => {
                warn_fallback::<C>(&cause);
                self.config.serialize(serializer)
            }
        }
    }
}

/// Masked serialization for every [`MaskedConfig`] that is also `Serialize`.
pub trait MaskedSerializeExt: MaskedConfig + Serialize {
    /// Wraps `self` so it serializes masked.
    fn masked(&self) -> Masked<'_, Self> {
        Masked::new(self)
    }

    /// Wraps `self` so it serializes masked with the given settings.
    fn masked_with(&self, masker: Masker) -> Masked<'_, Self> {
        Masked::with_masker(self, masker)
    }
}

impl<C> MaskedSerializeExt for C where C: MaskedConfig + Serialize {}

/// Serializes a config field masked.
///
/// For use as `#[serde(serialize_with = "configmask::json::serialize")]`.
pub fn serialize<C, S>(config: &C, serializer: S) -> Result<S::Ok, S::Error>
where
    C: MaskedConfig + Serialize,
    S: Serializer,
{
    Masked::new(config).serialize(serializer)
}

/// Like [`serialize`], for `Option` fields. `None` is written as `null`.
#[allow(clippy::ref_option)]
pub fn serialize_option<C, S>(config: &Option<C>, serializer: S) -> Result<S::Ok, S::Error>
where
    C: MaskedConfig + Serialize,
    S: Serializer,
{
    match config {
        Some(config) => Masked::new(config).serialize(serializer),
        None => serializer.serialize_none(),
    }
}
