//! Textual output of masked configurations, for log lines.
//!
//! The format is a flat `{name=value, other=value}` listing: strings are
//! written bare, other values as JSON text, absent values as `null`.

use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{
    engine::{Masker, write_flat},
    render::{Rendered, render},
    shape::MaskedConfig,
};

/// Displays any JSON value in the flat listing style.
struct Flat<'a>(&'a JsonValue);

impl fmt::Display for Flat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            JsonValue::Object(map) => {
                write_flat(f, map.iter().map(|(key, value)| (key.as_str(), value)))
            }
            JsonValue::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}

impl Masker {
    /// Renders `config` as a flat listing, masked when the engine succeeds.
    pub fn render_text<C>(&self, config: &C) -> Rendered<String>
    where
        C: MaskedConfig + Serialize,
    {
        render(
            self,
            config,
            |projection| projection.to_string(),
            |config| serde_json::to_value(config).map(|value| Flat(&value).to_string()),
        )
    }
}

/// Renders `config` as a flat listing with default settings.
pub fn render_text<C>(config: &C) -> Rendered<String>
where
    C: MaskedConfig + Serialize,
{
    Masker::new().render_text(config)
}

/// Returns the masked flat listing of `config`.
///
/// Falls back to the unmasked listing when the engine fails, and to `{..}`
/// when the config cannot be serialized at all.
pub fn to_masked_string<C>(config: &C) -> String
where
    C: MaskedConfig + Serialize,
{
    render_text(config)
        .into_output()
        .unwrap_or_else(|| "{..}".to_owned())
}

/// `Display` wrapper that writes the masked flat listing of a config.
pub struct MaskedDisplay<'a, C> {
    config: &'a C,
    masker: Masker,
}

impl<C> fmt::Display for MaskedDisplay<'_, C>
where
    C: MaskedConfig + Serialize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.masker.render_text(self.config).into_output() {
            Some(text) => f.write_str(&text),
            None => f.write_str("{..}"),
        }
    }
}

impl<C> fmt::Debug for MaskedDisplay<'_, C>
where
    C: MaskedConfig + Serialize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Extension trait to obtain a [`MaskedDisplay`].
pub trait MaskedDisplayExt: MaskedConfig + Serialize {
    fn masked_display(&self) -> MaskedDisplay<'_, Self> {
        self.masked_display_with(Masker::new())
    }

    fn masked_display_with(&self, masker: Masker) -> MaskedDisplay<'_, Self> {
        MaskedDisplay {
            config: self,
            masker,
        }
    }
}

impl<C> MaskedDisplayExt for C where C: MaskedConfig + Serialize {}

/// Writes the value as JSON text inside `Debug` output.
struct JsonText<'a>(&'a JsonValue);

impl fmt::Debug for JsonText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `Debug` body used by `#[derive(MaskedConfig)]`.
///
/// Writes `Name { field: value, .. }` from the redacted projection. If the
/// engine fails nothing but the type name is written: `Debug` has no unmasked
/// fallback.
#[doc(hidden)]
pub fn fmt_masked_debug<C: MaskedConfig>(
    config: &C,
    name: &str,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match Masker::new().mask(config) {
        Ok(projection) => {
            let mut debug = f.debug_struct(name);
            for (key, value) in &projection {
                debug.field(key, &JsonText(value));
            }
            debug.finish()
        }
        Err(_) => f.debug_struct(name).finish_non_exhaustive(),
    }
}
