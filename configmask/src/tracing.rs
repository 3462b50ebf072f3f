//! Adapters for emitting masked configurations through `tracing`.
//!
//! ```rust
//! use configmask::{MaskedConfig, tracing::TracingMaskedExt};
//! use serde::Serialize;
//!
//! #[derive(MaskedConfig, Serialize)]
//! struct SinkConfig {
//!     topic: String,
//!     #[field_doc(sensitive)]
//!     password: String,
//! }
//!
//! let config = SinkConfig { topic: "events".into(), password: "hunter2".into() };
//! tracing::info!(config = config.tracing_masked(), "opening sink");
//! ```

use serde::Serialize;
use tracing::field::{DisplayValue, display};

use crate::{
    json::to_masked_json,
    shape::MaskedConfig,
    text::to_masked_string,
};

/// Extension trait for logging masked configurations as `tracing` fields.
pub trait TracingMaskedExt {
    /// The masked flat listing, as a display value.
    fn tracing_masked(&self) -> DisplayValue<String>;

    /// The masked JSON text, as a display value.
    fn tracing_masked_json(&self) -> DisplayValue<String>;
}

impl<C> TracingMaskedExt for C
where
    C: MaskedConfig + Serialize,
{
    fn tracing_masked(&self) -> DisplayValue<String> {
        display(to_masked_string(self))
    }

    fn tracing_masked_json(&self) -> DisplayValue<String> {
        display(
            to_masked_json(self)
                .into_output()
                .unwrap_or_else(|| "null".to_owned()),
        )
    }
}
