//! Masking of sensitive configuration fields for logs and serialized output.
//!
//! Configuration objects (connector and sink configs, client settings) routinely
//! carry passwords, tokens and truststore passphrases next to values that must
//! be logged verbatim for operability. This crate produces a *redacted
//! projection* of such an object: every declared attribute, in order, with the
//! value of each attribute marked `#[field_doc(sensitive = true)]` replaced by
//! [`MASK_TOKEN`]. The original object is never touched.
//!
//! The pieces, leaves first:
//! - **`shape`**: per-type attribute tables ([`MaskedConfig`], [`ShapeBuilder`])
//!   and [`resolve_attributes`], including attributes spliced in from base types
//! - **`classify`**: [`is_sensitive`], the static per-attribute decision
//! - **`engine`**: [`mask`] / [`Masker`], the cycle-safe traversal
//! - **adapters**: [`json`], [`text`], [`tracing`] and `slog` (feature flag)
//!   outputs that fall back to unmasked default serialization, visibly, when
//!   the engine fails
//!
//! What it does not do:
//! - validate configuration values
//! - support custom mask values or path-based rules
//!
//! ```rust
//! use configmask::{MaskedConfig, text::to_masked_string};
//! use serde::Serialize;
//!
//! #[derive(MaskedConfig, Serialize)]
//! struct SinkConfig {
//!     normal_field: String,
//!     #[field_doc(sensitive = true, help = "Password for the sink")]
//!     sensitive_password: String,
//! }
//!
//! let config = SinkConfig {
//!     normal_field: "visible".into(),
//!     sensitive_password: "hunter2".into(),
//! };
//! let line = to_masked_string(&config);
//! assert_eq!(line, "{normal_field=visible, sensitive_password=********}");
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use configmask_derive::MaskedConfig;

#[allow(unused_extern_crates)]
extern crate self as configmask;

mod classify;
mod engine;
mod error;
pub mod json;
mod render;
mod shape;
#[cfg(feature = "slog")]
pub mod slog;
pub mod text;
pub mod tracing;

pub use classify::{MASK_TOKEN, is_sensitive};
pub use engine::{
    DEFAULT_MAX_DEPTH, Masker, NestedConfig, RedactedProjection, Traversal, mask, mask_option,
};
pub use error::{AttributeError, MaskError, ShapeError};
pub use render::Rendered;
pub use serde_json::Value as JsonValue;
pub use shape::{Attribute, FieldDoc, MaskedConfig, ShapeBuilder, resolve_attributes};

#[doc(hidden)]
pub mod __private {
    pub use serde::Serialize;
}
