//! # Error Types
//!
//! Errors raised while constructing core values. Structural problems inside a
//! content pack are not errors at this layer; they are reported as findings by
//! `cleanflow-schema`.

use thiserror::Error;

/// Error constructing a core value from untrusted input.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A language code outside the closed supported set.
    #[error("unknown language code: {0:?}")]
    UnknownLanguage(String),

    /// A version string that is not `MAJOR.MINOR.PATCH`.
    #[error("invalid version format: {0:?} (expected MAJOR.MINOR.PATCH)")]
    InvalidVersion(String),

    /// A configuration file that could not be read, parsed, or failed its invariants.
    #[error("configuration error: {0}")]
    Config(String),
}
