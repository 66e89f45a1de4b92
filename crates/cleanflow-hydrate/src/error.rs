use std::path::PathBuf;

use thiserror::Error;

/// Errors from the rendering path.
///
/// Missing document elements and missing pack fields are never errors; the
/// engine skips those assignments.
#[derive(Error, Debug)]
pub enum HydrateError {
    /// A language change to a code outside the supported table. State and
    /// document are left as they were.
    #[error("unsupported language: {requested:?}")]
    UnsupportedLanguage { requested: String },

    /// The preference file could not be read or written.
    #[error("preference store {path}: {message}")]
    Preference { path: PathBuf, message: String },
}
