//! # Store Errors

use std::path::PathBuf;

use cleanflow_core::LanguageCode;
use thiserror::Error;

/// Why a pack could not be produced for a language.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No blob exists for the language.
    #[error("pack not found for '{code}'")]
    NotFound {
        code: LanguageCode,
    },

    /// A blob exists but does not parse as a pack.
    #[error("invalid encoding for '{code}': {message}")]
    InvalidEncoding {
        code: LanguageCode,
        /// The parser's own message.
        message: String,
    },

    /// The source failed for a reason other than absence.
    #[error("cannot read pack for '{code}': {source}")]
    Unreadable {
        code: LanguageCode,
        #[source]
        source: std::io::Error,
    },

    /// A rewritten pack could not be written back.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// The language the failure concerns, when there is one.
    pub fn code(&self) -> Option<LanguageCode> {
        match self {
            Self::NotFound { code }
            | Self::InvalidEncoding { code, .. }
            | Self::Unreadable { code, .. } => Some(*code),
            Self::Write { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
