//! # Languages
//!
//! The closed set of language codes CleanFlow ships packs for, the writing
//! direction of each, and the configured supported-language table.
//!
//! `LanguageCode` is the sole key into the pack store and into the direction
//! table. Adding a language means adding a variant here; every exhaustive
//! `match` in the workspace then has to handle it.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A language CleanFlow can render.
///
/// | Code | Language | Direction |
/// |------|----------|-----------|
/// | he   | Hebrew   | rtl       |
/// | en   | English  | ltr       |
/// | ru   | Russian  | ltr       |
/// | ar   | Arabic   | rtl       |
/// | zh   | Chinese  | ltr       |
/// | hi   | Hindi    | ltr       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    He,
    En,
    Ru,
    Ar,
    Zh,
    Hi,
}

impl LanguageCode {
    /// Every language code in canonical order.
    pub fn all() -> &'static [LanguageCode] {
        &[Self::He, Self::En, Self::Ru, Self::Ar, Self::Zh, Self::Hi]
    }

    /// The two-letter code, as used in pack paths and `meta.code`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::He => "he",
            Self::En => "en",
            Self::Ru => "ru",
            Self::Ar => "ar",
            Self::Zh => "zh",
            Self::Hi => "hi",
        }
    }

    /// The writing direction the document root should carry for this language.
    pub fn direction(&self) -> TextDirection {
        match self {
            Self::He | Self::Ar => TextDirection::Rtl,
            Self::En | Self::Ru | Self::Zh | Self::Hi => TextDirection::Ltr,
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = CoreError;

    /// Parse a language from its lowercase two-letter code. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "he" => Ok(Self::He),
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            "ar" => Ok(Self::Ar),
            "zh" => Ok(Self::Zh),
            "hi" => Ok(Self::Hi),
            other => Err(CoreError::UnknownLanguage(other.to_string())),
        }
    }
}

/// Writing direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// The value used for the document root's `dir` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ordered list of languages a deployment supports, plus the language
/// shown when no preference is stored and the language other packs are
/// compared against.
///
/// Configured once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    languages: Vec<LanguageCode>,
    default: LanguageCode,
    reference: LanguageCode,
}

impl LanguageTable {
    /// Build a table, checking that the list is non-empty, has no duplicates,
    /// and contains both the default and the reference language.
    pub fn new(
        languages: Vec<LanguageCode>,
        default: LanguageCode,
        reference: LanguageCode,
    ) -> Result<Self, CoreError> {
        if languages.is_empty() {
            return Err(CoreError::Config(
                "supported language list is empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for code in &languages {
            if !seen.insert(*code) {
                return Err(CoreError::Config(format!(
                    "language '{code}' listed more than once"
                )));
            }
        }
        for (role, code) in [("default", default), ("reference", reference)] {
            if !seen.contains(&code) {
                return Err(CoreError::Config(format!(
                    "{role} language '{code}' is not in the supported list"
                )));
            }
        }
        Ok(Self {
            languages,
            default,
            reference,
        })
    }

    /// Whether `code` is one of the supported languages.
    pub fn contains(&self, code: LanguageCode) -> bool {
        self.languages.contains(&code)
    }

    /// Supported languages in configured order.
    pub fn iter(&self) -> impl Iterator<Item = LanguageCode> + '_ {
        self.languages.iter().copied()
    }

    pub fn as_slice(&self) -> &[LanguageCode] {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Language used when no stored preference exists.
    pub fn default_language(&self) -> LanguageCode {
        self.default
    }

    /// Language every other pack is compared against for completeness.
    pub fn reference_language(&self) -> LanguageCode {
        self.reference
    }
}

impl Default for LanguageTable {
    /// All six languages, Hebrew by default, English as the reference.
    fn default() -> Self {
        Self {
            languages: LanguageCode::all().to_vec(),
            default: LanguageCode::He,
            reference: LanguageCode::En,
        }
    }
}
