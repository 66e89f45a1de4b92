//! # Configuration
//!
//! Deployment settings read from `cleanflow.yaml`. Every field has a default,
//! so an absent file or a partial file both work.
//!
//! ```yaml
//! locales_dir: locales
//! pack_file: translation.json
//! languages: [he, en, ru, ar, zh, hi]
//! default_language: he
//! reference_language: en
//! preference_key: cleanflow-language
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::language::{LanguageCode, LanguageTable};

/// Preference-store key under which the active language is persisted.
pub const DEFAULT_PREFERENCE_KEY: &str = "cleanflow-language";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanflowConfig {
    /// Directory holding one sub-directory per language code.
    pub locales_dir: PathBuf,
    /// File name of the pack inside each language directory.
    pub pack_file: String,
    /// Supported languages, in selector order.
    pub languages: Vec<LanguageCode>,
    pub default_language: LanguageCode,
    pub reference_language: LanguageCode,
    pub preference_key: String,
}

impl Default for CleanflowConfig {
    fn default() -> Self {
        Self {
            locales_dir: PathBuf::from("locales"),
            pack_file: "translation.json".to_string(),
            languages: LanguageCode::all().to_vec(),
            default_language: LanguageCode::He,
            reference_language: LanguageCode::En,
            preference_key: DEFAULT_PREFERENCE_KEY.to_string(),
        }
    }
}

impl CleanflowConfig {
    /// Parse a configuration document and check its invariants.
    pub fn from_yaml_str(content: &str) -> Result<Self, CoreError> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| CoreError::Config(format!("invalid YAML: {e}")))?;
        config.language_table()?;
        if config.pack_file.is_empty() {
            return Err(CoreError::Config("pack_file must not be empty".to_string()));
        }
        if config.preference_key.is_empty() {
            return Err(CoreError::Config(
                "preference_key must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load from a YAML file. Relative `locales_dir` values are resolved
    /// against the directory containing the file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut config = Self::from_yaml_str(&content)?;
        if config.locales_dir.is_relative() {
            if let Some(base) = path.parent() {
                config.locales_dir = base.join(&config.locales_dir);
            }
        }
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// The supported-language table described by this configuration.
    pub fn language_table(&self) -> Result<LanguageTable, CoreError> {
        LanguageTable::new(
            self.languages.clone(),
            self.default_language,
            self.reference_language,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_layout() {
        let config = CleanflowConfig::default();
        assert_eq!(config.locales_dir, PathBuf::from("locales"));
        assert_eq!(config.pack_file, "translation.json");
        assert_eq!(config.preference_key, "cleanflow-language");
        assert_eq!(config.language_table().unwrap(), LanguageTable::default());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = CleanflowConfig::from_yaml_str("reference_language: he\n").unwrap();
        assert_eq!(config.reference_language, LanguageCode::He);
        assert_eq!(config.default_language, LanguageCode::He);
        assert_eq!(config.languages.len(), 6);
    }

    #[test]
    fn rejects_reference_outside_languages() {
        let err = CleanflowConfig::from_yaml_str(
            "languages: [he, ru]\ndefault_language: he\nreference_language: en\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("reference language 'en'"));
    }

    #[test]
    fn rejects_unknown_language_code() {
        assert!(CleanflowConfig::from_yaml_str("languages: [he, fr]\n").is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(CleanflowConfig::from_yaml_str("locale_dir: x\n").is_err());
    }

    #[test]
    fn load_resolves_locales_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleanflow.yaml");
        std::fs::write(&path, "locales_dir: packs\n").unwrap();
        let config = CleanflowConfig::load(&path).unwrap();
        assert_eq!(config.locales_dir, dir.path().join("packs"));
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CleanflowConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
