//! # Preference Stores
//!
//! Where the active language is remembered between runs. The engine only
//! needs `get` and `set` on string keys.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::HydrateError;

/// Key-value persistence for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, HydrateError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), HydrateError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, HydrateError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), HydrateError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in one file. A missing file reads
/// as empty and is created on the first `set`.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, message: impl ToString) -> HydrateError {
        HydrateError::Preference {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, HydrateError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| self.error(e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(self.error(e)),
        }
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, HydrateError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), HydrateError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        let mut out = serde_json::to_string_pretty(&values).map_err(|e| self.error(e))?;
        out.push('\n');
        std::fs::write(&self.path, out).map_err(|e| self.error(e))?;
        tracing::debug!(path = %self.path.display(), key, "saved preference");
        Ok(())
    }
}
