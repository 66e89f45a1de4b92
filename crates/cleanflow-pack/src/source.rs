//! # Pack Sources
//!
//! A pack source hands out the raw bytes stored for a language. Absence is a
//! normal answer (`Ok(None)`), distinct from a source that failed.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cleanflow_core::{ContentPack, LanguageCode, Version};
use serde_json::{Map, Value};

use crate::error::StoreError;

/// Byte-level access to stored packs, keyed by language code.
///
/// Implementations must be `Send + Sync` so independent fetches can be
/// in flight at the same time. Timeouts and retries belong to the
/// implementation; the store waits for whatever the source returns.
#[async_trait]
pub trait PackSource: Send + Sync {
    /// Fetch the blob stored for `code`, or `None` if there is none.
    async fn fetch(&self, code: LanguageCode) -> io::Result<Option<Vec<u8>>>;

    /// Human-readable location of the pack for `code` (for diagnostics).
    fn location(&self, code: LanguageCode) -> String;
}

// ─── FsPackSource ───────────────────────────────────────────────────────

/// Reads packs from `<root>/<code>/<pack_file>`.
#[derive(Debug, Clone)]
pub struct FsPackSource {
    root: PathBuf,
    pack_file: String,
}

impl FsPackSource {
    pub fn new(root: impl Into<PathBuf>, pack_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            pack_file: pack_file.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the pack file for `code`.
    pub fn pack_path(&self, code: LanguageCode) -> PathBuf {
        self.root.join(code.as_str()).join(&self.pack_file)
    }

    /// Rewrite `meta.version` in the pack for `code`, keeping key order.
    ///
    /// Returns `Ok(false)` without touching anything when the pack does not
    /// exist. The file is written back as two-space-indented JSON with a
    /// trailing newline.
    pub async fn stamp_version(
        &self,
        code: LanguageCode,
        version: &Version,
    ) -> Result<bool, StoreError> {
        let path = self.pack_path(code);
        let Some(bytes) = self
            .fetch(code)
            .await
            .map_err(|source| StoreError::Unreadable { code, source })?
        else {
            return Ok(false);
        };

        let mut pack = ContentPack::from_slice(&bytes).map_err(|e| StoreError::InvalidEncoding {
            code,
            message: e.to_string(),
        })?;
        let Value::Object(root) = pack.value_mut() else {
            return Err(StoreError::InvalidEncoding {
                code,
                message: "pack root is not a mapping".to_string(),
            });
        };
        let meta = root
            .entry("meta")
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(meta) = meta else {
            return Err(StoreError::InvalidEncoding {
                code,
                message: "meta is not a mapping".to_string(),
            });
        };
        meta.insert("version".to_string(), Value::String(version.to_string()));

        let mut out = serde_json::to_string_pretty(pack.as_value()).map_err(|e| {
            StoreError::InvalidEncoding {
                code,
                message: e.to_string(),
            }
        })?;
        out.push('\n');
        tokio::fs::write(&path, out)
            .await
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::info!(%code, path = %path.display(), %version, "stamped pack version");
        Ok(true)
    }
}

#[async_trait]
impl PackSource for FsPackSource {
    async fn fetch(&self, code: LanguageCode) -> io::Result<Option<Vec<u8>>> {
        let path = self.pack_path(code);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn location(&self, code: LanguageCode) -> String {
        self.pack_path(code).display().to_string()
    }
}

// ─── MemoryPackSource ───────────────────────────────────────────────────

/// Serves blobs held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPackSource {
    blobs: HashMap<LanguageCode, Vec<u8>>,
}

impl MemoryPackSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` as the blob for `code`, replacing any previous one.
    pub fn insert(&mut self, code: LanguageCode, bytes: impl Into<Vec<u8>>) {
        self.blobs.insert(code, bytes.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, code: LanguageCode, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(code, bytes);
        self
    }

    /// Store the JSON serialization of `value` for `code`.
    pub fn with_json(self, code: LanguageCode, value: &Value) -> Self {
        self.with(code, value.to_string())
    }
}

#[async_trait]
impl PackSource for MemoryPackSource {
    async fn fetch(&self, code: LanguageCode) -> io::Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(&code).cloned())
    }

    fn location(&self, code: LanguageCode) -> String {
        format!("memory:{code}")
    }
}
