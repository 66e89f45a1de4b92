//! # Pack Store
//!
//! Turns source bytes into parsed packs. Loading is per language and
//! independent: `load_all` drives every fetch concurrently on the caller's
//! executor and returns only once each one has settled.

use std::collections::BTreeMap;

use cleanflow_core::{ContentPack, LanguageCode};
use futures::future::join_all;

use crate::error::StoreError;
use crate::source::PackSource;

/// Outcome of loading a set of languages, one entry per requested code.
pub type LoadResults = BTreeMap<LanguageCode, Result<ContentPack, StoreError>>;

/// Resolves language codes to parsed content packs.
#[derive(Debug, Clone)]
pub struct PackStore<S> {
    source: S,
}

impl<S: PackSource> PackStore<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load and parse the pack for `code`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] when the source has no blob for `code`.
    /// - [`StoreError::InvalidEncoding`] when the blob does not parse.
    /// - [`StoreError::Unreadable`] when the source itself fails.
    pub async fn load(&self, code: LanguageCode) -> Result<ContentPack, StoreError> {
        let location = self.source.location(code);
        let bytes = self
            .source
            .fetch(code)
            .await
            .map_err(|source| StoreError::Unreadable { code, source })?
            .ok_or(StoreError::NotFound { code })?;

        let pack = ContentPack::from_slice(&bytes).map_err(|e| StoreError::InvalidEncoding {
            code,
            message: e.to_string(),
        })?;
        tracing::debug!(%code, %location, bytes = bytes.len(), "loaded pack");
        Ok(pack)
    }

    /// Load every code in `codes`, concurrently and independently.
    ///
    /// Duplicate codes are loaded once.
    pub async fn load_all(&self, codes: &[LanguageCode]) -> LoadResults {
        let mut unique = codes.to_vec();
        unique.sort();
        unique.dedup();

        let loads = unique
            .into_iter()
            .map(|code| async move { (code, self.load(code).await) });
        let results: LoadResults = join_all(loads).await.into_iter().collect();

        let failed = results.values().filter(|r| r.is_err()).count();
        tracing::debug!(requested = results.len(), failed, "finished loading packs");
        results
    }
}
