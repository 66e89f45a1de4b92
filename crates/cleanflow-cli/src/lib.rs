//! # cleanflow-cli — CLI Tool for CleanFlow
//!
//! Provides the `cleanflow` command-line interface over the validation and
//! rendering crates.
//!
//! ## Subcommands
//!
//! - `cleanflow validate` — Validate every supported locale pack.
//! - `cleanflow render` — Render one language into the standard page and
//!   print the resulting document state.
//! - `cleanflow languages` — List the supported languages.
//! - `cleanflow version next|set` — Compute or stamp the pack version.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success; warnings alone never change this |
//! | 1 | Validation errors, or a fatal error such as a malformed version |
//! | 2 | Usage error, such as an unsupported `--lang` |
//!
//! ```bash
//! cleanflow validate
//! cleanflow validate --format json
//! cleanflow render --lang ar --prefs prefs.json
//! cleanflow version set 1.1.0
//! ```

pub mod languages;
pub mod render;
pub mod validate;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cleanflow_core::CleanflowConfig;
use cleanflow_pack::{FsPackSource, PackStore};

/// Configuration file looked up in the current directory when `--config` is
/// not given.
pub const DEFAULT_CONFIG_FILE: &str = "cleanflow.yaml";

/// Resolve the effective configuration.
///
/// An explicit `config` path must exist. Without one, `cleanflow.yaml` in the
/// current directory is used when present, otherwise built-in defaults.
/// `locales` overrides whatever `locales_dir` the configuration names.
pub fn load_config(config: Option<&Path>, locales: Option<&Path>) -> Result<CleanflowConfig> {
    let mut resolved = match config {
        Some(path) => CleanflowConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                CleanflowConfig::load(&default_path)
                    .with_context(|| format!("failed to load config: {DEFAULT_CONFIG_FILE}"))?
            } else {
                tracing::debug!("no config file, using defaults");
                CleanflowConfig::default()
            }
        }
    };
    if let Some(dir) = locales {
        resolved.locales_dir = dir.to_path_buf();
    }
    tracing::debug!(locales = %resolved.locales_dir.display(), "resolved configuration");
    Ok(resolved)
}

/// A pack store over the configured locales directory.
///
/// # Errors
///
/// Fails when the locales directory does not exist; nothing can be
/// validated or rendered without it.
pub fn pack_store(config: &CleanflowConfig) -> Result<PackStore<FsPackSource>> {
    if !config.locales_dir.is_dir() {
        bail!(
            "locales directory not found: {}",
            config.locales_dir.display()
        );
    }
    Ok(PackStore::new(FsPackSource::new(
        &config.locales_dir,
        &config.pack_file,
    )))
}

/// Single-threaded runtime for driving the async pack store.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}
