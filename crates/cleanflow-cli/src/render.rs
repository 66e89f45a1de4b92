//! # Render Subcommand
//!
//! Loads every pack, starts a rendering session the way the page does
//! (stored preference, else the default language), optionally switches
//! language, and prints the rendered document as JSON.
//!
//! ```bash
//! cleanflow render
//! cleanflow render --lang ru --prefs ~/.cleanflow-prefs.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use cleanflow_core::{CleanflowConfig, LanguageCode};
use cleanflow_hydrate::{
    HydrateError, HydrationEngine, JsonFilePreferenceStore, LanguageContext, MemoryDocument,
    MemoryPreferenceStore, PreferenceStore,
};

/// Exit code for a language request outside the supported table.
pub const EXIT_USAGE: u8 = 2;

/// Arguments for the `render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Switch to this language after startup.
    #[arg(long)]
    pub lang: Option<String>,

    /// JSON file holding the stored language preference. Without it the
    /// preference lives only for this run.
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Checklist slots per section in the preview page.
    #[arg(long, default_value_t = 4)]
    pub items: usize,
}

#[derive(Serialize)]
struct RenderOutput<'a> {
    language: LanguageCode,
    document: &'a MemoryDocument,
}

/// Execute the render subcommand.
pub fn run_render(args: &RenderArgs, config: &CleanflowConfig) -> Result<u8> {
    let Some((context, document)) = render(args, config)? else {
        return Ok(EXIT_USAGE);
    };
    let output = RenderOutput {
        language: context.current(),
        document: &document,
    };
    let json = serde_json::to_string_pretty(&output).context("failed to encode document")?;
    println!("{json}");
    Ok(0)
}

/// Render into a fresh preview page. Returns `None` when `--lang` names an
/// unsupported language.
pub fn render(
    args: &RenderArgs,
    config: &CleanflowConfig,
) -> Result<Option<(LanguageContext, MemoryDocument)>> {
    let table = config.language_table()?;
    let store = crate::pack_store(config)?;
    let loaded = crate::runtime()?.block_on(store.load_all(table.as_slice()));
    let engine =
        HydrationEngine::from_loaded(table, loaded).with_preference_key(&config.preference_key);

    let mut prefs: Box<dyn PreferenceStore> = match &args.prefs {
        Some(path) => Box::new(JsonFilePreferenceStore::new(path)),
        None => Box::new(MemoryPreferenceStore::new()),
    };
    let mut document = MemoryDocument::page(args.items);
    let mut context = engine.startup(prefs.as_ref(), &mut document);

    if let Some(requested) = &args.lang {
        match engine.change_language(&mut context, requested, prefs.as_mut(), &mut document) {
            Ok(()) => {}
            Err(HydrateError::UnsupportedLanguage { requested }) => {
                let supported: Vec<&str> =
                    engine.languages().iter().map(|c| c.as_str()).collect();
                eprintln!(
                    "error: unsupported language '{requested}' (supported: {})",
                    supported.join(", ")
                );
                return Ok(None);
            }
            Err(e) => tracing::warn!(error = %e, "language switched but preference not saved"),
        }
    }

    Ok(Some((context, document)))
}
