//! # Version Subcommand
//!
//! Keeps `meta.version` in step across every pack.
//!
//! ```bash
//! # Print the version after a minor bump of the reference pack's version:
//! cleanflow version next minor
//!
//! # Stamp 1.1.0 into every pack, then validate:
//! cleanflow version set 1.1.0
//! ```
//!
//! A malformed version, whether given on the command line or read from the
//! reference pack, aborts before any file is written.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use cleanflow_core::{ChangeKind, CleanflowConfig, Version};

/// Version subcommand arguments.
#[derive(Args, Debug)]
pub struct VersionArgs {
    #[command(subcommand)]
    pub command: VersionCommand,
}

/// Available version subcommands.
#[derive(Subcommand, Debug)]
pub enum VersionCommand {
    /// Print the next version for a change of the given kind.
    Next {
        #[arg(value_enum)]
        kind: BumpKind,
    },

    /// Write VERSION into every pack's meta.version, then validate.
    Set {
        /// New version, MAJOR.MINOR.PATCH.
        version: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl From<BumpKind> for ChangeKind {
    fn from(kind: BumpKind) -> Self {
        match kind {
            BumpKind::Major => ChangeKind::Major,
            BumpKind::Minor => ChangeKind::Minor,
            BumpKind::Patch => ChangeKind::Patch,
        }
    }
}

/// Execute the version subcommand.
pub fn run_version(args: &VersionArgs, config: &CleanflowConfig) -> Result<u8> {
    match &args.command {
        VersionCommand::Next { kind } => {
            let next = next_version(config, (*kind).into())?;
            println!("{next}");
            Ok(0)
        }
        VersionCommand::Set { version } => run_set(version, config),
    }
}

/// The reference pack's current version bumped by `kind`.
pub fn next_version(config: &CleanflowConfig, kind: ChangeKind) -> Result<Version> {
    let reference = config.reference_language;
    let store = crate::pack_store(config)?;
    let pack = crate::runtime()?
        .block_on(store.load(reference))
        .with_context(|| format!("cannot read reference pack '{reference}'"))?;
    let current = pack
        .meta_version()
        .with_context(|| format!("reference pack '{reference}' has no meta.version"))?;
    let current = Version::parse(current)?;
    Ok(current.bump(kind)?)
}

fn run_set(version: &str, config: &CleanflowConfig) -> Result<u8> {
    let version = Version::parse(version)?;
    let table = config.language_table()?;
    let store = crate::pack_store(config)?;
    let source = store.source();
    let runtime = crate::runtime()?;

    println!("Updating packs to {version}");
    for code in table.iter() {
        let stamped = runtime
            .block_on(source.stamp_version(code, &version))
            .with_context(|| format!("failed to update pack '{code}'"))?;
        if stamped {
            println!("  updated {}", source.pack_path(code).display());
        } else {
            tracing::warn!(%code, "no pack to update");
        }
    }

    let outcome = runtime.block_on(cleanflow_schema::validate_all(&store, &table));
    println!(
        "Validation: {} errors, {} warnings",
        outcome.report.error_count(),
        outcome.report.warning_count()
    );
    for finding in outcome.report.errors() {
        println!("  - {finding}");
    }
    Ok(outcome.exit_code())
}
