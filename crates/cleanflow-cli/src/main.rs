//! # cleanflow CLI entry point
//!
//! Parses command-line arguments, installs logging, resolves configuration
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cleanflow_cli::languages::run_languages;
use cleanflow_cli::render::{run_render, RenderArgs};
use cleanflow_cli::validate::{run_validate, ValidateArgs};
use cleanflow_cli::version::{run_version, VersionArgs};

/// CleanFlow locale tooling.
///
/// Validates the per-language content packs, previews how a pack renders
/// onto the page, and keeps pack versions in step.
#[derive(Parser, Debug)]
#[command(name = "cleanflow", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./cleanflow.yaml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Locales directory, overriding the configuration.
    #[arg(long, global = true)]
    locales: Option<PathBuf>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every supported locale pack.
    Validate(ValidateArgs),

    /// Render a language into the preview page and print it as JSON.
    Render(RenderArgs),

    /// List supported languages.
    Languages,

    /// Compute or stamp the pack version.
    Version(VersionArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    match cli.log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
    }

    tracing::debug!("cleanflow CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = cleanflow_cli::load_config(cli.config.as_deref(), cli.locales.as_deref())
        .and_then(|config| match &cli.command {
            Commands::Validate(args) => run_validate(args, &config),
            Commands::Render(args) => run_render(args, &config),
            Commands::Languages => run_languages(&config),
            Commands::Version(args) => run_version(args, &config),
        });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
