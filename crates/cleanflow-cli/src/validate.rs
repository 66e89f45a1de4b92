//! # Validate Subcommand
//!
//! Validates every supported pack and prints the report. The exit code is 0
//! when there are no errors and 1 otherwise; warnings are printed but never
//! fail the run.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use cleanflow_core::CleanflowConfig;
use cleanflow_schema::{validate_all, Finding, ValidationOutcome};

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    passed: bool,
    errors: usize,
    warnings: usize,
    #[serde(flatten)]
    outcome: &'a ValidationOutcome,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &CleanflowConfig) -> Result<u8> {
    let outcome = validate(config)?;
    match args.format {
        OutputFormat::Text => print_text(&outcome, config),
        OutputFormat::Json => {
            let report = JsonReport {
                passed: outcome.passed(),
                errors: outcome.report.error_count(),
                warnings: outcome.report.warning_count(),
                outcome: &outcome,
            };
            let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
            println!("{json}");
        }
    }
    Ok(outcome.exit_code())
}

/// Run a validation pass over the configured locales directory.
pub fn validate(config: &CleanflowConfig) -> Result<ValidationOutcome> {
    let table = config.language_table()?;
    let store = crate::pack_store(config)?;
    let runtime = crate::runtime()?;
    Ok(runtime.block_on(validate_all(&store, &table)))
}

fn print_section<'a>(heading: &str, findings: impl Iterator<Item = &'a Finding>) {
    let mut findings = findings.peekable();
    if findings.peek().is_none() {
        return;
    }
    println!();
    println!("{heading}:");
    for finding in findings {
        println!("  - {finding}");
    }
}

fn print_text(outcome: &ValidationOutcome, config: &CleanflowConfig) {
    let codes: Vec<&str> = outcome.languages.iter().map(|c| c.as_str()).collect();
    println!(
        "Validating {} ({} languages, reference: {})",
        config.locales_dir.display(),
        codes.len(),
        config.reference_language
    );
    println!("  languages: {}", codes.join(", "));

    let report = &outcome.report;
    print_section("Errors", report.errors());
    print_section("Warnings", report.warnings());

    println!();
    println!(
        "Summary: {} errors, {} warnings",
        report.error_count(),
        report.warning_count()
    );
    if outcome.passed() {
        println!("OK: all packs valid");
    } else {
        println!("FAIL: validation errors found");
    }
}
