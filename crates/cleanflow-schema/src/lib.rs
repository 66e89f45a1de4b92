//! # cleanflow-schema — Content Pack Validation
//!
//! The offline validation path. Every supported pack is checked for
//! structural validity, and every pack other than the reference language is
//! compared with the reference for missing keys. Findings are collected into
//! one [`ValidationReport`]; nothing here returns `Err` for a bad pack.
//!
//! ## Severity
//!
//! | Kind | Severity |
//! |------|----------|
//! | pack not found, invalid encoding, unreadable | error |
//! | structural (missing key, missing section, bad `items`) | error |
//! | missing translation key, empty string | warning |
//! | reference unavailable, direction mismatch, version format | warning |
//!
//! Only errors fail a run. [`ValidationOutcome::exit_code`] follows the
//! command-line convention: 0 for all clear, 1 when any error was found.

pub mod completeness;
pub mod report;
pub mod run;
pub mod structure;

pub use completeness::{
    compare_against_reference, empty_values, key_paths, reference_unavailable,
    CompletenessComparator,
};
pub use report::{Finding, FindingKind, Severity, ValidationReport};
pub use run::{validate_all, validate_loaded, ValidationOutcome};
pub use structure::SchemaValidator;
