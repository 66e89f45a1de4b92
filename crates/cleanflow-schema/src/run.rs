//! # Validation Run
//!
//! Validates every supported language in one pass. Packs load concurrently;
//! findings are then assembled per language in table order, so the report is
//! the same regardless of which fetch finished first.

use cleanflow_core::{LanguageCode, LanguageTable};
use cleanflow_pack::{LoadResults, PackSource, PackStore, StoreError};
use serde::Serialize;

use crate::completeness::{empty_values, reference_unavailable, CompletenessComparator};
use crate::report::{Finding, ValidationReport};
use crate::structure::SchemaValidator;

/// Result of a whole validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    /// Languages validated, in table order.
    pub languages: Vec<LanguageCode>,
    pub report: ValidationReport,
}

impl ValidationOutcome {
    /// True when no finding is an error. Warnings never affect this.
    pub fn passed(&self) -> bool {
        !self.report.has_errors()
    }

    /// Process exit code for the run: 0 when all clear, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// Load and validate every language in `table`.
pub async fn validate_all<S: PackSource>(
    store: &PackStore<S>,
    table: &LanguageTable,
) -> ValidationOutcome {
    let loaded = store.load_all(table.as_slice()).await;
    validate_loaded(&loaded, table)
}

/// Validate packs that have already been loaded.
///
/// A language absent from `loaded` is treated as not found.
pub fn validate_loaded(loaded: &LoadResults, table: &LanguageTable) -> ValidationOutcome {
    let reference = table.reference_language();
    let comparator = match loaded.get(&reference) {
        Some(Ok(pack)) => Ok(CompletenessComparator::new(reference, pack)),
        Some(Err(e)) => Err(e.to_string()),
        None => Err("pack not loaded".to_string()),
    };
    if let Err(reason) = &comparator {
        tracing::warn!(
            %reference,
            %reason,
            "reference pack unavailable, skipping completeness checks"
        );
    }

    let validator = SchemaValidator::new();
    let mut report = ValidationReport::new();

    for code in table.iter() {
        let pack = match loaded.get(&code) {
            Some(Ok(pack)) => pack,
            Some(Err(e)) => {
                tracing::debug!(%code, error = %e, "pack failed to load");
                report.push(Finding::from_store_error(code, e));
                continue;
            }
            None => {
                report.push(Finding::from_store_error(code, &StoreError::NotFound { code }));
                continue;
            }
        };

        report.extend(validator.validate_structure(code, pack));
        if code != reference {
            match &comparator {
                Ok(comparator) => report.extend(comparator.missing_keys(code, pack)),
                Err(reason) => report.push(reference_unavailable(code, reference, reason)),
            }
        }
        report.extend(empty_values(code, pack));
    }

    tracing::info!(
        languages = table.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validation finished"
    );

    ValidationOutcome {
        languages: table.as_slice().to_vec(),
        report,
    }
}
