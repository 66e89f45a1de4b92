//! # Completeness
//!
//! Compares a pack against the reference language. Key paths are enumerated
//! by descending into non-empty mappings only; sequences, strings and scalars
//! are leaves, so `sections.daily.items` is one key no matter how many items
//! it holds. A pack counts as having a key when the path exists at any depth,
//! so a reference leaf that became a mapping is not reported as missing.
//! Every finding here is a warning.

use std::collections::HashSet;

use cleanflow_core::{walk, ContentPack, Descend, LanguageCode, PackNode};
use serde_json::Value;

use crate::report::{Finding, FindingKind, ValidationReport};

/// Leaf key paths of `value`, in document order.
pub fn key_paths(value: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    walk(value, |path, node| match node {
        PackNode::Mapping(map) if !map.is_empty() => Descend::Into,
        _ => {
            if !path.is_root() {
                paths.push(path.to_string());
            }
            Descend::Skip
        }
    });
    paths
}

/// Every non-root path of `value`, intermediate mappings included.
fn present_paths(value: &Value) -> HashSet<String> {
    let mut paths = HashSet::new();
    walk(value, |path, node| {
        if !path.is_root() {
            paths.insert(path.to_string());
        }
        match node {
            PackNode::Mapping(_) => Descend::Into,
            _ => Descend::Skip,
        }
    });
    paths
}

/// Warnings for every string leaf in `pack` that is empty or whitespace-only.
///
/// The walk descends into sequences too, so a blank checklist item is
/// reported as `sections.<name>.items.<index>`.
pub fn empty_values(code: LanguageCode, pack: &ContentPack) -> ValidationReport {
    let mut report = ValidationReport::new();
    walk(pack.as_value(), |path, node| {
        if let PackNode::Text(text) = node {
            if !path.is_root() && text.trim().is_empty() {
                report.push(Finding::new(
                    FindingKind::EmptyValue,
                    code,
                    path.to_string(),
                    format!("empty string at {path}"),
                ));
            }
        }
        Descend::Into
    });
    report
}

/// The single warning recorded for a language when the reference pack could
/// not be loaded.
pub fn reference_unavailable(
    code: LanguageCode,
    reference: LanguageCode,
    reason: &str,
) -> Finding {
    Finding::new(
        FindingKind::ReferenceUnavailable,
        code,
        "",
        format!("completeness check skipped: reference pack '{reference}' unavailable ({reason})"),
    )
}

/// Holds the reference pack's key paths so many packs can be compared
/// without re-walking the reference each time.
#[derive(Debug, Clone)]
pub struct CompletenessComparator {
    reference: LanguageCode,
    reference_paths: Vec<String>,
}

impl CompletenessComparator {
    pub fn new(reference: LanguageCode, reference_pack: &ContentPack) -> Self {
        Self {
            reference,
            reference_paths: key_paths(reference_pack.as_value()),
        }
    }

    pub fn reference(&self) -> LanguageCode {
        self.reference
    }

    pub fn reference_paths(&self) -> &[String] {
        &self.reference_paths
    }

    /// One warning per reference key path absent from `pack`, in reference
    /// document order.
    pub fn missing_keys(&self, code: LanguageCode, pack: &ContentPack) -> ValidationReport {
        let present = present_paths(pack.as_value());
        let mut report = ValidationReport::new();
        for path in &self.reference_paths {
            if !present.contains(path) {
                report.push(Finding::new(
                    FindingKind::MissingTranslation,
                    code,
                    path.clone(),
                    format!("missing translation key '{path}'"),
                ));
            }
        }
        if !report.is_empty() {
            tracing::debug!(
                %code,
                reference = %self.reference,
                missing = report.len(),
                "pack is missing reference keys"
            );
        }
        report
    }

    /// Missing-key warnings followed by empty-value warnings.
    pub fn compare(&self, code: LanguageCode, pack: &ContentPack) -> ValidationReport {
        let mut report = self.missing_keys(code, pack);
        report.extend(empty_values(code, pack));
        report
    }
}

/// Compare `pack` against `reference_pack` in one call.
pub fn compare_against_reference(
    code: LanguageCode,
    pack: &ContentPack,
    reference: LanguageCode,
    reference_pack: &ContentPack,
) -> ValidationReport {
    CompletenessComparator::new(reference, reference_pack).compare(code, pack)
}
