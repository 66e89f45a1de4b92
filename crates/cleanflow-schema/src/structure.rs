//! # Structural Validation
//!
//! Checks one pack against the required-key schema. A key counts as present
//! only when its value is truthy, so `""`, `null`, `0` and `false` are all
//! reported as missing.
//!
//! ## Ordering
//!
//! Findings come out in a fixed order: top-level keys in schema order, then
//! `meta` sub-keys, then the `meta.code` mismatch, then sections in schema
//! order, then the advisory `meta` checks (warnings).

use cleanflow_core::{
    is_truthy, ContentPack, LanguageCode, Version, META_KEYS, REQUIRED_SECTIONS,
    REQUIRED_TOP_LEVEL_KEYS,
};
use serde_json::Value;

use crate::report::{Finding, FindingKind, ValidationReport};

/// Validates a pack's shape. Stateless; never fails on malformed input.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

fn present<'a>(parent: &'a Value, key: &str) -> Option<&'a Value> {
    parent.get(key).filter(|v| is_truthy(v))
}

/// Render a JSON value the way it appears in mismatch messages.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check `pack`, stored under `code`, against the schema.
    pub fn validate_structure(&self, code: LanguageCode, pack: &ContentPack) -> ValidationReport {
        let mut report = ValidationReport::new();
        let root = pack.as_value();

        for key in REQUIRED_TOP_LEVEL_KEYS {
            if present(root, key).is_none() {
                report.push(Finding::structural(code, key, format!("missing key '{key}'")));
            }
        }

        if let Some(meta) = present(root, "meta") {
            self.check_meta(code, meta, &mut report);
        }

        if let Some(sections) = present(root, "sections") {
            for name in REQUIRED_SECTIONS {
                self.check_section(code, sections, name, &mut report);
            }
        }

        if let Some(meta) = present(root, "meta") {
            self.check_meta_advisories(code, meta, &mut report);
        }

        tracing::debug!(
            %code,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "structural validation finished"
        );
        report
    }

    fn check_meta(&self, code: LanguageCode, meta: &Value, report: &mut ValidationReport) {
        for key in META_KEYS {
            if present(meta, key).is_none() {
                let path = format!("meta.{key}");
                report.push(Finding::structural(
                    code,
                    path.clone(),
                    format!("missing key '{path}'"),
                ));
            }
        }

        if let Some(found) = present(meta, "code") {
            if found.as_str() != Some(code.as_str()) {
                report.push(Finding::structural(
                    code,
                    "meta.code",
                    format!(
                        "meta.code mismatch: stored under '{code}' but declares {}",
                        describe(found)
                    ),
                ));
            }
        }
    }

    fn check_section(
        &self,
        code: LanguageCode,
        sections: &Value,
        name: &str,
        report: &mut ValidationReport,
    ) {
        let base = format!("sections.{name}");
        let Some(section) = present(sections, name) else {
            report.push(Finding::structural(
                code,
                base,
                format!("missing section '{name}'"),
            ));
            return;
        };

        for key in ["title", "emoji"] {
            if present(section, key).is_none() {
                report.push(Finding::structural(
                    code,
                    format!("{base}.{key}"),
                    format!("missing key '{base}.{key}'"),
                ));
            }
        }

        if let Some(items) = present(section, "items") {
            if !items.is_array() {
                report.push(Finding::structural(
                    code,
                    format!("{base}.items"),
                    format!("{base}.items must be a sequence"),
                ));
            }
        }
    }

    fn check_meta_advisories(
        &self,
        code: LanguageCode,
        meta: &Value,
        report: &mut ValidationReport,
    ) {
        if let Some(direction) = present(meta, "direction").and_then(Value::as_str) {
            let expected = code.direction();
            if direction != expected.as_str() {
                report.push(Finding::new(
                    FindingKind::DirectionMismatch,
                    code,
                    "meta.direction",
                    format!("direction '{direction}' differs from expected '{expected}'"),
                ));
            }
        }

        if let Some(version) = present(meta, "version").and_then(Value::as_str) {
            if Version::parse(version).is_err() {
                report.push(Finding::new(
                    FindingKind::VersionFormat,
                    code,
                    "meta.version",
                    format!("meta.version '{version}' is not in MAJOR.MINOR.PATCH form"),
                ));
            }
        }
    }
}
