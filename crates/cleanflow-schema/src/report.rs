//! # Validation Reports
//!
//! A report is an ordered list of findings. Each finding names the language,
//! a dotted path into the pack, and a message. Errors block a release;
//! warnings are advisory and never change the outcome.

use std::fmt;

use cleanflow_core::LanguageCode;
use cleanflow_pack::StoreError;
use serde::Serialize;

/// Whether a finding blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// What a finding is about. The severity follows from the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// No pack stored for the language.
    NotFound,
    /// The pack blob does not parse.
    InvalidEncoding,
    /// The pack source failed while reading.
    Unreadable,
    /// A schema-required key or shape is missing.
    Structural,
    /// A key present in the reference pack is absent.
    MissingTranslation,
    /// A string leaf is empty or whitespace-only.
    EmptyValue,
    /// The reference pack could not be loaded, so comparison was skipped.
    ReferenceUnavailable,
    /// `meta.direction` disagrees with the language's writing direction.
    DirectionMismatch,
    /// `meta.version` is not `MAJOR.MINOR.PATCH`.
    VersionFormat,
}

impl FindingKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::NotFound | Self::InvalidEncoding | Self::Unreadable | Self::Structural => {
                Severity::Error
            }
            Self::MissingTranslation
            | Self::EmptyValue
            | Self::ReferenceUnavailable
            | Self::DirectionMismatch
            | Self::VersionFormat => Severity::Warning,
        }
    }
}

/// One problem found in one pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub kind: FindingKind,
    pub code: LanguageCode,
    /// Dotted path into the pack; empty when the finding concerns the whole pack.
    pub path: String,
    pub message: String,
}

impl Finding {
    pub fn new(
        kind: FindingKind,
        code: LanguageCode,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            code,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn structural(
        code: LanguageCode,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(FindingKind::Structural, code, path, message)
    }

    /// The finding recorded when a pack could not be loaded at all.
    pub fn from_store_error(code: LanguageCode, err: &StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => {
                Self::new(FindingKind::NotFound, code, "", "pack not found")
            }
            StoreError::InvalidEncoding { message, .. } => Self::new(
                FindingKind::InvalidEncoding,
                code,
                "",
                format!("invalid encoding: {message}"),
            ),
            StoreError::Unreadable { source, .. } => Self::new(
                FindingKind::Unreadable,
                code,
                "",
                format!("cannot read pack: {source}"),
            ),
            StoreError::Write { .. } => {
                debug_assert!(false, "write failure reported as a load result: {err}");
                Self::new(FindingKind::Unreadable, code, "", err.to_string())
            }
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Ordered findings from one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Append every finding of `other`, keeping its order.
    pub fn extend(&mut self, other: ValidationReport) {
        self.findings.extend(other.findings);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn into_inner(self) -> Vec<Finding> {
        self.findings
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Findings concerning one language.
    pub fn for_language(&self, code: LanguageCode) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.code == code)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, finding) in self.findings.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {finding}")?;
        }
        Ok(())
    }
}
