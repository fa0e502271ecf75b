//! Diagnostic table stability.
//!
//! Downstream tooling filters on diagnostic ids, so the table is pinned:
//! ids are `VMG` plus four digits, numbered from 1 without gaps, and each
//! id keeps its severity forever. Message templates must use their
//! placeholders contiguously from `{0}`.

use regex::Regex;
use vmgen_codegen::{DiagnosticCode, Severity};

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "diagnostics/table";

/// The released table: id and severity of every code.
const PINNED: [(&str, Severity); 15] = [
    ("VMG0001", Severity::Error),
    ("VMG0002", Severity::Error),
    ("VMG0003", Severity::Warning),
    ("VMG0004", Severity::Error),
    ("VMG0005", Severity::Error),
    ("VMG0006", Severity::Error),
    ("VMG0007", Severity::Error),
    ("VMG0008", Severity::Warning),
    ("VMG0009", Severity::Error),
    ("VMG0010", Severity::Error),
    ("VMG0011", Severity::Error),
    ("VMG0012", Severity::Error),
    ("VMG0013", Severity::Warning),
    ("VMG0014", Severity::Error),
    ("VMG0015", Severity::Error),
];

/// Validates the diagnostic code table against the released one.
///
/// # Errors
///
/// Returns an error if the id pattern fails to compile.
pub fn validate() -> anyhow::Result<ConformanceReport> {
    let id_shape = Regex::new(r"^VMG\d{4}$")?;
    let placeholder = Regex::new(r"\{(\d+)\}")?;
    let mut report = ConformanceReport::new();

    let mut drift = Vec::new();
    if DiagnosticCode::ALL.len() != PINNED.len() {
        drift.push(format!(
            "{} codes defined, {} released",
            DiagnosticCode::ALL.len(),
            PINNED.len()
        ));
    }
    for (index, (code, (id, severity))) in DiagnosticCode::ALL.iter().zip(PINNED).enumerate() {
        let actual = code.id();
        if !id_shape.is_match(&actual) {
            drift.push(format!("{actual}: malformed id"));
        }
        if usize::from(code.number()) != index + 1 {
            drift.push(format!("{actual}: out of order at position {}", index + 1));
        }
        if actual != id {
            drift.push(format!("{actual}: released as {id}"));
        }
        if code.severity() != severity {
            drift.push(format!(
                "{actual}: severity {} was released as {}",
                code.severity().as_str(),
                severity.as_str()
            ));
        }
    }
    report.push(TestResult::from_issues(
        VALIDATOR,
        "codes",
        "ids and severities match the released table",
        "diagnostic table drifted",
        drift,
    ));

    let mut gaps = Vec::new();
    for code in DiagnosticCode::ALL {
        let template = code.template();
        let mut used: Vec<usize> = placeholder
            .captures_iter(template)
            .filter_map(|c| c[1].parse().ok())
            .collect();
        used.sort_unstable();
        used.dedup();
        if used.iter().enumerate().any(|(i, n)| i != *n) {
            gaps.push(format!("{}: placeholders {used:?} are not contiguous", code.id()));
        }
        if code.title().is_empty() {
            gaps.push(format!("{}: empty title", code.id()));
        }
    }
    report.push(TestResult::from_issues(
        VALIDATOR,
        "templates",
        "every template numbers its placeholders from {0}",
        "malformed message templates",
        gaps,
    ));
    Ok(report)
}
