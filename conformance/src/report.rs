//! Conformance report types: results, severity levels, and report aggregation.

use std::fmt;

use serde::Serialize;

/// Severity level of a conformance check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The check passed.
    Pass,
    /// The check identified a warning (non-blocking).
    Warning,
    /// The check failed (blocks conformance).
    Failure,
}

impl Severity {
    /// Bracketed tag used in text output.
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Pass => "[PASS]",
            Severity::Warning => "[WARN]",
            Severity::Failure => "[FAIL]",
        }
    }
}

/// A single conformance check result.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    /// Short identifier of the validator that produced this result
    /// (`layout/indentation`, `pass/idempotence`, …).
    pub validator: String,
    /// What was checked: a fixture name, a unit file name, or a table.
    pub subject: String,
    /// Human-readable message describing the outcome.
    pub message: String,
    /// Severity of the result.
    pub severity: Severity,
    /// Offending lines or entries, one per detail.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl TestResult {
    fn new(
        validator: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        details: Vec<String>,
    ) -> Self {
        Self {
            validator: validator.into(),
            subject: subject.into(),
            message: message.into(),
            severity,
            details,
        }
    }

    /// Creates a passing result.
    pub fn pass(
        validator: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(validator, subject, message, Severity::Pass, Vec::new())
    }

    /// Creates a failure result.
    pub fn fail(
        validator: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(validator, subject, message, Severity::Failure, Vec::new())
    }

    /// Creates a failure result with additional detail lines.
    pub fn fail_with_details(
        validator: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self::new(validator, subject, message, Severity::Failure, details)
    }

    /// Creates a warning result.
    pub fn warn(
        validator: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(validator, subject, message, Severity::Warning, Vec::new())
    }

    /// Pass when `issues` is empty, otherwise a failure listing them.
    pub fn from_issues(
        validator: impl Into<String>,
        subject: impl Into<String>,
        ok: impl Into<String>,
        failed: impl Into<String>,
        issues: Vec<String>,
    ) -> Self {
        if issues.is_empty() {
            Self::pass(validator, subject, ok)
        } else {
            Self::fail_with_details(validator, subject, failed, issues)
        }
    }

    /// Returns true if this result represents a failure.
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}): {}",
            self.severity.tag(),
            self.validator,
            self.subject,
            self.message
        )?;
        for detail in &self.details {
            write!(f, "\n       {detail}")?;
        }
        Ok(())
    }
}

/// Aggregated conformance report from all validators.
#[derive(Debug, Default, Serialize)]
pub struct ConformanceReport {
    /// All individual test results across all validators.
    pub results: Vec<TestResult>,
}

impl ConformanceReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result to this report.
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Extends this report with results from another report.
    pub fn extend(&mut self, other: ConformanceReport) {
        self.results.extend(other.results);
    }

    /// Returns the count of failed checks.
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    /// Returns the count of warnings.
    pub fn warning_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.severity == Severity::Warning)
            .count()
    }

    /// Returns true if all checks passed (no failures).
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }

    /// One-line summary: `N checks, F failed, W warnings`.
    pub fn summary(&self) -> String {
        format!(
            "{} checks, {} failed, {} warnings",
            self.results.len(),
            self.failure_count(),
            self.warning_count()
        )
    }
}
