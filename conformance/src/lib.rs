//! vmgen conformance suite.
//!
//! Checks the generator against the contracts its output promises to keep,
//! independently of the unit tests of the individual crates.
//!
//! # Conformance Scope
//!
//! | Check | Contract |
//! |-------|----------|
//! | Diagnostic table | ids `VMG0001..` never renumbered, severities fixed |
//! | Fixture passes | expected diagnostics and units per snapshot |
//! | Idempotence | two passes over one snapshot are byte-identical |
//! | Line layout | indentation equals brace depth, no trailing whitespace |
//!
//! # Entry Point
//!
//! ```no_run
//! use vmgen_conformance::{run_all, SuiteConfig};
//! use std::path::PathBuf;
//!
//! let config = SuiteConfig {
//!     generated: Some(PathBuf::from("obj/generated")),
//!     ..SuiteConfig::default()
//! };
//! let report = run_all(&config).expect("Failed to run conformance");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod fixtures;
pub mod report;
pub mod validators;

use std::path::PathBuf;

use vmgen_codegen::GeneratorOptions;

pub use report::{ConformanceReport, Severity, TestResult};

/// Inputs of a conformance run.
#[derive(Debug, Clone, Default)]
pub struct SuiteConfig {
    /// Options the fixture passes run with.
    pub generator: GeneratorOptions,
    /// Directory of previously generated `*.g.cs` files to check as well.
    pub generated: Option<PathBuf>,
}

/// Runs all conformance validators and returns the aggregated report.
///
/// Validators are run in this order:
/// 1. Diagnostic table stability
/// 2. Fixture passes (diagnostics, units, idempotence, layout)
/// 3. Layout of the files under [`SuiteConfig::generated`], if set
///
/// # Errors
///
/// Returns an error only if a fixture cannot be generated or a file cannot
/// be read.
pub fn run_all(config: &SuiteConfig) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    report.extend(validators::codes::validate()?);
    report.extend(validators::pass::validate(&config.generator)?);
    if let Some(dir) = &config.generated {
        report.extend(validators::layout::validate_dir(
            dir,
            config.generator.indent_width,
        )?);
    }

    Ok(report)
}
