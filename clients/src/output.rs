//! Rendering of pass results and conformance reports on stdout.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use vmgen_codegen::{Diagnostic, GenerationOutput};
use vmgen_conformance::ConformanceReport;

/// Output format of the binaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per diagnostic or check.
    #[default]
    Text,
    /// A single pretty-printed JSON document.
    Json,
}

#[derive(Serialize)]
struct PassSummary<'a> {
    units: Vec<&'a str>,
    errors: usize,
    cancelled: bool,
    diagnostics: &'a [Diagnostic],
}

/// Renders the outcome of a generation pass.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_pass(output: &GenerationOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let summary = PassSummary {
                units: output.units.iter().map(|u| u.hint_name.as_str()).collect(),
                errors: output.error_count(),
                cancelled: output.cancelled,
                diagnostics: &output.diagnostics,
            };
            Ok(serde_json::to_string_pretty(&summary)?)
        }
        OutputFormat::Text => {
            let mut text = String::new();
            for diagnostic in &output.diagnostics {
                writeln!(text, "{diagnostic}")?;
            }
            writeln!(
                text,
                "{} unit(s) generated, {} error(s), {} warning(s)",
                output.units.len(),
                output.error_count(),
                output.diagnostics.len() - output.error_count()
            )?;
            Ok(text)
        }
    }
}

/// Renders a conformance report.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_report(report: &ConformanceReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            let mut text = String::new();
            writeln!(text, "vmgen Conformance Report")?;
            writeln!(text, "========================")?;
            writeln!(text)?;
            for result in &report.results {
                writeln!(text, "{result}")?;
            }
            writeln!(text)?;
            writeln!(text, "Summary: {}", report.summary())?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmgen_codegen::{DiagnosticCode, EmittedUnit};
    use vmgen_conformance::TestResult;
    use vmgen_model::Span;

    fn output() -> GenerationOutput {
        GenerationOutput {
            units: vec![EmittedUnit {
                hint_name: "Vm.g.cs".into(),
                type_name: "App.Vm".into(),
                text: String::new(),
            }],
            diagnostics: vec![Diagnostic::new(
                DiagnosticCode::InvalidCommandName,
                &Span::new("Vm.cs", 12, 4),
                &["Save", "SaveCommand"],
            )],
            cancelled: false,
        }
    }

    #[test]
    fn text_pass_lists_diagnostics_then_totals() {
        let text = render_pass(&output(), OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("VMG0013"));
        assert_eq!(lines[1], "1 unit(s) generated, 0 error(s), 1 warning(s)");
    }

    #[test]
    fn json_pass_is_a_single_document() {
        let json = render_pass(&output(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["units"][0], "Vm.g.cs");
        assert_eq!(value["errors"], 0);
        assert_eq!(value["diagnostics"][0]["code"], "VMG0013");
    }

    #[test]
    fn report_text_has_summary() {
        let mut report = ConformanceReport::new();
        report.push(TestResult::pass("layout/lines", "Vm.g.cs", "ok"));
        let text = render_report(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("[PASS] layout/lines (Vm.g.cs): ok"));
        assert!(text.ends_with("Summary: 1 checks, 0 failed, 0 warnings\n"));
    }
}
