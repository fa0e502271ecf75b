//! Whole-pass validators run against the bundled fixtures.
//!
//! For each fixture the pass must report exactly the expected diagnostic
//! ids, emit exactly the expected units, lay every unit out correctly and
//! produce byte-identical output when run a second time.

use anyhow::{Context, Result};
use vmgen_codegen::{generate, CancellationToken, GenerationOutput, GeneratorOptions};
use vmgen_model::TypeGraph;

use crate::fixtures::{self, Fixture};
use crate::report::{ConformanceReport, TestResult};
use crate::validators::layout::{self, LineRules};

/// Validates every bundled fixture under `options`.
///
/// # Errors
///
/// Returns an error if a fixture does not parse or a pass fails internally.
pub fn validate(options: &GeneratorOptions) -> Result<ConformanceReport> {
    let rules = LineRules::new(options.indent_width)?;
    let mut report = ConformanceReport::new();
    for fixture in fixtures::all() {
        report.extend(validate_fixture(&fixture, options, &rules)?);
    }
    Ok(report)
}

fn run(graph: &TypeGraph, options: &GeneratorOptions) -> Result<GenerationOutput> {
    Ok(generate(graph, options, &CancellationToken::new())?)
}

fn validate_fixture(
    fixture: &Fixture,
    options: &GeneratorOptions,
    rules: &LineRules,
) -> Result<ConformanceReport> {
    let graph = TypeGraph::from_json(fixture.graph)
        .with_context(|| format!("fixture {} does not parse", fixture.name))?;
    let first = run(&graph, options)?;
    let second = run(&graph, options)?;
    let mut report = ConformanceReport::new();

    let mut codes: Vec<String> = first.diagnostics.iter().map(|d| d.code.id()).collect();
    codes.sort_unstable();
    if codes == fixture.expected_codes {
        report.push(TestResult::pass(
            "pass/diagnostics",
            fixture.name,
            format!("{} diagnostic(s) as expected", codes.len()),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            "pass/diagnostics",
            fixture.name,
            "unexpected diagnostics",
            vec![
                format!("expected: {}", fixture.expected_codes.join(", ")),
                format!("actual:   {}", codes.join(", ")),
            ],
        ));
    }

    let names: Vec<&str> = first.units.iter().map(|u| u.hint_name.as_str()).collect();
    if names == fixture.expected_units {
        report.push(TestResult::pass(
            "pass/units",
            fixture.name,
            format!("{} unit(s) as expected", names.len()),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            "pass/units",
            fixture.name,
            "unexpected units",
            vec![
                format!("expected: {}", fixture.expected_units.join(", ")),
                format!("actual:   {}", names.join(", ")),
            ],
        ));
    }

    let mut drift = Vec::new();
    if first.units != second.units {
        drift.push("emitted units differ between runs".to_string());
    }
    if first.diagnostics != second.diagnostics {
        drift.push("diagnostics differ between runs".to_string());
    }
    report.push(TestResult::from_issues(
        "pass/idempotence",
        fixture.name,
        "two runs are byte-identical",
        "output is not deterministic",
        drift,
    ));

    for unit in &first.units {
        let subject = format!("{}/{}", fixture.name, unit.hint_name);
        report.extend(layout::validate_unit(rules, &subject, &unit.text));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_fixtures_conform() {
        let report = validate(&GeneratorOptions::default()).unwrap();
        let failures: Vec<String> = report
            .results
            .iter()
            .filter(|r| r.is_failure())
            .map(ToString::to_string)
            .collect();
        assert!(failures.is_empty(), "{}", failures.join("\n"));
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn fixtures_conform_at_other_widths() {
        let options = GeneratorOptions {
            indent_width: 2,
            ..GeneratorOptions::default()
        };
        assert!(validate(&options).unwrap().all_passed());
    }

    #[test]
    fn wrong_expectation_is_a_failure() {
        let fixture = Fixture {
            expected_codes: &["VMG0001"],
            ..fixtures::all()[0]
        };
        let options = GeneratorOptions::default();
        let rules = LineRules::new(4).unwrap();
        let report = validate_fixture(&fixture, &options, &rules).unwrap();
        assert_eq!(report.failure_count(), 1);
    }
}
