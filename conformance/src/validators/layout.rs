//! Line-layout validator for generated units.
//!
//! Checks every emitted line against the writer contract:
//! - leading whitespace is spaces only, a whole number of indentation steps
//! - the step count equals the brace nesting depth at that line
//! - blank lines are empty and no line carries trailing whitespace
//! - braces balance and the unit ends with exactly one newline

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use walkdir::WalkDir;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "layout/lines";
const BANNER: &str = "// <auto-generated/>";

/// Compiled line rules for one indentation width.
#[derive(Debug)]
pub struct LineRules {
    width: usize,
    indent: Regex,
    trailing: Regex,
}

impl LineRules {
    /// Rules for units indented by `width` spaces per level.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is zero.
    pub fn new(width: usize) -> Result<Self> {
        anyhow::ensure!(width > 0, "indentation width must be positive");
        Ok(Self {
            width,
            indent: Regex::new(&format!(r"^(?: {{{width}}})*\S"))?,
            trailing: Regex::new(r"[ \t]+$")?,
        })
    }

    /// Every layout problem of `text`, one entry per offending line.
    pub fn check(&self, text: &str) -> Vec<String> {
        let mut issues = Vec::new();
        let mut depth: i64 = 0;

        for (index, line) in text.lines().enumerate() {
            let number = index + 1;
            if line.contains('\t') {
                issues.push(format!("line {number}: tab character"));
            }
            if self.trailing.is_match(line) {
                issues.push(format!("line {number}: trailing whitespace"));
            }
            if line.trim().is_empty() {
                continue;
            }
            if !self.indent.is_match(line) {
                issues.push(format!(
                    "line {number}: indentation is not a multiple of {}",
                    self.width
                ));
                continue;
            }

            let trimmed = line.trim_start();
            let closes_first = trimmed.starts_with('}');
            let expected = if closes_first { depth - 1 } else { depth };
            let actual = ((line.len() - trimmed.len()) / self.width) as i64;
            if actual != expected {
                issues.push(format!(
                    "line {number}: indented {actual} levels at brace depth {expected}"
                ));
            }
            depth += trimmed.matches('{').count() as i64;
            depth -= trimmed.matches('}').count() as i64;
            if depth < 0 {
                issues.push(format!("line {number}: unmatched closing brace"));
                depth = 0;
            }
        }

        if depth != 0 {
            issues.push(format!("{depth} unclosed brace(s) at end of unit"));
        }
        if !text.is_empty() && !text.ends_with('\n') {
            issues.push("missing final newline".to_string());
        }
        if text.ends_with("\n\n") {
            issues.push("trailing blank line at end of unit".to_string());
        }
        issues
    }
}

/// Validates the layout of one unit.
///
/// A unit without the generated-code banner gets a warning in addition to
/// its layout result; the banner can be switched off in the options.
pub fn validate_unit(rules: &LineRules, name: &str, text: &str) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    report.push(TestResult::from_issues(
        VALIDATOR,
        name,
        "every line follows the indentation contract",
        "layout violations",
        rules.check(text),
    ));
    if text.lines().next() != Some(BANNER) {
        report.push(TestResult::warn(
            "layout/banner",
            name,
            "unit does not start with the generated-code banner",
        ));
    }
    report
}

/// Validates every `*.g.cs` file under `dir`.
///
/// # Errors
///
/// Returns an error if a file cannot be read.
pub fn validate_dir(dir: &Path, indent_width: usize) -> Result<ConformanceReport> {
    let rules = LineRules::new(indent_width)?;
    let mut report = ConformanceReport::new();
    let mut seen = 0usize;

    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name().to_string_lossy().ends_with(".g.cs"))
    {
        let path = entry.path();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path.strip_prefix(dir).unwrap_or(path).display().to_string();
        report.extend(validate_unit(&rules, &name, &text));
        seen += 1;
    }

    if seen == 0 {
        report.push(TestResult::warn(
            VALIDATOR,
            dir.display().to_string(),
            "no generated units found",
        ));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> LineRules {
        LineRules::new(4).unwrap()
    }

    #[test]
    fn well_formed_unit_has_no_issues() {
        let text = "// <auto-generated/>\n\nnamespace App {\n    partial class Vm {\n        int x;\n    }\n}\n";
        assert!(rules().check(text).is_empty());
        assert!(validate_unit(&rules(), "Vm.g.cs", text).all_passed());
    }

    #[test]
    fn misindented_line_is_reported() {
        let text = "namespace App {\n  int x;\n}\n";
        let issues = rules().check(text);
        assert_eq!(issues, ["line 2: indentation is not a multiple of 4"]);

        let deep = "namespace App {\n        int x;\n}\n";
        assert_eq!(
            rules().check(deep),
            ["line 2: indented 2 levels at brace depth 1"]
        );
    }

    #[test]
    fn whitespace_only_lines_and_unclosed_braces() {
        let text = "class Vm {\n    \n";
        let issues = rules().check(text);
        assert!(issues.contains(&"line 2: trailing whitespace".to_string()));
        assert!(issues.contains(&"1 unclosed brace(s) at end of unit".to_string()));
    }

    #[test]
    fn missing_banner_is_a_warning() {
        let report = validate_unit(&rules(), "Vm.g.cs", "class Vm {\n}\n");
        assert!(report.all_passed());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(LineRules::new(0).is_err());
    }

    #[test]
    fn directory_scan_reads_generated_files() {
        let dir = std::env::temp_dir().join(format!("vmgen-layout-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("nested/Vm.g.cs"), "// <auto-generated/>\nclass Vm {\n}\n").unwrap();
        std::fs::write(dir.join("notes.txt"), "  ignored \n").unwrap();
        let report = validate_dir(&dir, 4).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(report.results.len(), 1);
        assert!(report.all_passed());
    }
}
