//! Diagnostic codes, messages and the per-pass diagnostic bag.
//!
//! Codes are a fixed, versioned enumeration: a code is never renumbered or
//! reused, so downstream tooling can filter on `VMG0007` across releases.

use serde::{Serialize, Serializer};
use vmgen_model::Span;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Generation of the affected scope is aborted.
    Error,
    /// Generation proceeds with a documented deterministic choice.
    Warning,
}

impl Severity {
    /// Lower-case label used in text output.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// The stable diagnostic taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum DiagnosticCode {
    /// The view-model type is not declared `partial`.
    NoPartialModifier = 1,
    /// The flavor's runtime library is not referenced.
    FrameworkNotAvailable = 2,
    /// The property name derived from a field collides with the field.
    InvalidPropertyName = 3,
    /// An explicitly named changed-callback does not exist.
    OnChangedMethodNotFound = 4,
    /// A command method has an unsupported signature.
    IncorrectCommandSignature = 5,
    /// An explicitly named can-execute method does not exist.
    CanExecuteMethodNotFound = 6,
    /// No raise-hook is reachable for an already-implemented interface.
    RaiseMethodNotFound = 7,
    /// A zero-argument and a one-argument overload both match.
    TwoSuitableMethods = 8,
    /// An explicitly named changing-callback does not exist.
    OnChangingMethodNotFound = 9,
    /// A nested view model sits inside a non-partial type.
    NonPartialContainingType = 10,
    /// The type carries directives for more than one flavor.
    MultipleFrameworks = 11,
    /// More overloads match than the tie-break can arbitrate.
    AmbiguousMethod = 12,
    /// An explicit command name collides with the method name.
    InvalidCommandName = 13,
    /// The directive is applied to an interface, struct or static class.
    UnsupportedTypeKind = 14,
    /// A type parameter is re-declared by an enclosing type.
    ShadowedTypeParameter = 15,
}

impl DiagnosticCode {
    /// Every code, in numeric order.
    pub const ALL: [DiagnosticCode; 15] = [
        DiagnosticCode::NoPartialModifier,
        DiagnosticCode::FrameworkNotAvailable,
        DiagnosticCode::InvalidPropertyName,
        DiagnosticCode::OnChangedMethodNotFound,
        DiagnosticCode::IncorrectCommandSignature,
        DiagnosticCode::CanExecuteMethodNotFound,
        DiagnosticCode::RaiseMethodNotFound,
        DiagnosticCode::TwoSuitableMethods,
        DiagnosticCode::OnChangingMethodNotFound,
        DiagnosticCode::NonPartialContainingType,
        DiagnosticCode::MultipleFrameworks,
        DiagnosticCode::AmbiguousMethod,
        DiagnosticCode::InvalidCommandName,
        DiagnosticCode::UnsupportedTypeKind,
        DiagnosticCode::ShadowedTypeParameter,
    ];

    /// Numeric value of the code.
    pub fn number(self) -> u16 {
        self as u16
    }

    /// The public identifier, e.g. `VMG0007`.
    pub fn id(self) -> String {
        format!("VMG{:04}", self.number())
    }

    /// Fixed severity of the code.
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::InvalidPropertyName
            | DiagnosticCode::TwoSuitableMethods
            | DiagnosticCode::InvalidCommandName => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Short title.
    pub fn title(self) -> &'static str {
        match self {
            DiagnosticCode::NoPartialModifier => "Type is not partial",
            DiagnosticCode::FrameworkNotAvailable => "MVVM framework is not referenced",
            DiagnosticCode::InvalidPropertyName => "Invalid property name",
            DiagnosticCode::OnChangedMethodNotFound => "Changed callback not found",
            DiagnosticCode::IncorrectCommandSignature => "Incorrect command signature",
            DiagnosticCode::CanExecuteMethodNotFound => "Can-execute method not found",
            DiagnosticCode::RaiseMethodNotFound => "Raise method not found",
            DiagnosticCode::TwoSuitableMethods => "Two suitable methods",
            DiagnosticCode::OnChangingMethodNotFound => "Changing callback not found",
            DiagnosticCode::NonPartialContainingType => "Containing type is not partial",
            DiagnosticCode::MultipleFrameworks => "More than one framework selected",
            DiagnosticCode::AmbiguousMethod => "Ambiguous method",
            DiagnosticCode::InvalidCommandName => "Invalid command name",
            DiagnosticCode::UnsupportedTypeKind => "Unsupported type kind",
            DiagnosticCode::ShadowedTypeParameter => "Shadowed type parameter",
        }
    }

    /// Message template with `{0}`, `{1}`, … placeholders.
    pub fn template(self) -> &'static str {
        match self {
            DiagnosticCode::NoPartialModifier => {
                "The {0} type must be declared partial to generate view model members"
            }
            DiagnosticCode::FrameworkNotAvailable => {
                "The {0} type targets {1}, but the {2} library is not referenced"
            }
            DiagnosticCode::InvalidPropertyName => {
                "Cannot derive a distinct property name from the {0} field; the property is generated as {1}"
            }
            DiagnosticCode::OnChangedMethodNotFound => {
                "Cannot find the {0} method with no parameters or one parameter of type {1} in the {2} type. Candidates: {3}"
            }
            DiagnosticCode::IncorrectCommandSignature => {
                "The {0} method cannot be a command: it must return void or a task and take at most one parameter"
            }
            DiagnosticCode::CanExecuteMethodNotFound => {
                "Cannot find the bool-returning {0} method with parameters ({1}) in the {2} type. Candidates: {3}"
            }
            DiagnosticCode::RaiseMethodNotFound => {
                "The {0} type implements {1} through {2}, but no {3} method taking {4} or string is reachable; properties are not generated"
            }
            DiagnosticCode::TwoSuitableMethods => {
                "Both {0} and {1} match in the {2} type; {1} is used"
            }
            DiagnosticCode::OnChangingMethodNotFound => {
                "Cannot find the {0} method with no parameters or one parameter of type {1} in the {2} type. Candidates: {3}"
            }
            DiagnosticCode::NonPartialContainingType => {
                "The {0} type is nested in {1}, which must also be declared partial"
            }
            DiagnosticCode::MultipleFrameworks => {
                "The {0} type has view model directives for {1}; only one framework can be targeted"
            }
            DiagnosticCode::AmbiguousMethod => {
                "{0} methods named {1} match in the {2} type: {3}"
            }
            DiagnosticCode::InvalidCommandName => {
                "The command name {0} equals the method name; the command is generated as {1}"
            }
            DiagnosticCode::UnsupportedTypeKind => {
                "View model members cannot be generated for the {0} {1}"
            }
            DiagnosticCode::ShadowedTypeParameter => {
                "The type parameter {0} of {1} is already declared by the enclosing type {2}"
            }
        }
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id())
    }
}

/// A reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Stable code.
    pub code: DiagnosticCode,
    /// Severity (fixed by the code).
    pub severity: Severity,
    /// Formatted, human-readable message.
    pub message: String,
    /// Span of the offending symbol.
    pub span: Span,
}

impl Diagnostic {
    /// Creates a diagnostic by filling `code`'s template with `args`.
    pub fn new(code: DiagnosticCode, span: &Span, args: &[&str]) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: format_message(code.template(), args),
            span: span.clone(),
        }
    }

    /// Whether this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} {}: {}",
            self.span.file,
            self.span.start,
            self.severity.as_str(),
            self.code.id(),
            self.message
        )
    }
}

/// Replaces `{0}`, `{1}`, … in `template` with `args`.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Joins candidate signatures for a "not found" message.
pub fn candidate_list(signatures: &[String]) -> String {
    if signatures.is_empty() {
        "none".to_string()
    } else {
        signatures.join(", ")
    }
}

/// Diagnostics collected during a pass.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBag {
    items: Vec<Diagnostic>,
}

impl DiagnosticBag {
    /// An empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `code` at `span`.
    pub fn report(&mut self, code: DiagnosticCode, span: &Span, args: &[&str]) {
        let diagnostic = Diagnostic::new(code, span, args);
        tracing::debug!(code = %code.id(), message = %diagnostic.message, "diagnostic");
        self.items.push(diagnostic);
    }

    /// Number of errors reported so far.
    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    /// Whether any error was reported.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Diagnostics in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Consumes the bag.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_numbered_in_order() {
        for (i, code) in DiagnosticCode::ALL.iter().enumerate() {
            assert_eq!(usize::from(code.number()), i + 1);
        }
        assert_eq!(DiagnosticCode::RaiseMethodNotFound.id(), "VMG0007");
    }

    #[test]
    fn warnings_are_the_non_blocking_codes() {
        let warnings: Vec<DiagnosticCode> = DiagnosticCode::ALL
            .into_iter()
            .filter(|c| c.severity() == Severity::Warning)
            .collect();
        assert_eq!(
            warnings,
            [
                DiagnosticCode::InvalidPropertyName,
                DiagnosticCode::TwoSuitableMethods,
                DiagnosticCode::InvalidCommandName,
            ]
        );
    }

    #[test]
    fn templates_are_filled() {
        let d = Diagnostic::new(
            DiagnosticCode::TwoSuitableMethods,
            &Span::new("Vm.cs", 10, 4),
            &["OnXChanged()", "OnXChanged(int)", "Vm"],
        );
        assert_eq!(
            d.message,
            "Both OnXChanged() and OnXChanged(int) match in the Vm type; OnXChanged(int) is used"
        );
        assert_eq!(
            d.to_string(),
            "Vm.cs:10: warning VMG0008: Both OnXChanged() and OnXChanged(int) match in the Vm type; OnXChanged(int) is used"
        );
    }

    #[test]
    fn serializes_code_as_identifier() {
        let d = Diagnostic::new(DiagnosticCode::NoPartialModifier, &Span::default(), &["Vm"]);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["code"], "VMG0001");
        assert_eq!(json["severity"], "error");
    }

    #[test]
    fn bag_counts_errors() {
        let mut bag = DiagnosticBag::new();
        bag.report(DiagnosticCode::InvalidPropertyName, &Span::default(), &["_", "_Property"]);
        assert!(!bag.has_errors());
        bag.report(DiagnosticCode::NoPartialModifier, &Span::default(), &["Vm"]);
        assert_eq!(bag.error_count(), 1);
        assert_eq!(bag.len(), 2);
    }
}
