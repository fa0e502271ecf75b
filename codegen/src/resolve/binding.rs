//! Name-and-signature binding of user-written methods.
//!
//! Callbacks (`On<P>Changed`, `On<P>Changing`) and can-execute predicates are
//! found the same way: collect the type's own methods with the requested
//! name, keep those whose shape fits, then apply the overload tie-break.

use vmgen_model::{MethodSymbol, Span, TypeRef, TypeSymbol};

use crate::diagnostics::{candidate_list, DiagnosticBag, DiagnosticCode};
use crate::mapping::canonical_type_name;

/// Result of binding a callback or predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackBinding {
    /// No user method; the generated member uses its default behavior.
    None,
    /// A user method was selected.
    Bound {
        /// Method name.
        method: String,
        /// Whether the selected overload takes the single argument.
        takes_argument: bool,
    },
}

impl CallbackBinding {
    /// The bound method, if any.
    pub fn method(&self) -> Option<&str> {
        match self {
            CallbackBinding::None => None,
            CallbackBinding::Bound { method, .. } => Some(method),
        }
    }

    /// Whether a bound method takes the argument.
    pub fn takes_argument(&self) -> bool {
        matches!(
            self,
            CallbackBinding::Bound {
                takes_argument: true,
                ..
            }
        )
    }
}

/// Marker returned when binding failed and an error diagnostic was already
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reported;

/// Required return shape of a bound method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returns {
    /// `void`
    Void,
    /// `bool`
    Bool,
}

impl Returns {
    fn accepts(self, ty: &TypeRef) -> bool {
        match self {
            Returns::Void => ty.is_void(),
            Returns::Bool => ty.is_bool(),
        }
    }
}

/// How the method name was obtained, which decides how "no match" and
/// overload ties are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Named by the user in a directive argument. No match reports
    /// `not_found`; a zero-/one-argument pair is a warned tie-break.
    Explicit {
        /// Code reported when nothing matches.
        not_found: DiagnosticCode,
    },
    /// Derived by convention. No match silently binds nothing.
    Convention {
        /// Whether a zero-/one-argument pair is resolved by the tie-break
        /// (`true`) or reported as ambiguous (`false`).
        tie_break: bool,
    },
}

/// A method search on one declaring type.
#[derive(Debug, Clone, Copy)]
pub struct MethodQuery<'a> {
    /// Exact method name.
    pub name: &'a str,
    /// Required return shape.
    pub returns: Returns,
    /// Type the single parameter must accept. `None` admits only
    /// parameterless overloads.
    pub argument: Option<&'a TypeRef>,
}

/// Whether a parameter of type `param` accepts a value of type `value`.
///
/// Built-in aliases match their canonical spelling. For reference types a
/// nullable parameter accepts a non-nullable value but not the reverse; for
/// value types nullability is part of the type and must match.
pub fn accepts(param: &TypeRef, value: &TypeRef) -> bool {
    if canonical_type_name(&param.name) != canonical_type_name(&value.name) {
        return false;
    }
    if param.is_value_type || value.is_value_type {
        param.nullable == value.nullable
    } else {
        param.nullable || !value.nullable
    }
}

fn fits(method: &MethodSymbol, query: &MethodQuery<'_>) -> bool {
    if method.is_static || !query.returns.accepts(&method.return_type) {
        return false;
    }
    match (method.parameters.as_slice(), query.argument) {
        ([], _) => true,
        ([only], Some(arg)) => accepts(&only.ty, arg),
        _ => false,
    }
}

/// Binds `query` against the methods declared on `owner`.
///
/// `anchor` and `member` locate the generated member in diagnostics.
///
/// # Errors
///
/// Returns [`Reported`] after reporting an error diagnostic when an explicit
/// name has no match or the matches are ambiguous.
pub fn bind(
    owner: &TypeSymbol,
    query: &MethodQuery<'_>,
    lookup: Lookup,
    anchor: &Span,
    diagnostics: &mut DiagnosticBag,
) -> Result<CallbackBinding, Reported> {
    let named: Vec<&MethodSymbol> = owner.methods_named(query.name).collect();
    let matches: Vec<&MethodSymbol> = named.iter().copied().filter(|m| fits(m, query)).collect();
    for m in &matches {
        tracing::trace!(candidate = %m.signature(), "overload candidate");
    }
    let owner_name = owner.display_name();

    match matches.as_slice() {
        [] => match lookup {
            Lookup::Convention { .. } => Ok(CallbackBinding::None),
            Lookup::Explicit { not_found } => {
                let near_misses: Vec<String> = named.iter().map(|m| m.signature()).collect();
                let expected = query.argument.map(TypeRef::display).unwrap_or_default();
                diagnostics.report(
                    not_found,
                    anchor,
                    &[query.name, &expected, &owner_name, &candidate_list(&near_misses)],
                );
                Err(Reported)
            }
        },
        [only] => Ok(bound(only)),
        [a, b] if a.parameters.len() != b.parameters.len() => {
            let allow = match lookup {
                Lookup::Explicit { .. } => true,
                Lookup::Convention { tie_break } => tie_break,
            };
            if !allow {
                report_ambiguous(query.name, &matches, &owner_name, anchor, diagnostics);
                return Err(Reported);
            }
            let (zero, one) = if a.parameters.is_empty() { (a, b) } else { (b, a) };
            diagnostics.report(
                DiagnosticCode::TwoSuitableMethods,
                anchor,
                &[&zero.signature(), &one.signature(), &owner_name],
            );
            Ok(bound(one))
        }
        _ => {
            report_ambiguous(query.name, &matches, &owner_name, anchor, diagnostics);
            Err(Reported)
        }
    }
}

fn bound(method: &MethodSymbol) -> CallbackBinding {
    CallbackBinding::Bound {
        method: method.name.clone(),
        takes_argument: !method.parameters.is_empty(),
    }
}

fn report_ambiguous(
    name: &str,
    matches: &[&MethodSymbol],
    owner: &str,
    anchor: &Span,
    diagnostics: &mut DiagnosticBag,
) {
    let signatures: Vec<String> = matches.iter().map(|m| m.signature()).collect();
    diagnostics.report(
        DiagnosticCode::AmbiguousMethod,
        anchor,
        &[
            &matches.len().to_string(),
            name,
            owner,
            &signatures.join(", "),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmgen_model::{Accessibility, Parameter};

    fn method(name: &str, ret: TypeRef, params: &[TypeRef]) -> MethodSymbol {
        MethodSymbol {
            name: name.into(),
            return_type: ret,
            parameters: params
                .iter()
                .enumerate()
                .map(|(i, ty)| Parameter {
                    name: format!("p{i}"),
                    ty: ty.clone(),
                })
                .collect(),
            accessibility: Accessibility::Private,
            is_static: false,
            attributes: Vec::new(),
            span: Span::default(),
        }
    }

    fn owner(methods: Vec<MethodSymbol>) -> TypeSymbol {
        let mut ty = TypeSymbol::class(Some("App"), "Vm");
        ty.methods = methods;
        ty
    }

    fn changed_query<'a>(name: &'a str, field: &'a TypeRef) -> MethodQuery<'a> {
        MethodQuery {
            name,
            returns: Returns::Void,
            argument: Some(field),
        }
    }

    #[test]
    fn nullability_rules() {
        let s = TypeRef::new("string");
        let s_null = TypeRef::new("System.String").nullable();
        assert!(accepts(&s_null, &s));
        assert!(!accepts(&s, &s_null));
        let i = TypeRef::value("int");
        let i_null = TypeRef::value("int").nullable();
        assert!(accepts(&i, &TypeRef::value("System.Int32")));
        assert!(!accepts(&i_null, &i));
        assert!(!accepts(&i, &i_null));
    }

    #[test]
    fn convention_without_match_binds_nothing() {
        let ty = owner(vec![method("OnNameChanged", TypeRef::new("int"), &[])]);
        let field = TypeRef::new("string");
        let mut diags = DiagnosticBag::new();
        let result = bind(
            &ty,
            &changed_query("OnNameChanged", &field),
            Lookup::Convention { tie_break: true },
            &Span::default(),
            &mut diags,
        );
        assert_eq!(result, Ok(CallbackBinding::None));
        assert!(diags.is_empty());
    }

    #[test]
    fn explicit_without_match_lists_near_misses() {
        let ty = owner(vec![method(
            "AfterName",
            TypeRef::void(),
            &[TypeRef::value("int")],
        )]);
        let field = TypeRef::new("string");
        let mut diags = DiagnosticBag::new();
        let result = bind(
            &ty,
            &changed_query("AfterName", &field),
            Lookup::Explicit {
                not_found: DiagnosticCode::OnChangedMethodNotFound,
            },
            &Span::default(),
            &mut diags,
        );
        assert_eq!(result, Err(Reported));
        let d = diags.iter().next().unwrap();
        assert_eq!(d.code, DiagnosticCode::OnChangedMethodNotFound);
        assert!(d.message.contains("Candidates: AfterName(int)"));
    }

    #[test]
    fn zero_and_one_argument_pair_prefers_one_argument() {
        let ty = owner(vec![
            method("OnNameChanged", TypeRef::void(), &[]),
            method("OnNameChanged", TypeRef::void(), &[TypeRef::new("string")]),
        ]);
        let field = TypeRef::new("string");
        let mut diags = DiagnosticBag::new();
        let result = bind(
            &ty,
            &changed_query("OnNameChanged", &field),
            Lookup::Convention { tie_break: true },
            &Span::default(),
            &mut diags,
        );
        assert_eq!(
            result,
            Ok(CallbackBinding::Bound {
                method: "OnNameChanged".into(),
                takes_argument: true
            })
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags.iter().next().map(|d| d.code),
            Some(DiagnosticCode::TwoSuitableMethods)
        );
    }

    #[test]
    fn pair_without_tie_break_is_ambiguous() {
        let ty = owner(vec![
            method("CanSave", TypeRef::value("bool"), &[]),
            method("CanSave", TypeRef::value("bool"), &[TypeRef::value("int")]),
        ]);
        let arg = TypeRef::value("int");
        let mut diags = DiagnosticBag::new();
        let result = bind(
            &ty,
            &MethodQuery {
                name: "CanSave",
                returns: Returns::Bool,
                argument: Some(&arg),
            },
            Lookup::Convention { tie_break: false },
            &Span::default(),
            &mut diags,
        );
        assert_eq!(result, Err(Reported));
        assert_eq!(
            diags.iter().next().map(|d| d.code),
            Some(DiagnosticCode::AmbiguousMethod)
        );
    }

    #[test]
    fn three_matches_are_ambiguous() {
        let ty = owner(vec![
            method("OnXChanged", TypeRef::void(), &[]),
            method("OnXChanged", TypeRef::void(), &[TypeRef::new("string")]),
            method("OnXChanged", TypeRef::void(), &[TypeRef::new("string").nullable()]),
        ]);
        let field = TypeRef::new("string");
        let mut diags = DiagnosticBag::new();
        let result = bind(
            &ty,
            &changed_query("OnXChanged", &field),
            Lookup::Convention { tie_break: true },
            &Span::default(),
            &mut diags,
        );
        assert_eq!(result, Err(Reported));
        assert!(diags.iter().next().unwrap().message.starts_with("3 methods"));
    }

    #[test]
    fn parameterless_query_ignores_one_argument_overloads() {
        let ty = owner(vec![method(
            "CanRun",
            TypeRef::value("bool"),
            &[TypeRef::value("int")],
        )]);
        let mut diags = DiagnosticBag::new();
        let result = bind(
            &ty,
            &MethodQuery {
                name: "CanRun",
                returns: Returns::Bool,
                argument: None,
            },
            Lookup::Convention { tie_break: false },
            &Span::default(),
            &mut diags,
        );
        assert_eq!(result, Ok(CallbackBinding::None));
    }
}
