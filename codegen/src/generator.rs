//! The generation pass: for each source type carrying a view-model
//! directive, run the structural checks, resolve capabilities and members,
//! and render one unit.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use vmgen_model::{TypeGraph, TypeKind, TypeSymbol};

use crate::config::GeneratorOptions;
use crate::diagnostics::{Diagnostic, DiagnosticBag, DiagnosticCode};
use crate::emit::{self, EmitError};
use crate::flavor::{self, Detection, Flavor};
use crate::mapping;
use crate::options::ViewModelOptions;
use crate::properties::SetterHooks;
use crate::resolve::{resolve_command, resolve_property, Capability, CapabilitySet};
use crate::unit::{render_unit, EmittedUnit, UnitPlan};

/// Fatal failure of a pass.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// An emitter violated the writer contract.
    #[error("failed to emit {type_name}: {source}")]
    Emit {
        /// Qualified name of the type being emitted.
        type_name: String,
        /// The contract violation.
        source: EmitError,
    },
}

/// Cooperative cancellation flag, checked between types.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Hands out unique file names for one pass.
#[derive(Debug, Default)]
pub struct FileNameRegistry {
    used: BTreeSet<String>,
}

impl FileNameRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers and returns a unique `.g.cs` name for `ty`: the short
    /// form, then the namespace-qualified form, then numeric suffixes.
    pub fn register(&mut self, ty: &TypeSymbol) -> String {
        let short = mapping::hint_base(ty);
        let qualified = mapping::qualified_hint_base(ty);
        for base in [&short, &qualified] {
            let name = format!("{base}.g.cs");
            if self.used.insert(name.clone()) {
                return name;
            }
        }
        let mut n = 2usize;
        loop {
            let name = format!("{qualified}_{n}.g.cs");
            if self.used.insert(name.clone()) {
                return name;
            }
            n += 1;
        }
    }
}

/// Result of a pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationOutput {
    /// Emitted units in snapshot order.
    pub units: Vec<EmittedUnit>,
    /// Every reported diagnostic.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the pass stopped early on cancellation.
    pub cancelled: bool,
}

impl GenerationOutput {
    /// Number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Whether any error was reported.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Runs one generation pass over the source types of `graph`.
///
/// # Errors
///
/// Returns [`GenerateError`] only for internal emitter failures. Problems in
/// user code are reported as diagnostics.
pub fn generate(
    graph: &TypeGraph,
    options: &GeneratorOptions,
    cancel: &CancellationToken,
) -> Result<GenerationOutput, GenerateError> {
    let mut output = GenerationOutput::default();
    let mut registry = FileNameRegistry::new();

    for ty in graph.source_types() {
        if cancel.is_cancelled() {
            tracing::debug!("generation cancelled");
            output.cancelled = true;
            break;
        }
        let mut diagnostics = DiagnosticBag::new();
        let text = generate_type(graph, ty, options, &mut diagnostics).map_err(|source| {
            GenerateError::Emit {
                type_name: ty.qualified_name(),
                source,
            }
        })?;
        output.diagnostics.extend(diagnostics.into_vec());
        if let Some(text) = text {
            let hint_name = registry.register(ty);
            tracing::debug!(ty = %ty.qualified_name(), hint = %hint_name, "unit emitted");
            output.units.push(EmittedUnit {
                hint_name,
                type_name: ty.qualified_name(),
                text,
            });
        }
    }
    Ok(output)
}

/// Runs the per-type pipeline. Returns `Ok(None)` when the type is not a
/// view model or a structural check failed.
///
/// # Errors
///
/// Propagates writer contract violations.
pub fn generate_type(
    graph: &TypeGraph,
    ty: &TypeSymbol,
    options: &GeneratorOptions,
    diagnostics: &mut DiagnosticBag,
) -> Result<Option<String>, EmitError> {
    let (flavor, directive) = match flavor::detect(ty) {
        Detection::None => return Ok(None),
        Detection::Conflict(flavors) => {
            let names: Vec<&str> = flavors.iter().map(|f| f.display_name()).collect();
            diagnostics.report(
                DiagnosticCode::MultipleFrameworks,
                &ty.span,
                &[&ty.display_name(), &names.join(" and ")],
            );
            return Ok(None);
        }
        Detection::Single(flavor, attr) => (flavor, attr),
    };
    tracing::debug!(ty = %ty.qualified_name(), flavor = ?flavor, "view model found");

    if !structural_checks(graph, ty, flavor, diagnostics) {
        return Ok(None);
    }

    let vm_options = ViewModelOptions::read(flavor, directive);
    let capabilities = CapabilitySet::resolve(graph, ty, flavor, &vm_options);

    let property_marker = flavor.property_marker();
    let has_candidates = ty.fields_marked(&property_marker).next().is_some();
    let mut hooks_missing = false;
    if has_candidates {
        for state in capabilities.missing_hooks() {
            hooks_missing = true;
            let capability = state.capability;
            let provider = state.provider.clone().unwrap_or_default();
            let hook = flavor
                .hook_names(capability == Capability::PropertyChanging)
                .first()
                .copied()
                .unwrap_or_default();
            diagnostics.report(
                DiagnosticCode::RaiseMethodNotFound,
                &ty.span,
                &[
                    &ty.display_name(),
                    capability.interface_simple_name(),
                    &provider,
                    hook,
                    capability.event_args_type().unwrap_or_default(),
                ],
            );
        }
    }

    let properties = if hooks_missing {
        Vec::new()
    } else {
        ty.fields
            .iter()
            .filter_map(|field| resolve_property(ty, field, flavor, diagnostics))
            .collect()
    };
    let commands = ty
        .methods
        .iter()
        .filter_map(|method| resolve_command(ty, method, flavor, diagnostics))
        .collect();

    let plan = UnitPlan {
        ty,
        flavor,
        declared: capabilities.to_declare().collect(),
        hooks: SetterHooks {
            changed: capabilities.changed_hook(),
            changing: capabilities.changing_hook(),
        },
        properties,
        commands,
    };
    render_unit(&plan, options).map(Some)
}

/// Reports every structural problem of `ty`. Returns `false` when any was
/// found, in which case nothing is generated for the type.
fn structural_checks(
    graph: &TypeGraph,
    ty: &TypeSymbol,
    flavor: Flavor,
    diagnostics: &mut DiagnosticBag,
) -> bool {
    let before = diagnostics.error_count();
    let name = ty.display_name();

    let unsupported = match ty.kind {
        TypeKind::Struct => Some("struct"),
        TypeKind::Interface => Some("interface"),
        TypeKind::Class | TypeKind::Record if ty.is_static => Some("static class"),
        TypeKind::Class | TypeKind::Record => None,
    };
    if let Some(kind) = unsupported {
        diagnostics.report(DiagnosticCode::UnsupportedTypeKind, &ty.span, &[kind, &name]);
    }
    if !ty.is_partial {
        diagnostics.report(DiagnosticCode::NoPartialModifier, &ty.span, &[&name]);
    }
    for outer in ty.containing_types.iter().filter(|c| !c.is_partial) {
        diagnostics.report(
            DiagnosticCode::NonPartialContainingType,
            &ty.span,
            &[&name, &outer.name],
        );
    }
    for param in &ty.type_parameters {
        if let Some(outer) = ty
            .containing_types
            .iter()
            .find(|c| c.type_parameters.contains(param))
        {
            diagnostics.report(
                DiagnosticCode::ShadowedTypeParameter,
                &ty.span,
                &[param, &name, &outer.name],
            );
        }
    }
    if !graph.references_library(flavor.library()) {
        diagnostics.report(
            DiagnosticCode::FrameworkNotAvailable,
            &ty.span,
            &[&name, flavor.display_name(), flavor.library()],
        );
    }
    diagnostics.error_count() == before
}

/// Writes every unit to `out_dir` under its hint name.
///
/// # Errors
///
/// Returns an error if a file cannot be written.
pub fn write_units(out_dir: &Path, units: &[EmittedUnit]) -> Result<()> {
    for unit in units {
        emit::write_file(&out_dir.join(&unit.hint_name), &unit.text)?;
    }
    Ok(())
}
