//! Method → command resolution.

use vmgen_model::{MethodSymbol, TypeRef, TypeSymbol};

use crate::diagnostics::{DiagnosticBag, DiagnosticCode};
use crate::flavor::Flavor;
use crate::mapping;
use crate::options::CommandOptions;
use crate::resolve::binding::{bind, CallbackBinding, Lookup, MethodQuery, Returns};

/// Everything needed to emit one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Execute method name.
    pub method: String,
    /// Generated command property name.
    pub name: String,
    /// Lazily initialised backing field.
    pub field: String,
    /// Type of the command parameter, if the method takes one.
    pub parameter: Option<TypeRef>,
    /// Whether the method returns a task.
    pub is_async: bool,
    /// Bound can-execute predicate.
    pub can_execute: CallbackBinding,
    /// `AllowMultipleExecution`
    pub allow_multiple_execution: bool,
    /// `UseCommandManager`
    pub use_command_manager: bool,
}

impl CommandSpec {
    /// Whether the predicate ignores the command parameter and must be
    /// wrapped in a discard lambda.
    pub fn wraps_predicate(&self) -> bool {
        self.parameter.is_some()
            && matches!(self.can_execute, CallbackBinding::Bound { takes_argument: false, .. })
    }
}

/// Resolves the command generated for `method`, or `None` when the method is
/// not marked for `flavor` or cannot be a command.
pub fn resolve_command(
    ty: &TypeSymbol,
    method: &MethodSymbol,
    flavor: Flavor,
    diagnostics: &mut DiagnosticBag,
) -> Option<CommandSpec> {
    let marker = flavor.command_marker();
    let attr = vmgen_model::attributes::find(&method.attributes, &marker)?;
    let options = CommandOptions::read(attr);

    let is_async = method.return_type.is_task_like();
    if method.is_static
        || !(method.return_type.is_void() || is_async)
        || method.parameters.len() > 1
    {
        diagnostics.report(
            DiagnosticCode::IncorrectCommandSignature,
            &method.span,
            &[&method.signature()],
        );
        return None;
    }
    let parameter = method.single_parameter().map(|p| p.ty.clone());

    let conventional = mapping::command_name(&method.name);
    let name = match options.name.as_deref() {
        Some(explicit) if explicit == method.name => {
            diagnostics.report(
                DiagnosticCode::InvalidCommandName,
                &method.span,
                &[explicit, &conventional],
            );
            conventional
        }
        Some(explicit) => explicit.to_string(),
        None => conventional,
    };

    let (predicate, lookup) = match options.can_execute.as_deref() {
        Some(explicit) => (
            explicit.to_string(),
            Lookup::Explicit {
                not_found: DiagnosticCode::CanExecuteMethodNotFound,
            },
        ),
        None => (
            mapping::can_execute_name(&method.name),
            Lookup::Convention { tie_break: false },
        ),
    };
    let query = MethodQuery {
        name: &predicate,
        returns: Returns::Bool,
        argument: parameter.as_ref(),
    };
    let can_execute = bind(ty, &query, lookup, &method.span, diagnostics).ok()?;

    tracing::debug!(
        method = %method.name,
        command = %name,
        can_execute = ?can_execute.method(),
        "command resolved"
    );
    Some(CommandSpec {
        method: method.name.clone(),
        field: mapping::command_field(&name),
        name,
        parameter,
        is_async,
        can_execute,
        allow_multiple_execution: options.allow_multiple_execution,
        use_command_manager: options.use_command_manager,
    })
}
