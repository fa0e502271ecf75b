//! Capability boilerplate: events, raise-hooks and interface members
//! emitted when a capability is requested and not yet present.

use vmgen_model::TypeSymbol;

use crate::emit::{EmitError, Indented};
use crate::flavor::Flavor;
use crate::resolve::{Capability, Declaration};
use crate::unit::EmitContext;

/// Emits the boilerplate block of `declaration`.
///
/// # Errors
///
/// Propagates writer contract violations.
pub fn emit_capability(
    w: &mut Indented<'_>,
    declaration: Declaration,
    ctx: &EmitContext<'_>,
) -> Result<(), EmitError> {
    let with_hook = declaration.with_hook;
    match declaration.capability {
        Capability::PropertyChanged => emit_notification(w, ctx, "PropertyChanged", with_hook),
        Capability::PropertyChanging => emit_notification(w, ctx, "PropertyChanging", with_hook),
        Capability::DataErrorInfo => emit_data_error_info(w, ctx),
        Capability::Services => emit_services(w, ctx),
        Capability::ParentViewModel => emit_parent_view_model(w, ctx),
        Capability::ActiveAware => emit_active_aware(w, ctx),
        Capability::Cleanup => emit_cleanup(w, ctx),
    }
}

fn emit_notification(
    w: &mut Indented<'_>,
    ctx: &EmitContext<'_>,
    event: &str,
    with_hook: bool,
) -> Result<(), EmitError> {
    let handler = ctx.options.nullable(&format!("{event}EventHandler"));
    w.line(&format!("public event {handler} {event};"))?;
    if !with_hook {
        return Ok(());
    }
    w.line(&format!(
        "{} void Raise{event}({event}EventArgs e) => {event}?.Invoke(this, e);",
        ctx.hook_access()
    ))
}

fn emit_data_error_info(w: &mut Indented<'_>, ctx: &EmitContext<'_>) -> Result<(), EmitError> {
    w.line("string IDataErrorInfo.Error { get => string.Empty; }")?;
    if ctx.flavor == Flavor::DevExpress {
        return w.line(
            "string IDataErrorInfo.this[string columnName] { get => IDataErrorInfoHelper.GetErrorText(this, columnName); }",
        );
    }
    w.line("string IDataErrorInfo.this[string columnName] {")?;
    {
        let mut get = w.tab();
        get.line("get {")?;
        let mut body = get.tab();
        body.line("var value = GetType().GetProperty(columnName)?.GetValue(this);")?;
        body.line("var errors = new List<ValidationResult>();")?;
        body.line("var context = new ValidationContext(this, null, null) { MemberName = columnName };")?;
        body.line("Validator.TryValidateProperty(value, context, errors);")?;
        body.line("return errors.Count > 0 ? errors[0].ErrorMessage ?? string.Empty : string.Empty;")?;
        get.line("}")?;
    }
    w.line("}")
}

fn emit_services(w: &mut Indented<'_>, ctx: &EmitContext<'_>) -> Result<(), EmitError> {
    let access = ctx.hook_access();
    w.line(&format!("{} serviceContainer;", ctx.options.nullable("IServiceContainer")))?;
    w.line(&format!(
        "{access} IServiceContainer ServiceContainer {{ get => serviceContainer ??= new ServiceContainer(this); }}"
    ))?;
    w.line("IServiceContainer ISupportServices.ServiceContainer { get => ServiceContainer; }")?;
    w.line(&format!(
        "{access} T{} GetService<T>() where T : class => ServiceContainer.GetService<T>();",
        if ctx.options.nullable_context { "?" } else { "" }
    ))
}

fn emit_parent_view_model(w: &mut Indented<'_>, ctx: &EmitContext<'_>) -> Result<(), EmitError> {
    let object = ctx.options.nullable("object");
    w.line(&format!("{object} parentViewModel;"))?;
    w.line(&format!("{object} ISupportParentViewModel.ParentViewModel {{"))?;
    {
        let mut prop = w.tab();
        prop.line("get => parentViewModel;")?;
        prop.line("set {")?;
        let mut body = prop.tab();
        body.line("if(parentViewModel == value) return;")?;
        body.line(
            "if(value == this) throw new InvalidOperationException(\"ViewModel cannot be parent of itself.\");",
        )?;
        body.line("parentViewModel = value;")?;
        if has_hook(ctx.ty, "OnParentViewModelChanged", 1) {
            body.line("OnParentViewModelChanged(parentViewModel);")?;
        }
        prop.line("}")?;
    }
    w.line("}")
}

fn emit_active_aware(w: &mut Indented<'_>, ctx: &EmitContext<'_>) -> Result<(), EmitError> {
    w.line("bool isActive;")?;
    w.line("public bool IsActive {")?;
    {
        let mut prop = w.tab();
        prop.line("get => isActive;")?;
        prop.line("set {")?;
        let mut body = prop.tab();
        body.line("isActive = value;")?;
        if has_hook(ctx.ty, "OnIsActiveChanged", 0) {
            body.line("OnIsActiveChanged();")?;
        }
        body.line("IsActiveChanged?.Invoke(this, EventArgs.Empty);")?;
        prop.line("}")?;
    }
    w.line("}")?;
    w.line(&format!(
        "public event {} IsActiveChanged;",
        ctx.options.nullable("EventHandler")
    ))
}

fn emit_cleanup(w: &mut Indented<'_>, ctx: &EmitContext<'_>) -> Result<(), EmitError> {
    let modifier = if ctx.ty.is_sealed { "" } else { "virtual " };
    w.line(&format!("public {modifier}void Cleanup() {{"))?;
    {
        let mut body = w.tab();
        body.line("Messenger.Default.Unregister(this);")?;
        if has_hook(ctx.ty, "OnCleanup", 0) {
            body.line("OnCleanup();")?;
        }
    }
    w.line("}")
}

/// Whether `ty` declares a `void` instance method `name` with `arity`
/// parameters.
fn has_hook(ty: &TypeSymbol, name: &str, arity: usize) -> bool {
    ty.methods_named(name)
        .any(|m| !m.is_static && m.return_type.is_void() && m.parameters.len() == arity)
}
