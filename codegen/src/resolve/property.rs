//! Field → property resolution.

use vmgen_model::{FieldSymbol, TypeRef, TypeSymbol};

use crate::diagnostics::{DiagnosticBag, DiagnosticCode};
use crate::flavor::Flavor;
use crate::mapping;
use crate::options::{PropertyOptions, SetterAccess};
use crate::resolve::binding::{bind, CallbackBinding, Lookup, MethodQuery, Returns};

/// Everything needed to emit one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    /// Backing field name.
    pub field: String,
    /// Generated property name.
    pub name: String,
    /// Property type (the field's type).
    pub ty: TypeRef,
    /// `virtual` modifier.
    pub is_virtual: bool,
    /// Setter accessibility.
    pub setter_access: SetterAccess,
    /// Callback invoked after the value changed.
    pub changed: CallbackBinding,
    /// Callback invoked before the value changes.
    pub changing: CallbackBinding,
}

/// Resolves the property generated for `field`, or `None` when the field is
/// not marked for `flavor` or a callback could not be bound.
pub fn resolve_property(
    ty: &TypeSymbol,
    field: &FieldSymbol,
    flavor: Flavor,
    diagnostics: &mut DiagnosticBag,
) -> Option<PropertySpec> {
    let marker = flavor.property_marker();
    let attr = vmgen_model::attributes::find(&field.attributes, &marker)?;
    let options = PropertyOptions::read(attr);

    let derived = mapping::property_name(&field.name);
    if !derived.conventional {
        diagnostics.report(
            DiagnosticCode::InvalidPropertyName,
            &field.span,
            &[&field.name, &derived.name],
        );
    }
    let name = derived.name;

    let changed = bind_callback(
        ty,
        field,
        options.on_changed.as_deref(),
        &mapping::changed_callback(&name),
        DiagnosticCode::OnChangedMethodNotFound,
        diagnostics,
    );
    let changing = bind_callback(
        ty,
        field,
        options.on_changing.as_deref(),
        &mapping::changing_callback(&name),
        DiagnosticCode::OnChangingMethodNotFound,
        diagnostics,
    );
    let (changed, changing) = (changed?, changing?);

    tracing::debug!(
        field = %field.name,
        property = %name,
        changed = ?changed.method(),
        changing = ?changing.method(),
        "property resolved"
    );
    Some(PropertySpec {
        field: field.name.clone(),
        name,
        ty: field.ty.clone(),
        is_virtual: options.is_virtual,
        setter_access: options.setter_access,
        changed,
        changing,
    })
}

fn bind_callback(
    ty: &TypeSymbol,
    field: &FieldSymbol,
    explicit: Option<&str>,
    convention: &str,
    not_found: DiagnosticCode,
    diagnostics: &mut DiagnosticBag,
) -> Option<CallbackBinding> {
    let (name, lookup) = match explicit {
        Some(name) => (name, Lookup::Explicit { not_found }),
        None => (convention, Lookup::Convention { tie_break: true }),
    };
    let query = MethodQuery {
        name,
        returns: Returns::Void,
        argument: Some(&field.ty),
    };
    bind(ty, &query, lookup, &field.span, diagnostics).ok()
}
