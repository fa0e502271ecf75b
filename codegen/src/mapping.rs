//! Declaration → generated-identifier mapping tables.
//!
//! Deterministic mappings from user declarations to the names of generated
//! members, callbacks, cached statics and output files.

use vmgen_model::TypeSymbol;

/// Outcome of deriving a property name from a field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedName {
    /// The name to generate.
    pub name: String,
    /// `false` when the conventional rule failed and the fallback was used.
    pub conventional: bool,
}

/// Derives a property name from a backing field name.
///
/// Leading underscores are stripped and the first remaining character is
/// upper-cased (`_userName` → `UserName`). When that yields nothing usable
/// (empty, identical to the field, or not an identifier start) the fallback
/// flips the case of the first cased character (`Title` → `title`), or
/// appends `Property` when the field has no cased character (`_` →
/// `_Property`).
pub fn property_name(field: &str) -> DerivedName {
    let stripped = field.trim_start_matches('_');
    let candidate = capitalize(stripped);
    if !candidate.is_empty() && candidate != field && starts_identifier(&candidate) {
        return DerivedName {
            name: candidate,
            conventional: true,
        };
    }
    DerivedName {
        name: fallback_name(field),
        conventional: false,
    }
}

fn fallback_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 8);
    let mut flipped = false;
    for ch in field.chars() {
        if !flipped && (ch.is_uppercase() || ch.is_lowercase()) {
            if ch.is_uppercase() {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            flipped = true;
        } else {
            out.push(ch);
        }
    }
    if !flipped {
        out.push_str("Property");
    }
    out
}

fn starts_identifier(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
}

/// Upper-cases the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cases the first character.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Conventional changed-callback name: `On<P>Changed`.
pub fn changed_callback(property: &str) -> String {
    format!("On{property}Changed")
}

/// Conventional changing-callback name: `On<P>Changing`.
pub fn changing_callback(property: &str) -> String {
    format!("On{property}Changing")
}

/// Conventional command name: `<M>Command`.
pub fn command_name(method: &str) -> String {
    format!("{method}Command")
}

/// Conventional can-execute predicate name: `Can<M>`.
pub fn can_execute_name(method: &str) -> String {
    format!("Can{method}")
}

/// Backing field of a lazily created command.
pub fn command_field(command: &str) -> String {
    decapitalize(command)
}

/// Cached static event-args field for a property.
pub fn event_args_field(property: &str, changing: bool) -> String {
    if changing {
        format!("{property}ChangingEventArgs")
    } else {
        format!("{property}ChangedEventArgs")
    }
}

/// Canonical spelling of a built-in type alias (`string` → `System.String`).
/// Names that are not aliases are returned unchanged.
pub fn canonical_type_name(name: &str) -> &str {
    match name {
        "bool" => "System.Boolean",
        "byte" => "System.Byte",
        "sbyte" => "System.SByte",
        "char" => "System.Char",
        "decimal" => "System.Decimal",
        "double" => "System.Double",
        "float" => "System.Single",
        "int" => "System.Int32",
        "uint" => "System.UInt32",
        "long" => "System.Int64",
        "ulong" => "System.UInt64",
        "short" => "System.Int16",
        "ushort" => "System.UInt16",
        "object" => "System.Object",
        "string" => "System.String",
        "nint" => "System.IntPtr",
        "nuint" => "System.UIntPtr",
        other => other,
    }
}

/// Base file name of a type's unit: enclosing types and the type joined by
/// dots, type parameters appended with underscores.
///
/// `Host.Editor<T, U>` → `Host.Editor_T_U`.
pub fn hint_base(ty: &TypeSymbol) -> String {
    let mut parts: Vec<&str> = ty
        .containing_types
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    parts.push(&ty.name);
    let mut base = parts.join(".");
    for param in &ty.type_parameters {
        base.push('_');
        base.push_str(param);
    }
    base
}

/// [`hint_base`] prefixed with the namespace, used on collisions.
pub fn qualified_hint_base(ty: &TypeSymbol) -> String {
    match ty.namespace.as_deref() {
        Some(ns) if !ns.is_empty() => format!("{ns}.{}", hint_base(ty)),
        _ => hint_base(ty),
    }
}
