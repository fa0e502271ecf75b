//! Core symbol model types.
//!
//! These types describe what the host compiler knows about a type at the
//! moment a generation pass starts: its declared members, its markers and the
//! identity of its base type. Instances are plain owned data and are only ever
//! read during a pass. The container for a whole pass is
//! [`TypeGraph`](crate::TypeGraph).

use serde::{Deserialize, Serialize};

use crate::attributes::Attribute;

/// Source position of a symbol, used to anchor diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Path of the file declaring the symbol.
    #[serde(default)]
    pub file: String,
    /// Byte offset of the symbol name.
    #[serde(default)]
    pub start: u32,
    /// Length of the symbol name in bytes.
    #[serde(default)]
    pub length: u32,
}

impl Span {
    /// Creates a span for `length` bytes starting at `start` in `file`.
    pub fn new(file: impl Into<String>, start: u32, length: u32) -> Self {
        Self {
            file: file.into(),
            start,
            length,
        }
    }
}

/// A reference to a type as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Display name without the nullable annotation (`int`, `string`,
    /// `List<string>`, `System.Threading.Tasks.Task`).
    pub name: String,
    /// Whether the declaration carries the `?` annotation.
    #[serde(default)]
    pub nullable: bool,
    /// Whether the underlying type is a value type. For value types the
    /// annotation changes the type itself, not just its nullability.
    #[serde(default)]
    pub is_value_type: bool,
}

impl TypeRef {
    /// A non-nullable reference type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
            is_value_type: false,
        }
    }

    /// A value type such as `int` or `bool`.
    pub fn value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
            is_value_type: true,
        }
    }

    /// The `void` pseudo-type.
    pub fn void() -> Self {
        Self::new("void")
    }

    /// Returns this reference with the nullable annotation set.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Returns `true` for `void`.
    pub fn is_void(&self) -> bool {
        self.name == "void" || self.name == "System.Void"
    }

    /// Returns `true` for `bool`/`System.Boolean` without annotation.
    pub fn is_bool(&self) -> bool {
        !self.nullable && (self.name == "bool" || self.name == "System.Boolean")
    }

    /// Returns `true` for `Task`, `Task<T>` and their qualified spellings.
    pub fn is_task_like(&self) -> bool {
        let name = self
            .name
            .strip_prefix("System.Threading.Tasks.")
            .unwrap_or(&self.name);
        name == "Task" || name.starts_with("Task<")
    }

    /// Display form including the nullable annotation (`string?`).
    pub fn display(&self) -> String {
        if self.nullable {
            format!("{}?", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Declared accessibility of a member or type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    /// `public`
    Public,
    /// `internal`
    Internal,
    /// `protected`
    Protected,
    /// `protected internal`
    ProtectedInternal,
    /// `private protected`
    PrivateProtected,
    /// `private`
    #[default]
    Private,
}

impl Accessibility {
    /// Whether a derived type can see a member with this accessibility.
    pub fn visible_to_derived(self) -> bool {
        !matches!(self, Accessibility::Private)
    }
}

/// The declaration keyword of a type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// `class`
    #[default]
    Class,
    /// `record` (reference record)
    Record,
    /// `struct`
    Struct,
    /// `interface`
    Interface,
}

impl TypeKind {
    /// The keyword used in a declaration.
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Record => "record",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
        }
    }
}

/// Where a type's declaration comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Declared in the compilation being generated for.
    #[default]
    Source,
    /// Imported from a referenced compilation unit. Only visible as an
    /// ancestor; never generated for.
    Metadata,
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// A declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSymbol {
    /// Field name as declared.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Markers applied to the field.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// `static` modifier.
    #[serde(default)]
    pub is_static: bool,
    /// `readonly` modifier.
    #[serde(default)]
    pub is_readonly: bool,
    /// Span of the field name.
    #[serde(default)]
    pub span: Span,
}

/// A declared method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSymbol {
    /// Method name.
    pub name: String,
    /// Declared return type.
    pub return_type: TypeRef,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Declared accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// `static` modifier.
    #[serde(default)]
    pub is_static: bool,
    /// Markers applied to the method.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Span of the method name.
    #[serde(default)]
    pub span: Span,
}

impl MethodSymbol {
    /// Signature in `Name(type, type)` form, used in diagnostic messages.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(|p| p.ty.display()).collect();
        format!("{}({})", self.name, params.join(", "))
    }

    /// The single parameter, if the method takes exactly one.
    pub fn single_parameter(&self) -> Option<&Parameter> {
        match self.parameters.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// One entry of a nested type's enclosing chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainingType {
    /// Simple name.
    pub name: String,
    /// Declaration keyword.
    #[serde(default)]
    pub kind: TypeKind,
    /// Type parameter names.
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// `partial` modifier.
    #[serde(default)]
    pub is_partial: bool,
}

/// A declared type together with everything the generator may query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSymbol {
    /// Simple name without type parameters.
    pub name: String,
    /// Containing namespace, `None` for the global namespace.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Declaration keyword.
    #[serde(default)]
    pub kind: TypeKind,
    /// Declared accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Type parameter names.
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// Enclosing types, outermost first.
    #[serde(default)]
    pub containing_types: Vec<ContainingType>,
    /// `partial` modifier.
    #[serde(default)]
    pub is_partial: bool,
    /// `sealed` modifier.
    #[serde(default)]
    pub is_sealed: bool,
    /// `static` modifier.
    #[serde(default)]
    pub is_static: bool,
    /// Source or referenced declaration.
    #[serde(default)]
    pub origin: Origin,
    /// Qualified identity of the base type, if any.
    #[serde(default)]
    pub base_type: Option<String>,
    /// Qualified names of the interfaces listed directly on this declaration.
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Markers applied to the type.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Declared fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldSymbol>,
    /// Declared methods in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodSymbol>,
    /// Span of the type name.
    #[serde(default)]
    pub span: Span,
}

impl TypeSymbol {
    /// Creates an empty, non-partial class declaration named `name`.
    pub fn class(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.map(str::to_string),
            kind: TypeKind::Class,
            accessibility: Accessibility::Public,
            type_parameters: Vec::new(),
            containing_types: Vec::new(),
            is_partial: false,
            is_sealed: false,
            is_static: false,
            origin: Origin::Source,
            base_type: None,
            interfaces: Vec::new(),
            attributes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            span: Span::default(),
        }
    }

    /// Identity of the type: namespace, enclosing types and name joined by
    /// dots (`App.Shell.MainViewModel`).
    pub fn qualified_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.containing_types.len() + 2);
        if let Some(ns) = self.namespace.as_deref() {
            if !ns.is_empty() {
                parts.push(ns);
            }
        }
        parts.extend(self.containing_types.iter().map(|c| c.name.as_str()));
        parts.push(&self.name);
        parts.join(".")
    }

    /// Name with type parameters (`Editor<T>`), as used in declarations.
    pub fn display_name(&self) -> String {
        with_type_parameters(&self.name, &self.type_parameters)
    }

    /// Whether `interface` appears in this declaration's own interface list.
    ///
    /// Both the qualified and the simple spelling match.
    pub fn implements(&self, interface: &str) -> bool {
        let simple = simple_name(interface);
        self.interfaces
            .iter()
            .any(|i| i == interface || simple_name(i) == simple && !i.contains('.'))
    }

    /// Fields carrying the marker `marker` (qualified attribute name), in
    /// declaration order.
    pub fn fields_marked<'a>(
        &'a self,
        marker: &'a str,
    ) -> impl Iterator<Item = (&'a FieldSymbol, &'a Attribute)> + 'a {
        self.fields
            .iter()
            .filter_map(move |f| crate::attributes::find(&f.attributes, marker).map(|a| (f, a)))
    }

    /// Methods carrying the marker `marker`, in declaration order.
    pub fn methods_marked<'a>(
        &'a self,
        marker: &'a str,
    ) -> impl Iterator<Item = (&'a MethodSymbol, &'a Attribute)> + 'a {
        self.methods
            .iter()
            .filter_map(move |m| crate::attributes::find(&m.attributes, marker).map(|a| (m, a)))
    }

    /// Methods declared on this type with exactly the name `name`.
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodSymbol> {
        self.methods.iter().filter(move |m| m.name == name)
    }

    /// The first marker with the qualified name `name`.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        crate::attributes::find(&self.attributes, name)
    }
}

/// Appends `<A, B>` to `name` when `params` is non-empty.
pub fn with_type_parameters(name: &str, params: &[String]) -> String {
    if params.is_empty() {
        name.to_string()
    } else {
        format!("{name}<{}>", params.join(", "))
    }
}

/// The last dot-separated segment of a qualified name.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_includes_enclosing_types() {
        let mut ty = TypeSymbol::class(Some("App.Shell"), "Editor");
        ty.containing_types.push(ContainingType {
            name: "Host".into(),
            kind: TypeKind::Class,
            type_parameters: Vec::new(),
            is_partial: true,
        });
        assert_eq!(ty.qualified_name(), "App.Shell.Host.Editor");

        let global = TypeSymbol::class(None, "Editor");
        assert_eq!(global.qualified_name(), "Editor");
    }

    #[test]
    fn implements_matches_qualified_and_simple_spellings() {
        let mut ty = TypeSymbol::class(None, "Vm");
        ty.interfaces.push("INotifyPropertyChanged".into());
        assert!(ty.implements("System.ComponentModel.INotifyPropertyChanged"));

        let mut other = TypeSymbol::class(None, "Vm");
        other
            .interfaces
            .push("Custom.INotifyPropertyChanged".into());
        assert!(!other.implements("System.ComponentModel.INotifyPropertyChanged"));
    }

    #[test]
    fn task_like_returns() {
        assert!(TypeRef::new("Task").is_task_like());
        assert!(TypeRef::new("System.Threading.Tasks.Task<int>").is_task_like());
        assert!(!TypeRef::new("TaskList").is_task_like());
        assert!(!TypeRef::void().is_task_like());
    }

    #[test]
    fn signature_lists_parameter_types() {
        let m = MethodSymbol {
            name: "OnNameChanged".into(),
            return_type: TypeRef::void(),
            parameters: vec![Parameter {
                name: "old".into(),
                ty: TypeRef::new("string").nullable(),
            }],
            accessibility: Accessibility::Private,
            is_static: false,
            attributes: Vec::new(),
            span: Span::default(),
        };
        assert_eq!(m.signature(), "OnNameChanged(string?)");
    }
}
