//! Markers (attributes) and typed access to their named arguments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{simple_name, Span};

/// A named argument value as the host evaluated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A boolean literal.
    Bool(bool),
    /// An integer literal, or an enum member given by ordinal.
    Int(i64),
    /// A string literal, or an enum member given by name.
    Str(String),
}

impl AttributeValue {
    /// The boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// A declarative marker applied to a type, field or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Qualified attribute type name (`ViewModelGen.GeneratePropertyAttribute`).
    pub name: String,
    /// Named arguments. Arguments left at their default are absent.
    #[serde(default)]
    pub arguments: BTreeMap<String, AttributeValue>,
    /// Span of the attribute usage.
    #[serde(default)]
    pub span: Span,
}

impl Attribute {
    /// A marker without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: BTreeMap::new(),
            span: Span::default(),
        }
    }

    /// Builder-style helper that sets a named argument.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    /// The last segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// The namespace part of the qualified name, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(ns, _)| ns)
    }

    /// Raw value of a named argument.
    pub fn arg(&self, name: &str) -> Option<&AttributeValue> {
        self.arguments.get(name)
    }

    /// Boolean argument with a typed default. A value of the wrong kind
    /// counts as absent.
    pub fn bool_arg(&self, name: &str, default: bool) -> bool {
        self.arg(name).and_then(AttributeValue::as_bool).unwrap_or(default)
    }

    /// String argument; `None` when absent or of another kind.
    pub fn str_arg(&self, name: &str) -> Option<&str> {
        self.arg(name).and_then(AttributeValue::as_str)
    }
}

/// Finds the first attribute named `name` in `attributes`.
pub fn find<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attributes.iter().find(|a| a.name == name)
}
