//! Typed views of directive arguments.
//!
//! Each candidate's marker is read exactly once into one of these structs;
//! the resolvers and emitters never look at raw attribute arguments.

use vmgen_model::{Attribute, AttributeValue};

use crate::flavor::Flavor;

/// Accessibility of a generated property setter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetterAccess {
    /// Same as the property: no modifier on the setter.
    #[default]
    Public,
    /// `private set`
    Private,
    /// `protected set`
    Protected,
    /// `internal set`
    Internal,
    /// `protected internal set`
    ProtectedInternal,
    /// `private protected set`
    PrivateProtected,
}

impl SetterAccess {
    /// Parses the enum member name or its ordinal. Unknown values fall back
    /// to [`SetterAccess::Public`].
    pub fn from_value(value: Option<&AttributeValue>) -> Self {
        match value {
            Some(AttributeValue::Int(n)) => match n {
                1 => SetterAccess::Private,
                2 => SetterAccess::Protected,
                3 => SetterAccess::Internal,
                4 => SetterAccess::ProtectedInternal,
                5 => SetterAccess::PrivateProtected,
                _ => SetterAccess::Public,
            },
            Some(AttributeValue::Str(s)) => {
                let member = s.rsplit('.').next().unwrap_or(s);
                match member {
                    "Private" => SetterAccess::Private,
                    "Protected" => SetterAccess::Protected,
                    "Internal" => SetterAccess::Internal,
                    "ProtectedInternal" => SetterAccess::ProtectedInternal,
                    "PrivateProtected" => SetterAccess::PrivateProtected,
                    _ => SetterAccess::Public,
                }
            }
            _ => SetterAccess::Public,
        }
    }

    /// Modifier prefix written before `set`, including the trailing space.
    pub fn modifier(self) -> &'static str {
        match self {
            SetterAccess::Public => "",
            SetterAccess::Private => "private ",
            SetterAccess::Protected => "protected ",
            SetterAccess::Internal => "internal ",
            SetterAccess::ProtectedInternal => "protected internal ",
            SetterAccess::PrivateProtected => "private protected ",
        }
    }
}

/// Arguments of the view-model directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewModelOptions {
    /// `ImplementINotifyPropertyChanging`
    pub property_changing: bool,
    /// `ImplementIDataErrorInfo`
    pub data_error_info: bool,
    /// `ImplementISupportServices` (DevExpress only)
    pub services: bool,
    /// `ImplementISupportParentViewModel` (DevExpress only)
    pub parent_view_model: bool,
    /// `ImplementIActiveAware` (Prism only)
    pub active_aware: bool,
    /// `ImplementICleanup` (MVVM Light only)
    pub cleanup: bool,
}

impl ViewModelOptions {
    /// Reads the directive of `flavor`. Flags the flavor does not support
    /// are ignored.
    pub fn read(flavor: Flavor, attr: &Attribute) -> Self {
        let devexpress = flavor == Flavor::DevExpress;
        Self {
            property_changing: attr.bool_arg("ImplementINotifyPropertyChanging", false),
            data_error_info: attr.bool_arg("ImplementIDataErrorInfo", false),
            services: devexpress && attr.bool_arg("ImplementISupportServices", false),
            parent_view_model: devexpress
                && attr.bool_arg("ImplementISupportParentViewModel", false),
            active_aware: flavor == Flavor::Prism && attr.bool_arg("ImplementIActiveAware", false),
            cleanup: flavor == Flavor::MvvmLight && attr.bool_arg("ImplementICleanup", false),
        }
    }
}

/// Arguments of a field directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyOptions {
    /// `IsVirtual`
    pub is_virtual: bool,
    /// `OnChangedMethod`
    pub on_changed: Option<String>,
    /// `OnChangingMethod`
    pub on_changing: Option<String>,
    /// `SetterAccessModifier`
    pub setter_access: SetterAccess,
}

impl PropertyOptions {
    /// Reads a field directive.
    pub fn read(attr: &Attribute) -> Self {
        Self {
            is_virtual: attr.bool_arg("IsVirtual", false),
            on_changed: non_empty(attr.str_arg("OnChangedMethod")),
            on_changing: non_empty(attr.str_arg("OnChangingMethod")),
            setter_access: SetterAccess::from_value(attr.arg("SetterAccessModifier")),
        }
    }
}

/// Arguments of a method directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOptions {
    /// `Name`
    pub name: Option<String>,
    /// `CanExecuteMethod`
    pub can_execute: Option<String>,
    /// `AllowMultipleExecution`
    pub allow_multiple_execution: bool,
    /// `UseCommandManager`
    pub use_command_manager: bool,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            name: None,
            can_execute: None,
            allow_multiple_execution: false,
            use_command_manager: true,
        }
    }
}

impl CommandOptions {
    /// Reads a method directive.
    pub fn read(attr: &Attribute) -> Self {
        Self {
            name: non_empty(attr.str_arg("Name")),
            can_execute: non_empty(attr.str_arg("CanExecuteMethod")),
            allow_multiple_execution: attr.bool_arg("AllowMultipleExecution", false),
            use_command_manager: attr.bool_arg("UseCommandManager", true),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}
