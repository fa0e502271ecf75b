//! Generation flavors: which runtime library's conventions are emitted.
//!
//! The flavor is resolved once per type from its view-model directive and
//! then passed explicitly to every resolution and emission step.

use vmgen_model::{Attribute, TypeSymbol};

/// Target runtime library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flavor {
    /// DevExpress MVVM.
    DevExpress,
    /// Prism.
    Prism,
    /// MVVM Light.
    MvvmLight,
}

/// Simple name of the type directive.
pub const VIEW_MODEL_MARKER: &str = "GenerateViewModelAttribute";
/// Simple name of the field directive.
pub const PROPERTY_MARKER: &str = "GeneratePropertyAttribute";
/// Simple name of the method directive.
pub const COMMAND_MARKER: &str = "GenerateCommandAttribute";

impl Flavor {
    /// Every flavor, in detection order.
    pub const ALL: [Flavor; 3] = [Flavor::DevExpress, Flavor::Prism, Flavor::MvvmLight];

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Flavor::DevExpress => "DevExpress MVVM",
            Flavor::Prism => "Prism",
            Flavor::MvvmLight => "MVVM Light",
        }
    }

    /// Namespace holding this flavor's markers.
    pub fn marker_namespace(self) -> &'static str {
        match self {
            Flavor::DevExpress => "ViewModelGen",
            Flavor::Prism => "ViewModelGen.Prism",
            Flavor::MvvmLight => "ViewModelGen.MvvmLight",
        }
    }

    /// Reference name of the runtime library.
    pub fn library(self) -> &'static str {
        match self {
            Flavor::DevExpress => "DevExpress.Mvvm",
            Flavor::Prism => "Prism",
            Flavor::MvvmLight => "GalaSoft.MvvmLight",
        }
    }

    /// Qualified name of the type directive.
    pub fn view_model_marker(self) -> String {
        format!("{}.{VIEW_MODEL_MARKER}", self.marker_namespace())
    }

    /// Qualified name of the field directive.
    pub fn property_marker(self) -> String {
        format!("{}.{PROPERTY_MARKER}", self.marker_namespace())
    }

    /// Qualified name of the method directive.
    pub fn command_marker(self) -> String {
        format!("{}.{COMMAND_MARKER}", self.marker_namespace())
    }

    /// Using directives of a generated unit, in emission order.
    pub fn usings(self) -> &'static [&'static str] {
        match self {
            Flavor::DevExpress => &[
                "System",
                "System.Collections.Generic",
                "System.ComponentModel",
                "System.Threading.Tasks",
                "System.Windows.Input",
                "DevExpress.Mvvm",
            ],
            Flavor::Prism => &[
                "System",
                "System.Collections.Generic",
                "System.ComponentModel",
                "System.ComponentModel.DataAnnotations",
                "System.Threading.Tasks",
                "System.Windows.Input",
                "Prism",
                "Prism.Commands",
            ],
            Flavor::MvvmLight => &[
                "System",
                "System.Collections.Generic",
                "System.ComponentModel",
                "System.ComponentModel.DataAnnotations",
                "System.Threading.Tasks",
                "System.Windows.Input",
                "GalaSoft.MvvmLight",
                "GalaSoft.MvvmLight.Command",
                "GalaSoft.MvvmLight.Messaging",
            ],
        }
    }

    /// Names under which a hand-written raise-hook is recognised for the
    /// changed (`changing == false`) or changing notification.
    pub fn hook_names(self, changing: bool) -> &'static [&'static str] {
        match (self, changing) {
            (Flavor::Prism, false) => &["RaisePropertyChanged", "OnPropertyChanged"],
            (Flavor::Prism, true) => &["RaisePropertyChanging", "OnPropertyChanging"],
            (_, false) => &["RaisePropertyChanged"],
            (_, true) => &["RaisePropertyChanging"],
        }
    }

    /// Command type for a synchronous or task-returning method.
    pub fn command_type(self, is_async: bool) -> &'static str {
        match (self, is_async) {
            (Flavor::DevExpress, true) => "AsyncCommand",
            (Flavor::DevExpress, false) | (Flavor::Prism, _) => "DelegateCommand",
            (Flavor::MvvmLight, _) => "RelayCommand",
        }
    }

    /// Whether task-returning commands wrap the method in an `async` lambda
    /// rather than using a dedicated async command type.
    pub fn wraps_async_execute(self) -> bool {
        !matches!(self, Flavor::DevExpress)
    }

    /// Flavor whose marker namespace is `namespace`.
    pub fn from_marker_namespace(namespace: &str) -> Option<Flavor> {
        Flavor::ALL
            .into_iter()
            .find(|f| f.marker_namespace() == namespace)
    }
}

/// Outcome of looking for view-model directives on a type.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection<'a> {
    /// The type carries no view-model directive.
    None,
    /// Exactly one flavor was requested.
    Single(Flavor, &'a Attribute),
    /// Directives for several flavors were found.
    Conflict(Vec<Flavor>),
}

/// Detects the generation flavor of `ty` from its view-model directives.
pub fn detect(ty: &TypeSymbol) -> Detection<'_> {
    let mut found: Vec<(Flavor, &Attribute)> = Vec::new();
    for attr in &ty.attributes {
        if attr.simple_name() != VIEW_MODEL_MARKER {
            continue;
        }
        let Some(flavor) = attr.namespace().and_then(Flavor::from_marker_namespace) else {
            continue;
        };
        if !found.iter().any(|(f, _)| *f == flavor) {
            found.push((flavor, attr));
        }
    }
    match found.as_slice() {
        [] => Detection::None,
        [(flavor, attr)] => Detection::Single(*flavor, attr),
        _ => Detection::Conflict(found.iter().map(|(f, _)| *f).collect()),
    }
}

/// The directive of any flavor carried by `ty`, ignoring conflicts. Used for
/// ancestors, which are never generated for in this pass.
pub fn directive_of(ty: &TypeSymbol) -> Option<(Flavor, &Attribute)> {
    match detect(ty) {
        Detection::None => None,
        Detection::Single(flavor, attr) => Some((flavor, attr)),
        Detection::Conflict(flavors) => {
            let flavor = *flavors.first()?;
            ty.attribute(&flavor.view_model_marker()).map(|a| (flavor, a))
        }
    }
}
