//! Inheritance resolution: what a view model already has.
//!
//! For each capability the type itself and then its ancestors (nearest
//! first) are inspected for the capability's interface, for a generation
//! directive that will synthesize it, and for a raise-hook the generated
//! setters can call.

use vmgen_model::{AncestorChain, MethodSymbol, TypeGraph, TypeSymbol};

use crate::flavor::{self, Flavor};
use crate::mapping::canonical_type_name;
use crate::options::ViewModelOptions;

/// A piece of infrastructure a view model can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// Change notification after a property is set.
    PropertyChanged,
    /// Change notification before a property is set.
    PropertyChanging,
    /// Validation through `IDataErrorInfo`.
    DataErrorInfo,
    /// DevExpress service container access.
    Services,
    /// DevExpress parent view model link.
    ParentViewModel,
    /// Prism activation tracking.
    ActiveAware,
    /// MVVM Light cleanup.
    Cleanup,
}

impl Capability {
    /// Every capability, in emission order.
    pub const ALL: [Capability; 7] = [
        Capability::PropertyChanged,
        Capability::PropertyChanging,
        Capability::DataErrorInfo,
        Capability::Services,
        Capability::ParentViewModel,
        Capability::ActiveAware,
        Capability::Cleanup,
    ];

    /// Qualified interface name.
    pub fn interface(self) -> &'static str {
        match self {
            Capability::PropertyChanged => "System.ComponentModel.INotifyPropertyChanged",
            Capability::PropertyChanging => "System.ComponentModel.INotifyPropertyChanging",
            Capability::DataErrorInfo => "System.ComponentModel.IDataErrorInfo",
            Capability::Services => "DevExpress.Mvvm.ISupportServices",
            Capability::ParentViewModel => "DevExpress.Mvvm.ISupportParentViewModel",
            Capability::ActiveAware => "Prism.IActiveAware",
            Capability::Cleanup => "GalaSoft.MvvmLight.ICleanup",
        }
    }

    /// Interface name as written in a generated header.
    pub fn interface_simple_name(self) -> &'static str {
        vmgen_model::model::simple_name(self.interface())
    }

    /// Event-args type of the raise-hook, for notification capabilities.
    pub fn event_args_type(self) -> Option<&'static str> {
        match self {
            Capability::PropertyChanged => Some("PropertyChangedEventArgs"),
            Capability::PropertyChanging => Some("PropertyChangingEventArgs"),
            _ => None,
        }
    }

    /// Whether the capability is requested by `options`.
    pub fn requested_by(self, options: &ViewModelOptions) -> bool {
        match self {
            Capability::PropertyChanged => true,
            Capability::PropertyChanging => options.property_changing,
            Capability::DataErrorInfo => options.data_error_info,
            Capability::Services => options.services,
            Capability::ParentViewModel => options.parent_view_model,
            Capability::ActiveAware => options.active_aware,
            Capability::Cleanup => options.cleanup,
        }
    }

    fn hook_names(self, flavor: Flavor) -> &'static [&'static str] {
        match self {
            Capability::PropertyChanged => flavor.hook_names(false),
            Capability::PropertyChanging => flavor.hook_names(true),
            _ => &[],
        }
    }
}

/// Where a capability comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Nobody in the chain provides it.
    NotPresent,
    /// A hand-written declaration lists the interface.
    ImplementedByUser,
    /// An ancestor's generation directive synthesizes it.
    ImplementedByGeneration,
}

/// Parameter shape of a raise-hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookShape {
    /// Takes the cached event-args instance.
    TakesEventArgs,
    /// Takes the property name.
    TakesString,
}

/// A raise-hook the generated setters call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaiseHook {
    /// Method name.
    pub name: String,
    /// Parameter shape.
    pub shape: HookShape,
}

impl RaiseHook {
    /// The hook the engine itself emits for `capability`.
    pub fn synthesized(capability: Capability) -> Option<Self> {
        let name = match capability {
            Capability::PropertyChanged => "RaisePropertyChanged",
            Capability::PropertyChanging => "RaisePropertyChanging",
            _ => return None,
        };
        Some(Self {
            name: name.to_string(),
            shape: HookShape::TakesEventArgs,
        })
    }
}

/// A capability whose boilerplate is emitted for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    /// The capability.
    pub capability: Capability,
    /// Whether the raise-hook is emitted too. False when the type already
    /// declares a usable one.
    pub with_hook: bool,
}

impl From<Capability> for Declaration {
    fn from(capability: Capability) -> Self {
        Self {
            capability,
            with_hook: true,
        }
    }
}

/// Resolved state of one capability for one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityState {
    /// The capability.
    pub capability: Capability,
    /// Who provides it, if anyone.
    pub presence: Presence,
    /// Nearest visible raise-hook.
    pub hook: Option<RaiseHook>,
    /// Whether the type's directive asks for it.
    pub requested: bool,
    /// Qualified name of the providing type.
    pub provider: Option<String>,
}

impl CapabilityState {
    /// Whether the interface and its boilerplate must be emitted.
    pub fn needs_boilerplate(&self) -> bool {
        self.requested && self.presence == Presence::NotPresent
    }

    /// Whether the capability exists in the chain already.
    pub fn is_present(&self) -> bool {
        self.presence != Presence::NotPresent
    }

    /// The hook generated setters call. When the boilerplate is emitted an
    /// own hand-written hook is reused, otherwise the synthesized one.
    pub fn setter_hook(&self) -> Option<RaiseHook> {
        if self.needs_boilerplate() {
            self.hook
                .clone()
                .or_else(|| RaiseHook::synthesized(self.capability))
        } else if self.is_present() {
            self.hook.clone()
        } else {
            None
        }
    }

    /// Whether a required hook is missing for an already-present capability.
    pub fn hook_missing(&self) -> bool {
        self.capability.event_args_type().is_some()
            && self.requested
            && self.is_present()
            && self.hook.is_none()
    }
}

/// Resolves `capability` for `ty` in `graph`.
///
/// The first ancestor that lists the interface, emits it from its own
/// directive, or offers a hook derived types can see provides the
/// capability. A directive-carrying ancestor only counts when its own pass
/// emits the boilerplate, which is not the case when something above it
/// already provides the capability.
pub fn resolve_capability(
    graph: &TypeGraph,
    ty: &TypeSymbol,
    capability: Capability,
    flavor: Flavor,
    options: &ViewModelOptions,
) -> CapabilityState {
    let wants_hook = capability.event_args_type().is_some();
    let chain = graph.ancestor_chain(ty);
    let made = ancestor_synthesis(&chain, capability);

    let mut hook = find_hook(ty, capability, flavor, true);
    let (mut presence, mut provider) = if ty.implements(capability.interface()) {
        (Presence::ImplementedByUser, Some(ty.qualified_name()))
    } else {
        (Presence::NotPresent, None)
    };

    for (ancestor, synthesis) in chain.iter().zip(&made) {
        if presence != Presence::NotPresent && (hook.is_some() || !wants_hook) {
            break;
        }
        let found = find_hook(ancestor, capability, flavor, false);
        if presence == Presence::NotPresent {
            let by = if ancestor.implements(capability.interface()) {
                Some(if synthesis.directed {
                    Presence::ImplementedByGeneration
                } else {
                    Presence::ImplementedByUser
                })
            } else if synthesis.interface {
                Some(Presence::ImplementedByGeneration)
            } else if found.is_some() {
                Some(Presence::ImplementedByUser)
            } else {
                None
            };
            if let Some(by) = by {
                presence = by;
                provider = Some(ancestor.qualified_name());
            }
        }
        if hook.is_none() {
            hook = match found {
                Some(found) => Some(found),
                None if synthesis.hook => RaiseHook::synthesized(capability),
                None => None,
            };
        }
    }

    let state = CapabilityState {
        capability,
        presence,
        hook,
        requested: capability.requested_by(options),
        provider,
    };
    tracing::debug!(
        ty = %ty.qualified_name(),
        capability = ?capability,
        presence = ?state.presence,
        hook = ?state.hook.as_ref().map(|h| h.name.as_str()),
        "capability resolved"
    );
    state
}

/// Whether an ancestor's directive asks for one capability and what its
/// own generation pass emits for it.
#[derive(Debug, Clone, Copy, Default)]
struct Synthesis {
    directed: bool,
    interface: bool,
    hook: bool,
}

/// Replays each directive-carrying ancestor's own resolution, root first,
/// so a descendant only relies on boilerplate that is really emitted.
fn ancestor_synthesis(chain: &AncestorChain<'_>, capability: Capability) -> Vec<Synthesis> {
    let mut made = vec![Synthesis::default(); chain.len()];
    for (index, ancestor) in chain.iter().enumerate().rev() {
        let Some((own_flavor, attr)) = flavor::directive_of(ancestor) else {
            continue;
        };
        if !capability.requested_by(&ViewModelOptions::read(own_flavor, attr)) {
            continue;
        }
        let Some(slot) = made.get_mut(index) else {
            continue;
        };
        slot.directed = true;
        let provided = ancestor.implements(capability.interface())
            || chain
                .iter()
                .zip(&made)
                .skip(index + 1)
                .any(|(above, synthesis)| {
                    synthesis.interface
                        || above.implements(capability.interface())
                        || find_hook(above, capability, own_flavor, false).is_some()
                });
        if provided {
            continue;
        }
        if let Some(slot) = made.get_mut(index) {
            slot.interface = true;
            slot.hook = find_hook(ancestor, capability, own_flavor, true).is_none();
        }
    }
    made
}

fn find_hook(
    ty: &TypeSymbol,
    capability: Capability,
    flavor: Flavor,
    own: bool,
) -> Option<RaiseHook> {
    let args_type = capability.event_args_type()?;
    let mut string_hook = None;
    for name in capability.hook_names(flavor) {
        for method in ty.methods_named(name) {
            if !own && !method.accessibility.visible_to_derived() {
                continue;
            }
            match hook_shape(method, args_type) {
                Some(HookShape::TakesEventArgs) => {
                    return Some(RaiseHook {
                        name: method.name.clone(),
                        shape: HookShape::TakesEventArgs,
                    });
                }
                Some(HookShape::TakesString) if string_hook.is_none() => {
                    string_hook = Some(RaiseHook {
                        name: method.name.clone(),
                        shape: HookShape::TakesString,
                    });
                }
                _ => {}
            }
        }
    }
    string_hook
}

fn hook_shape(method: &MethodSymbol, args_type: &str) -> Option<HookShape> {
    if method.is_static || !method.return_type.is_void() {
        return None;
    }
    let param = method.single_parameter()?;
    let name = vmgen_model::model::simple_name(&param.ty.name);
    if name == args_type {
        Some(HookShape::TakesEventArgs)
    } else if canonical_type_name(&param.ty.name) == "System.String" {
        Some(HookShape::TakesString)
    } else {
        None
    }
}

/// Every capability of one type, resolved once.
#[derive(Debug, Clone)]
pub struct CapabilitySet {
    states: Vec<CapabilityState>,
}

impl CapabilitySet {
    /// Resolves every capability of `ty`.
    pub fn resolve(
        graph: &TypeGraph,
        ty: &TypeSymbol,
        flavor: Flavor,
        options: &ViewModelOptions,
    ) -> Self {
        let states = Capability::ALL
            .into_iter()
            .map(|c| resolve_capability(graph, ty, c, flavor, options))
            .collect();
        Self { states }
    }

    /// State of `capability`.
    pub fn state(&self, capability: Capability) -> Option<&CapabilityState> {
        self.states.iter().find(|s| s.capability == capability)
    }

    /// Capabilities whose interface and boilerplate are emitted, in order.
    pub fn to_declare(&self) -> impl Iterator<Item = Declaration> + '_ {
        self.states
            .iter()
            .filter(|s| s.needs_boilerplate())
            .map(|s| Declaration {
                capability: s.capability,
                with_hook: s.hook.is_none(),
            })
    }

    /// Hook called after a property changes.
    pub fn changed_hook(&self) -> Option<RaiseHook> {
        self.state(Capability::PropertyChanged)
            .and_then(CapabilityState::setter_hook)
    }

    /// Hook called before a property changes. Emitted when a hook exists
    /// and the capability is requested or already present.
    pub fn changing_hook(&self) -> Option<RaiseHook> {
        self.state(Capability::PropertyChanging)
            .and_then(CapabilityState::setter_hook)
    }

    /// Present capabilities whose required hook cannot be reached.
    pub fn missing_hooks(&self) -> impl Iterator<Item = &CapabilityState> + '_ {
        self.states.iter().filter(|s| s.hook_missing())
    }
}
