//! Resolution passes: inherited capabilities, then per-candidate members.

pub mod binding;
pub mod capability;
pub mod command;
pub mod property;

pub use binding::{CallbackBinding, Reported};
pub use capability::{
    resolve_capability, Capability, CapabilitySet, CapabilityState, Declaration, HookShape, Presence,
    RaiseHook,
};
pub use command::{resolve_command, CommandSpec};
pub use property::{resolve_property, PropertySpec};
