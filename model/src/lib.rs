//! Symbol model for the vmgen view-model generator.
//!
//! The `vmgen-model` crate is the neutral query surface between a host
//! compiler and the generator: an immutable snapshot of declared types, their
//! fields, methods and markers, and the base-type links that make up each
//! type's ancestor chain. Hosts build it in memory or hand it over as JSON.
//!
//! # Entry Point
//!
//! ```
//! let graph = vmgen_model::TypeGraph::from_json(
//!     r#"{"types": [{"name": "MainViewModel", "namespace": "App", "is_partial": true}]}"#,
//! )
//! .unwrap();
//! let vm = graph.find("App.MainViewModel").unwrap();
//! assert!(graph.ancestor_chain(vm).is_empty());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod attributes;
pub mod graph;
pub mod model;

pub use attributes::{Attribute, AttributeValue};
pub use graph::{AncestorChain, Ancestors, GraphError, TypeGraph};
pub use model::{
    Accessibility, ContainingType, FieldSymbol, MethodSymbol, Origin, Parameter, Span, TypeKind,
    TypeRef, TypeSymbol,
};
