//! vmgen code generator.
//!
//! Reads a [`vmgen_model::TypeGraph`] snapshot and emits, for every source
//! type carrying a view-model directive, one partial type declaration that
//! adds change-notifying properties for marked fields, lazily created
//! commands for marked methods and whatever notification or service
//! infrastructure the type does not already inherit.
//!
//! # Pipeline
//!
//! - [`flavor`] picks the target runtime library from the type's directive
//! - [`resolve::capability`] walks the ancestor chain once per type
//! - [`resolve::property`] and [`resolve::command`] bind user callbacks
//! - [`emit`], [`unit`] and the member emitters write the text
//! - [`diagnostics`] collects everything that went wrong on the side
//!
//! ```
//! use vmgen_codegen::{generate, CancellationToken, GeneratorOptions};
//! use vmgen_model::TypeGraph;
//!
//! let graph = TypeGraph::from_json(r#"{"types": [{
//!     "name": "MainViewModel", "namespace": "App", "is_partial": true,
//!     "attributes": [{"name": "ViewModelGen.GenerateViewModelAttribute"}],
//!     "fields": [{"name": "_title", "type": {"name": "string"},
//!                 "attributes": [{"name": "ViewModelGen.GeneratePropertyAttribute"}]}]
//! }]}"#).unwrap();
//! let output = generate(&graph, &GeneratorOptions::default(), &CancellationToken::new()).unwrap();
//! assert_eq!(output.units[0].hint_name, "MainViewModel.g.cs");
//! assert!(output.units[0].text.contains("public string Title {"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod flavor;
pub mod generator;
pub mod interfaces;
pub mod mapping;
pub mod options;
pub mod properties;
pub mod resolve;
pub mod unit;

pub use config::{ConfigError, GeneratorOptions};
pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticCode, Severity};
pub use emit::{EmitError, Indented, LineState, SourceWriter};
pub use flavor::Flavor;
pub use generator::{
    generate, generate_type, write_units, CancellationToken, FileNameRegistry, GenerateError,
    GenerationOutput,
};
pub use unit::EmittedUnit;
