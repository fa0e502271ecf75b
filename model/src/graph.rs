//! The type graph snapshot for one generation pass and its ancestor walk.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Origin, TypeSymbol};

/// Errors raised while loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The JSON document is malformed or does not match the model.
    #[error("malformed type graph: {0}")]
    Json(#[from] serde_json::Error),
    /// Two declarations share the same qualified name.
    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),
}

/// Immutable snapshot of every type visible to a generation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeGraph {
    /// Names of the referenced runtime libraries. `None` when the host does
    /// not report references, in which case every library counts as present.
    #[serde(default)]
    pub references: Option<Vec<String>>,
    /// Every declared type, in the host's declaration order.
    #[serde(default)]
    pub types: Vec<TypeSymbol>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl TypeGraph {
    /// Builds a graph from already-constructed symbols.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateType`] if two symbols share a
    /// qualified name.
    pub fn new(types: Vec<TypeSymbol>) -> Result<Self, GraphError> {
        let mut graph = Self {
            references: None,
            types,
            index: HashMap::new(),
        };
        graph.reindex()?;
        Ok(graph)
    }

    /// Parses a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or declares a type twice.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let mut graph: TypeGraph = serde_json::from_str(json)?;
        graph.reindex()?;
        Ok(graph)
    }

    /// Sets the referenced runtime libraries.
    #[must_use]
    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = Some(references.into_iter().map(Into::into).collect());
        self
    }

    fn reindex(&mut self) -> Result<(), GraphError> {
        self.index.clear();
        for (i, ty) in self.types.iter().enumerate() {
            let name = ty.qualified_name();
            if self.index.insert(name.clone(), i).is_some() {
                return Err(GraphError::DuplicateType(name));
            }
        }
        Ok(())
    }

    /// Whether the runtime library `name` is referenced by the compilation.
    pub fn references_library(&self, name: &str) -> bool {
        self.references
            .as_ref()
            .map_or(true, |refs| refs.iter().any(|r| r == name))
    }

    /// Looks up a type by qualified name.
    pub fn find(&self, qualified: &str) -> Option<&TypeSymbol> {
        self.index.get(qualified).and_then(|&i| self.types.get(i))
    }

    /// The direct base type of `ty`, if it is part of the snapshot.
    pub fn base_of(&self, ty: &TypeSymbol) -> Option<&TypeSymbol> {
        ty.base_type.as_deref().and_then(|b| self.find(b))
    }

    /// Types declared in the compilation being generated for.
    pub fn source_types(&self) -> impl Iterator<Item = &TypeSymbol> {
        self.types.iter().filter(|t| t.origin == Origin::Source)
    }

    /// Iterates the ancestors of `ty`, nearest first.
    ///
    /// The walk is bounded by the number of types in the snapshot, so a
    /// malformed cyclic snapshot terminates instead of looping.
    pub fn ancestors<'g>(&'g self, ty: &'g TypeSymbol) -> Ancestors<'g> {
        Ancestors {
            graph: self,
            current: ty,
            remaining: self.types.len(),
        }
    }

    /// Collects the ancestor chain of `ty` (immediate parent to root).
    pub fn ancestor_chain<'g>(&'g self, ty: &'g TypeSymbol) -> AncestorChain<'g> {
        AncestorChain {
            ancestors: self.ancestors(ty).collect(),
        }
    }
}

/// Bounded iterator over a type's base types.
#[derive(Debug, Clone)]
pub struct Ancestors<'g> {
    graph: &'g TypeGraph,
    current: &'g TypeSymbol,
    remaining: usize,
}

impl<'g> Iterator for Ancestors<'g> {
    type Item = &'g TypeSymbol;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let base = self.graph.base_of(self.current)?;
        self.current = base;
        Some(base)
    }
}

/// Read-only ancestor chain, immediate parent first.
#[derive(Debug, Clone, Default)]
pub struct AncestorChain<'g> {
    ancestors: Vec<&'g TypeSymbol>,
}

impl<'g> AncestorChain<'g> {
    /// Number of ancestors found in the snapshot.
    pub fn len(&self) -> usize {
        self.ancestors.len()
    }

    /// Whether the type has no known ancestor.
    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }

    /// Ancestors nearest first. Reverse it for a root-first walk.
    pub fn iter(
        &self,
    ) -> impl DoubleEndedIterator<Item = &'g TypeSymbol> + ExactSizeIterator + '_ {
        self.ancestors.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived(name: &str, base: Option<&str>) -> TypeSymbol {
        let mut ty = TypeSymbol::class(Some("App"), name);
        ty.base_type = base.map(str::to_string);
        ty
    }

    #[test]
    fn chain_is_nearest_first() {
        let graph = TypeGraph::new(vec![
            derived("Root", None),
            derived("Middle", Some("App.Root")),
            derived("Leaf", Some("App.Middle")),
        ])
        .unwrap();
        let leaf = graph.find("App.Leaf").unwrap();
        let names: Vec<&str> = graph
            .ancestor_chain(leaf)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, ["Middle", "Root"]);
    }

    #[test]
    fn chain_reverses_to_root_first() {
        let graph = TypeGraph::new(vec![
            derived("Root", None),
            derived("Middle", Some("App.Root")),
            derived("Leaf", Some("App.Middle")),
        ])
        .unwrap();
        let leaf = graph.find("App.Leaf").unwrap();
        let chain = graph.ancestor_chain(leaf);
        assert_eq!(chain.iter().len(), 2);
        let names: Vec<&str> = chain.iter().rev().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Root", "Middle"]);
    }

    #[test]
    fn stale_index_finds_nothing() {
        let mut graph = TypeGraph::new(vec![derived("A", None)]).unwrap();
        graph.types.clear();
        assert!(graph.find("App.A").is_none());
    }

    #[test]
    fn unknown_base_ends_the_chain() {
        let graph = TypeGraph::new(vec![derived("Leaf", Some("System.Object"))]).unwrap();
        let leaf = graph.find("App.Leaf").unwrap();
        assert!(graph.ancestor_chain(leaf).is_empty());
    }

    #[test]
    fn cyclic_snapshot_terminates() {
        let graph = TypeGraph::new(vec![
            derived("A", Some("App.B")),
            derived("B", Some("App.A")),
        ])
        .unwrap();
        let a = graph.find("App.A").unwrap();
        assert_eq!(graph.ancestors(a).count(), 2);
    }

    #[test]
    fn duplicate_types_are_rejected() {
        let err = TypeGraph::new(vec![derived("A", None), derived("A", None)]).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateType(name) if name == "App.A"));
    }

    #[test]
    fn json_round_trip_rebuilds_index() {
        let graph = TypeGraph::from_json(
            r#"{
                "references": ["DevExpress.Mvvm"],
                "types": [
                    {"name": "Base", "namespace": "App", "origin": "metadata"},
                    {"name": "Vm", "namespace": "App", "is_partial": true, "base_type": "App.Base"}
                ]
            }"#,
        )
        .unwrap();
        assert!(graph.references_library("DevExpress.Mvvm"));
        assert!(!graph.references_library("Prism"));
        assert_eq!(graph.source_types().count(), 1);
        let vm = graph.find("App.Vm").unwrap();
        assert_eq!(graph.base_of(vm).map(|b| b.name.as_str()), Some("Base"));
    }

    #[test]
    fn unreported_references_count_as_present() {
        let graph = TypeGraph::new(Vec::new()).unwrap();
        assert!(graph.references_library("Prism"));
    }
}
