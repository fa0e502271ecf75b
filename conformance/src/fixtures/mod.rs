//! Type-graph snapshots the suite generates from, with the outcome each one
//! must produce.

pub mod devexpress;
pub mod inheritance;
pub mod mvvmlight;
pub mod problems;
pub mod prism;

/// A snapshot together with its expected pass outcome.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    /// Short name used as the report subject.
    pub name: &'static str,
    /// JSON type-graph snapshot.
    pub graph: &'static str,
    /// Diagnostic ids the pass must report, sorted.
    pub expected_codes: &'static [&'static str],
    /// Hint names of the emitted units, in emission order.
    pub expected_units: &'static [&'static str],
}

/// Every fixture, in a fixed order.
pub fn all() -> [Fixture; 5] {
    [
        Fixture {
            name: "devexpress",
            graph: devexpress::GRAPH,
            expected_codes: devexpress::EXPECTED_CODES,
            expected_units: devexpress::EXPECTED_UNITS,
        },
        Fixture {
            name: "prism",
            graph: prism::GRAPH,
            expected_codes: prism::EXPECTED_CODES,
            expected_units: prism::EXPECTED_UNITS,
        },
        Fixture {
            name: "mvvmlight",
            graph: mvvmlight::GRAPH,
            expected_codes: mvvmlight::EXPECTED_CODES,
            expected_units: mvvmlight::EXPECTED_UNITS,
        },
        Fixture {
            name: "inheritance",
            graph: inheritance::GRAPH,
            expected_codes: inheritance::EXPECTED_CODES,
            expected_units: inheritance::EXPECTED_UNITS,
        },
        Fixture {
            name: "problems",
            graph: problems::GRAPH,
            expected_codes: problems::EXPECTED_CODES,
            expected_units: problems::EXPECTED_UNITS,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmgen_model::TypeGraph;

    #[test]
    fn every_fixture_parses() {
        for fixture in all() {
            let graph = TypeGraph::from_json(fixture.graph);
            assert!(graph.is_ok(), "{}: {:?}", fixture.name, graph.err());
        }
    }

    #[test]
    fn expected_codes_are_sorted() {
        for fixture in all() {
            let mut sorted = fixture.expected_codes.to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, fixture.expected_codes, "{}", fixture.name);
        }
    }
}
