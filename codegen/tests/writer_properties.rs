//! Property-based tests for the source writer and naming rules.
//!
//! Every emitted line must be indented by exactly the depth of its first
//! append, whatever sequence of appends and line breaks produced it.

use proptest::prelude::*;
use vmgen_codegen::mapping::{command_field, command_name, property_name};
use vmgen_codegen::{LineState, SourceWriter};

// =============================================================================
// Indentation Invariant
// =============================================================================

proptest! {
    /// Each line is indented by `depth * width` of its first append, and
    /// mid-line appends from another depth are rejected.
    #[test]
    fn prop_lines_are_indented_by_their_first_depth(
        width in 1usize..6,
        ops in prop::collection::vec((0usize..6, "[a-z][a-z ]{0,7}", any::<bool>()), 1..40),
    ) {
        let mut w = SourceWriter::new(width);
        let mut depths: Vec<Option<usize>> = vec![None];
        for (depth, text, end_line) in &ops {
            let current = *depths.last().unwrap();
            let result = w.append(*depth, text);
            match current {
                Some(line_depth) if line_depth != *depth => prop_assert!(result.is_err()),
                _ => {
                    prop_assert!(result.is_ok());
                    *depths.last_mut().unwrap() = Some(*depth);
                }
            }
            if *end_line {
                w.newline();
                prop_assert_eq!(w.state(), LineState::AtLineStart);
                depths.push(None);
            }
        }
        let text = w.finish();
        let lines: Vec<&str> = text.split('\n').collect();
        prop_assert_eq!(lines.len(), depths.len());
        for (line, depth) in lines.iter().zip(&depths) {
            let leading = line.len() - line.trim_start_matches(' ').len();
            match depth {
                Some(d) => prop_assert_eq!(leading, d * width),
                None => prop_assert_eq!(*line, ""),
            }
        }
    }

    /// A newline always returns the writer to the start of a line.
    #[test]
    fn prop_newline_resets_state(depth in 0usize..10, text in "[a-z]{1,5}") {
        let mut w = SourceWriter::new(4);
        w.append(depth, &text).unwrap();
        prop_assert_eq!(w.state(), LineState::MidLine(depth));
        w.newline();
        prop_assert_eq!(w.state(), LineState::AtLineStart);
        prop_assert!(w.append(depth + 1, &text).is_ok());
    }
}

// =============================================================================
// Naming Properties
// =============================================================================

proptest! {
    /// A derived property name never collides with its field and is always
    /// a usable identifier start.
    #[test]
    fn prop_property_name_differs_from_field(field in "[_a-zA-Z][_a-zA-Z0-9]{0,10}") {
        let derived = property_name(&field);
        prop_assert!(!derived.name.is_empty());
        prop_assert_ne!(&derived.name, &field);
        let first = derived.name.chars().next().unwrap();
        prop_assert!(first.is_alphabetic() || first == '_');
    }

    /// Conventional names capitalise the first non-underscore character.
    #[test]
    fn prop_conventional_names_are_capitalised(field in "_{0,3}[a-z][a-zA-Z0-9]{0,8}") {
        let derived = property_name(&field);
        prop_assert!(derived.conventional);
        prop_assert!(derived.name.starts_with(|c: char| c.is_ascii_uppercase()));
        prop_assert_eq!(
            derived.name.to_lowercase(),
            field.trim_start_matches('_').to_lowercase()
        );
    }

    /// Command backing fields are the command name with a lower-case head.
    #[test]
    fn prop_command_field_lowercases_head(method in "[A-Z][a-zA-Z0-9]{0,10}") {
        let command = command_name(&method);
        let field = command_field(&command);
        prop_assert!(command.ends_with("Command"));
        prop_assert_eq!(&field[1..], &command[1..]);
        prop_assert!(field.starts_with(|c: char| c.is_ascii_lowercase()));
    }
}
