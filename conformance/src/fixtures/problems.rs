//! One structural or member problem per declaration.

/// Snapshot.
pub const GRAPH: &str = r#"{
  "types": [
    {
      "name": "NotPartialViewModel",
      "namespace": "Demo",
      "attributes": [{ "name": "ViewModelGen.GenerateViewModelAttribute" }]
    },
    {
      "name": "PointViewModel",
      "namespace": "Demo",
      "kind": "struct",
      "is_partial": true,
      "attributes": [{ "name": "ViewModelGen.GenerateViewModelAttribute" }]
    },
    {
      "name": "MixedViewModel",
      "namespace": "Demo",
      "is_partial": true,
      "attributes": [
        { "name": "ViewModelGen.GenerateViewModelAttribute" },
        { "name": "ViewModelGen.MvvmLight.GenerateViewModelAttribute" }
      ]
    },
    {
      "name": "InnerViewModel",
      "namespace": "Demo",
      "is_partial": true,
      "containing_types": [{ "name": "Outer" }],
      "attributes": [{ "name": "ViewModelGen.GenerateViewModelAttribute" }]
    },
    {
      "name": "ToolsViewModel",
      "namespace": "Demo",
      "is_partial": true,
      "attributes": [{ "name": "ViewModelGen.GenerateViewModelAttribute" }],
      "fields": [
        {
          "name": "_",
          "type": { "name": "int", "is_value_type": true },
          "attributes": [{ "name": "ViewModelGen.GeneratePropertyAttribute" }]
        }
      ],
      "methods": [
        {
          "name": "Compute",
          "return_type": { "name": "int", "is_value_type": true },
          "attributes": [{ "name": "ViewModelGen.GenerateCommandAttribute" }]
        },
        {
          "name": "Save",
          "return_type": { "name": "void" },
          "attributes": [
            { "name": "ViewModelGen.GenerateCommandAttribute", "arguments": { "Name": "Save" } }
          ]
        },
        {
          "name": "Open",
          "return_type": { "name": "void" },
          "parameters": [{ "name": "index", "type": { "name": "int", "is_value_type": true } }],
          "attributes": [{ "name": "ViewModelGen.GenerateCommandAttribute" }]
        },
        { "name": "CanOpen", "return_type": { "name": "bool", "is_value_type": true } },
        {
          "name": "CanOpen",
          "return_type": { "name": "bool", "is_value_type": true },
          "parameters": [{ "name": "index", "type": { "name": "int", "is_value_type": true } }]
        }
      ]
    }
  ]
}"#;

/// Sorted ids: missing `partial`, unusable field name, bad command
/// signature, non-partial host, two flavors, ambiguous predicate, command
/// named after its method, struct target.
pub const EXPECTED_CODES: &[&str] = &[
    "VMG0001", "VMG0003", "VMG0005", "VMG0010", "VMG0011", "VMG0012", "VMG0013", "VMG0014",
];

/// Only the type with member-level problems is emitted.
pub const EXPECTED_UNITS: &[&str] = &["ToolsViewModel.g.cs"];
