//! Sealed Prism view model with active-awareness, data-error info, an
//! explicit changed callback and a command whose predicate takes a
//! nullable argument.

/// Snapshot.
pub const GRAPH: &str = r#"{
  "references": ["Prism"],
  "types": [
    {
      "name": "ShellViewModel",
      "namespace": "Demo.Shell",
      "is_partial": true,
      "is_sealed": true,
      "attributes": [
        {
          "name": "ViewModelGen.Prism.GenerateViewModelAttribute",
          "arguments": { "ImplementIActiveAware": true, "ImplementIDataErrorInfo": true }
        }
      ],
      "fields": [
        {
          "name": "_status",
          "type": { "name": "string" },
          "attributes": [
            {
              "name": "ViewModelGen.Prism.GeneratePropertyAttribute",
              "arguments": { "OnChangedMethod": "StatusUpdated" }
            }
          ]
        }
      ],
      "methods": [
        { "name": "StatusUpdated", "return_type": { "name": "void" } },
        { "name": "OnIsActiveChanged", "return_type": { "name": "void" } },
        {
          "name": "Navigate",
          "return_type": { "name": "void" },
          "parameters": [{ "name": "target", "type": { "name": "string" } }],
          "attributes": [{ "name": "ViewModelGen.Prism.GenerateCommandAttribute" }]
        },
        {
          "name": "CanNavigate",
          "return_type": { "name": "bool", "is_value_type": true },
          "parameters": [{ "name": "target", "type": { "name": "string", "nullable": true } }]
        }
      ]
    }
  ]
}"#;

/// No diagnostics.
pub const EXPECTED_CODES: &[&str] = &[];

/// One unit.
pub const EXPECTED_UNITS: &[&str] = &["ShellViewModel.g.cs"];
