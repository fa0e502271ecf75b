//! Generic MVVM Light view model nested in a partial host, with a field
//! named `value`, a renamed async command and cleanup.

/// Snapshot.
pub const GRAPH: &str = r#"{
  "references": ["GalaSoft.MvvmLight"],
  "types": [
    {
      "name": "EditorViewModel",
      "namespace": "Demo.Editing",
      "is_partial": true,
      "type_parameters": ["TDocument"],
      "containing_types": [{ "name": "Host", "is_partial": true }],
      "attributes": [
        {
          "name": "ViewModelGen.MvvmLight.GenerateViewModelAttribute",
          "arguments": { "ImplementICleanup": true }
        }
      ],
      "fields": [
        {
          "name": "value",
          "type": { "name": "TDocument", "nullable": true },
          "attributes": [
            {
              "name": "ViewModelGen.MvvmLight.GeneratePropertyAttribute",
              "arguments": { "IsVirtual": true }
            }
          ]
        }
      ],
      "methods": [
        {
          "name": "Close",
          "return_type": { "name": "Task" },
          "attributes": [
            {
              "name": "ViewModelGen.MvvmLight.GenerateCommandAttribute",
              "arguments": { "Name": "CloseDocumentCommand" }
            }
          ]
        },
        { "name": "OnCleanup", "return_type": { "name": "void" } }
      ]
    }
  ]
}"#;

/// No diagnostics.
pub const EXPECTED_CODES: &[&str] = &[];

/// One unit, named after the host and the type parameter.
pub const EXPECTED_UNITS: &[&str] = &["Host.EditorViewModel_TDocument.g.cs"];
