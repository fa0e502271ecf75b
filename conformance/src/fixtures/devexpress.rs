//! DevExpress view model: conventional and explicit names, a changed
//! callback taking the old value, a synchronous and an async command.

/// Snapshot.
pub const GRAPH: &str = r#"{
  "references": ["DevExpress.Mvvm"],
  "types": [
    {
      "name": "MainViewModel",
      "namespace": "Demo.ViewModels",
      "accessibility": "public",
      "is_partial": true,
      "attributes": [
        {
          "name": "ViewModelGen.GenerateViewModelAttribute",
          "arguments": {
            "ImplementINotifyPropertyChanging": true,
            "ImplementISupportServices": true
          }
        }
      ],
      "fields": [
        {
          "name": "_title",
          "type": { "name": "string", "nullable": true },
          "attributes": [{ "name": "ViewModelGen.GeneratePropertyAttribute" }]
        },
        {
          "name": "_count",
          "type": { "name": "int", "is_value_type": true },
          "attributes": [
            {
              "name": "ViewModelGen.GeneratePropertyAttribute",
              "arguments": { "SetterAccessModifier": "Private" }
            }
          ]
        }
      ],
      "methods": [
        {
          "name": "OnCountChanged",
          "return_type": { "name": "void" },
          "parameters": [{ "name": "oldValue", "type": { "name": "int", "is_value_type": true } }]
        },
        {
          "name": "Save",
          "return_type": { "name": "void" },
          "attributes": [{ "name": "ViewModelGen.GenerateCommandAttribute" }]
        },
        {
          "name": "CanSave",
          "return_type": { "name": "bool", "is_value_type": true }
        },
        {
          "name": "Load",
          "return_type": { "name": "System.Threading.Tasks.Task" },
          "parameters": [{ "name": "path", "type": { "name": "string" } }],
          "attributes": [
            {
              "name": "ViewModelGen.GenerateCommandAttribute",
              "arguments": { "AllowMultipleExecution": true }
            }
          ]
        }
      ]
    }
  ]
}"#;

/// No diagnostics.
pub const EXPECTED_CODES: &[&str] = &[];

/// One unit.
pub const EXPECTED_UNITS: &[&str] = &["MainViewModel.g.cs"];
