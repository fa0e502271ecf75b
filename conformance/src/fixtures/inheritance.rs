//! Two view models over referenced base types: one inherits the interface
//! and a protected hook two levels up, the other inherits the interface
//! without any reachable hook.

/// Snapshot.
pub const GRAPH: &str = r#"{
  "types": [
    {
      "name": "BindableBase",
      "namespace": "Framework",
      "origin": "metadata",
      "interfaces": ["System.ComponentModel.INotifyPropertyChanged"],
      "methods": [
        {
          "name": "RaisePropertyChanged",
          "return_type": { "name": "void" },
          "accessibility": "protected",
          "parameters": [
            { "name": "e", "type": { "name": "System.ComponentModel.PropertyChangedEventArgs" } }
          ]
        }
      ]
    },
    {
      "name": "PageBase",
      "namespace": "Framework",
      "origin": "metadata",
      "base_type": "Framework.BindableBase"
    },
    {
      "name": "SettingsViewModel",
      "namespace": "Demo",
      "is_partial": true,
      "base_type": "Framework.PageBase",
      "attributes": [{ "name": "ViewModelGen.GenerateViewModelAttribute" }],
      "fields": [
        {
          "name": "_theme",
          "type": { "name": "string" },
          "attributes": [{ "name": "ViewModelGen.GeneratePropertyAttribute" }]
        }
      ]
    },
    {
      "name": "LegacyBase",
      "namespace": "Framework",
      "origin": "metadata",
      "interfaces": ["System.ComponentModel.INotifyPropertyChanged"]
    },
    {
      "name": "LegacyViewModel",
      "namespace": "Demo",
      "is_partial": true,
      "base_type": "Framework.LegacyBase",
      "attributes": [{ "name": "ViewModelGen.GenerateViewModelAttribute" }],
      "fields": [
        {
          "name": "_name",
          "type": { "name": "string" },
          "attributes": [{ "name": "ViewModelGen.GeneratePropertyAttribute" }]
        }
      ]
    }
  ]
}"#;

/// The legacy view model has no reachable raise-hook.
pub const EXPECTED_CODES: &[&str] = &["VMG0007"];

/// Both types still get a unit; the legacy one without properties.
pub const EXPECTED_UNITS: &[&str] = &["SettingsViewModel.g.cs", "LegacyViewModel.g.cs"];
