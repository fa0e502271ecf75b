//! Generator options, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading [`GeneratorOptions`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path of the configuration file.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The document is not valid TOML or has unknown keys.
    #[error("invalid generator configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Output formatting options shared by every unit of a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Emit `#nullable enable` and nullable annotations on generated fields.
    pub nullable_context: bool,
    /// Emit the auto-generated banner and warning suppression.
    pub banner: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            nullable_context: true,
            banner: true,
        }
    }
}

impl GeneratorOptions {
    /// Parses options from a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed input or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Toml`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// `name` with a nullable annotation when the nullable context is on.
    pub fn nullable(&self, name: &str) -> String {
        if self.nullable_context {
            format!("{name}?")
        } else {
            name.to_string()
        }
    }
}
