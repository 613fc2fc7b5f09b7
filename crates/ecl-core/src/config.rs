//! Resolution configuration.
//!
//! [`Config`] carries the names under which resolved values are written onto
//! stub records and inline links. Every field defaults, so an empty `{}` file
//! is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Root configuration for stub resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extension-property section used on stub records.
    pub extension_section: String,
    /// Extension-data key the mapped metadata field set is stored under.
    pub metadata_key: String,
    /// Prefix of data attributes written on inline links.
    pub attribute_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension_section: "ECL".into(),
            metadata_key: "ECL-ExternalMetadata".into(),
            attribute_prefix: "data-ecl".into(),
        }
    }
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None`, the file does not exist, or it cannot be parsed.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.extension_section.trim().is_empty() {
            warnings.push("extension_section is empty".into());
        }
        if self.metadata_key.trim().is_empty() {
            warnings.push("metadata_key is empty".into());
        }
        if !self.metadata_key.trim().is_empty() && self.metadata_key == self.extension_section {
            warnings.push(format!(
                "metadata_key equals extension_section '{}'; metadata would replace the extension properties",
                self.metadata_key
            ));
        }
        if self.attribute_prefix.trim().is_empty() {
            warnings.push("attribute_prefix is empty".into());
        } else if self.attribute_prefix.chars().any(char::is_whitespace) {
            warnings.push(format!(
                "attribute_prefix '{}' contains whitespace and cannot form attribute names",
                self.attribute_prefix
            ));
        }

        warnings
    }

    /// Full name of a data attribute, e.g. `data-eclMimeType` for `MimeType`.
    pub fn attribute_name(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.attribute_prefix)
    }
}
