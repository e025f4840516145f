//! Resource file formats and their decoders

use crate::catalog::Catalog;
use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Encoding of a resource file, selected by its final extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceFormat {
    Json,
    Toml,
    Yaml,
}

impl ResourceFormat {
    /// Map an extension (without the dot, any case) to a format
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Format of the file at `path`, judged by its final extension only
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Decode raw file content into a flat id → template catalog.
    ///
    /// Nested tables, arrays and non-string values are rejected.
    pub fn decode(self, content: &[u8]) -> Result<Catalog, DecodeError> {
        match self {
            Self::Json => Ok(serde_json::from_slice(content)?),
            Self::Toml => {
                let text = std::str::from_utf8(content)?;
                Ok(toml::from_str(text)?)
            }
            Self::Yaml => {
                // An empty YAML document is an empty mapping, not an error
                if content.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Catalog::new());
                }
                Ok(serde_yaml::from_slice(content)?)
            }
        }
    }
}

impl fmt::Display for ResourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
        };
        f.write_str(name)
    }
}
