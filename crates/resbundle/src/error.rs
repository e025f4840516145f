//! Error types for bundle loading

use crate::format::ResourceFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a bundle load
#[derive(Error, Debug)]
pub enum BundleError {
    /// Reading a directory or file failed
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not select a known decoder
    #[error("Unsupported resource format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The file name does not start with a language tag
    #[error("Invalid locale '{tag}' in file name: {}", .path.display())]
    InvalidLocale { path: PathBuf, tag: String },

    /// The file content is not a flat string map in its declared format
    #[error("Failed to decode {format} resource {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        format: ResourceFormat,
        #[source]
        source: DecodeError,
    },

    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),
}

/// Decoder failures, one per supported format
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// TOML input must be valid UTF-8 before it reaches the parser
    #[error("content is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl BundleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the resource that caused the error, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::InvalidLocale { path, .. }
            | Self::Decode { path, .. } => Some(path),
            Self::InvalidLanguageId(_) => None,
        }
    }
}

/// Result type for bundle operations
pub type BundleResult<T> = Result<T, BundleError>;
