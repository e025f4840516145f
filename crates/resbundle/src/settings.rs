//! Bundle settings from a configuration file and the environment

use crate::bundle::Bundle;
use crate::error::BundleError;
use crate::format::ResourceFormat;
use crate::locale::LocaleId;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Overrides `resources_dir`
pub const ENV_RESOURCES_DIR: &str = "RESBUNDLE_RESOURCES_DIR";
/// Overrides `default_locale`
pub const ENV_DEFAULT_LOCALE: &str = "RESBUNDLE_DEFAULT_LOCALE";
/// Overrides `locale`
pub const ENV_LOCALE: &str = "RESBUNDLE_LOCALE";

/// Settings loading errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error when reading the settings file
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file extension is not json, toml, yaml or yml
    #[error("Unsupported settings file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to parse JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A locale field does not hold a valid language tag
    #[error("Invalid locale in '{field}': {source}")]
    InvalidLocale {
        field: &'static str,
        #[source]
        source: BundleError,
    },

    /// Settings validation error
    #[error("Settings validation failed: {0}")]
    Validation(String),
}

/// Where resources live and which locales to use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleSettings {
    /// Root of the resource tree
    pub resources_dir: PathBuf,
    /// Fallback locale tag
    pub default_locale: String,
    /// Initially selected locale tag; the bundle starts at `und` when unset
    pub locale: Option<String>,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            resources_dir: PathBuf::from("resources"),
            default_locale: "en".to_string(),
            locale: None,
        }
    }
}

impl BundleSettings {
    /// Read settings from a JSON, TOML or YAML file, then apply environment
    /// overrides and validate.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let format = ResourceFormat::from_path(path)
            .ok_or_else(|| SettingsError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path)?;

        let mut settings = Self::parse(&content, format)?;
        settings.apply_env_overrides();
        settings.validate()?;

        debug!("Loaded bundle settings from {:?}: {:?}", path, settings);
        Ok(settings)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings text in the given format, without overrides
    pub fn parse(content: &str, format: ResourceFormat) -> Result<Self, SettingsError> {
        Ok(match format {
            ResourceFormat::Json => serde_json::from_str(content)?,
            ResourceFormat::Toml => toml::from_str(content)?,
            ResourceFormat::Yaml if content.trim().is_empty() => Self::default(),
            ResourceFormat::Yaml => serde_yaml::from_str(content)?,
        })
    }

    /// Apply `RESBUNDLE_*` environment variables
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|var| env::var(var).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_RESOURCES_DIR) {
            self.resources_dir = PathBuf::from(dir);
        }
        if let Some(tag) = lookup(ENV_DEFAULT_LOCALE) {
            self.default_locale = tag;
        }
        if let Some(tag) = lookup(ENV_LOCALE) {
            self.locale = Some(tag).filter(|tag| !tag.trim().is_empty());
        }
    }

    /// Check that the directory is set and every locale tag parses
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.resources_dir.as_os_str().is_empty() {
            return Err(SettingsError::Validation(
                "resources_dir must not be empty".to_string(),
            ));
        }
        self.default_locale_id()?;
        self.locale_id()?;
        Ok(())
    }

    /// Parsed `default_locale`
    pub fn default_locale_id(&self) -> Result<LocaleId, SettingsError> {
        LocaleId::parse(&self.default_locale).map_err(|source| SettingsError::InvalidLocale {
            field: "default_locale",
            source,
        })
    }

    /// Parsed `locale`, if set
    pub fn locale_id(&self) -> Result<Option<LocaleId>, SettingsError> {
        self.locale
            .as_deref()
            .map(LocaleId::parse)
            .transpose()
            .map_err(|source| SettingsError::InvalidLocale {
                field: "locale",
                source,
            })
    }
}

impl Bundle {
    /// Build an unloaded bundle from validated settings
    pub fn from_settings(settings: &BundleSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let mut bundle = Self::new(&settings.resources_dir, settings.default_locale_id()?);
        if let Some(locale) = settings.locale_id()? {
            bundle.set_locale(locale);
        }
        Ok(bundle)
    }
}
