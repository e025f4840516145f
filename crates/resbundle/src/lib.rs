//! Directory-driven message catalogs
//!
//! This crate loads message catalogs from a resource tree and serves
//! localized lookups. It includes:
//!
//! - Recursive loading of JSON, TOML and YAML files, one locale per file name
//! - Last-write-wins merging of catalogs split across files
//! - Canonical locale identifiers backed by `unic-langid`
//! - printf-style placeholder substitution
//! - Fallback from the current locale to a fixed default locale
//!
//! # Example
//!
//! ```rust,no_run
//! use resbundle::{bundle_args, Bundle, LocaleId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut bundle = Bundle::new("resources", LocaleId::parse("en")?);
//! bundle.load()?;
//! bundle.set_locale(LocaleId::parse("fr")?);
//!
//! let message = bundle.get("welcome", &bundle_args!["Ada"]);
//! println!("{}", message);
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod catalog;
pub mod error;
pub mod format;
pub mod loader;
pub mod locale;
pub mod printf;
pub mod settings;
pub mod shared;

pub use bundle::Bundle;
pub use catalog::Catalog;
pub use error::{BundleError, BundleResult, DecodeError};
pub use format::ResourceFormat;
pub use loader::TreeLoader;
pub use locale::LocaleId;
pub use printf::{sprintf, FormatArg};
pub use settings::{BundleSettings, SettingsError};
pub use shared::SharedBundle;
