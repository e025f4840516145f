//! Test utilities and shared fixtures for the resbundle workspace.
//!
//! Everything here panics on failure, which is what tests want.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests.
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_resource(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create resource directory");
    }
    fs::write(&path, content).expect("Failed to write resource file");
    path
}

/// Sample catalog contents, one per supported format.
pub mod resource_fixtures {
    /// English catalog as JSON.
    pub const EN_JSON: &str = r#"{
  "hello": "Hello!",
  "welcome": "Welcome, %s!",
  "items": "You have %d items"
}"#;

    /// French catalog as YAML.
    pub const FR_YAML: &str = "hello: Bonjour !\nwelcome: \"Bienvenue, %s !\"\n";

    /// German catalog as TOML.
    pub const DE_TOML: &str = "hello = \"Hallo!\"\nwelcome = \"Willkommen, %s!\"\n";

    /// A catalog that only carries an empty template.
    pub const EMPTY_TEMPLATE_JSON: &str = r#"{"hello": ""}"#;

    /// Write the three sample catalogs into `root` as a flat directory.
    pub fn write_flat_tree(root: &std::path::Path) {
        super::write_resource(root, "en.json", EN_JSON);
        super::write_resource(root, "fr.yaml", FR_YAML);
        super::write_resource(root, "de.toml", DE_TOML);
    }

    /// Write the same three catalogs spread over nested directories.
    pub fn write_nested_tree(root: &std::path::Path) {
        super::write_resource(root, "app/en.json", EN_JSON);
        super::write_resource(root, "app/europe/fr.yaml", FR_YAML);
        super::write_resource(root, "legacy/old/de.toml", DE_TOML);
    }
}

/// Property-based testing strategies.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Message ids: dotted lowercase keys such as `menu.file_open`.
    pub fn message_id_strategy() -> impl Strategy<Value = String> {
        r"[a-z][a-z0-9_]{0,12}(\.[a-z][a-z0-9_]{0,12}){0,2}"
    }

    /// Locale tags drawn from a fixed, well-formed set.
    pub fn locale_tag_strategy() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "en", "en-US", "en-GB", "fr", "fr-CA", "de", "de-AT", "pt-BR", "zh-Hant-TW", "sr-Latn",
        ])
    }

    /// Templates free of `%` directives.
    pub fn plain_template_strategy() -> impl Strategy<Value = String> {
        r"[A-Za-z0-9 ,.!?']{1,40}"
    }
}
