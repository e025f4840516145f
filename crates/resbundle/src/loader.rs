//! Recursive resource tree loading

use crate::catalog::Catalog;
use crate::error::{BundleError, BundleResult};
use crate::format::ResourceFormat;
use crate::locale::LocaleId;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Catalogs keyed by locale, as produced by a tree walk
pub type Catalogs = HashMap<LocaleId, Catalog>;

/// Walks a resource directory and decodes every file in it.
///
/// The file name decides everything: `en-US.menu.json` holds `en-US`
/// messages in JSON, wherever it sits in the tree. Directory names are
/// ignored, so a flat layout and a nested one load the same catalogs.
#[derive(Debug, Clone)]
pub struct TreeLoader {
    /// Root of the resource tree
    root: PathBuf,
}

impl TreeLoader {
    /// Create a loader for the tree rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Walk the whole tree and return the merged catalogs.
    ///
    /// Stops at the first failure; nothing decoded so far is returned.
    pub fn load(&self) -> BundleResult<Catalogs> {
        info!("Loading resources from {:?}", self.root);

        let mut catalogs = Catalogs::new();
        if let Err(e) = self.load_folder(&self.root, &mut catalogs) {
            error!("Aborting resource load from {:?}: {}", self.root, e);
            return Err(e);
        }

        info!(
            "Loaded {} locale(s), {} message(s) from {:?}",
            catalogs.len(),
            catalogs.values().map(Catalog::len).sum::<usize>(),
            self.root
        );
        Ok(catalogs)
    }

    fn load_folder(&self, dir: &Path, catalogs: &mut Catalogs) -> BundleResult<()> {
        debug!("Visiting resource directory: {:?}", dir);

        let mut entries = fs::read_dir(dir)
            .map_err(|e| BundleError::io(dir, e))?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| BundleError::io(dir, e))?;
        // read_dir order is platform dependent; merge order must not be
        entries.sort();

        for path in entries {
            if path.is_dir() {
                self.load_folder(&path, catalogs)?;
            } else {
                Self::load_file(&path, catalogs)?;
            }
        }
        Ok(())
    }

    /// Decode a single resource file and merge it into `catalogs`
    pub fn load_file(path: &Path, catalogs: &mut Catalogs) -> BundleResult<()> {
        let locale = locale_from_path(path)?;
        let format = ResourceFormat::from_path(path).ok_or_else(|| BundleError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let content = fs::read(path).map_err(|e| BundleError::io(path, e))?;
        let catalog = format.decode(&content).map_err(|source| BundleError::Decode {
            path: path.to_path_buf(),
            format,
            source,
        })?;

        debug!(
            "Decoded {} message(s) for locale {} from {:?} ({})",
            catalog.len(),
            locale,
            path,
            format
        );
        merge_catalog(catalogs, locale, catalog);
        Ok(())
    }
}

/// Install `catalog` for `locale`, or overlay it onto the existing one
pub fn merge_catalog(catalogs: &mut Catalogs, locale: LocaleId, catalog: Catalog) {
    match catalogs.get_mut(&locale) {
        Some(existing) => existing.merge(catalog),
        None => {
            catalogs.insert(locale, catalog);
        }
    }
}

/// Locale named by the part of the file name before its first `.`
pub fn locale_from_path(path: &Path) -> BundleResult<LocaleId> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or_default();

    LocaleId::parse(stem).map_err(|_| BundleError::InvalidLocale {
        path: path.to_path_buf(),
        tag: stem.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn en() -> LocaleId {
        LocaleId::parse("en").unwrap()
    }

    #[test]
    fn test_locale_from_path_strips_all_extensions() {
        assert_eq!(locale_from_path(Path::new("a/b/en-US.menu.json")).unwrap().to_string(), "en-US");
        assert_eq!(locale_from_path(Path::new("fr.yaml")).unwrap().to_string(), "fr");

        let err = locale_from_path(Path::new("dir/.hidden.json")).unwrap_err();
        assert!(matches!(err, BundleError::InvalidLocale { ref tag, .. } if tag.is_empty()));
        let err = locale_from_path(Path::new("not_a_locale!.json")).unwrap_err();
        assert!(matches!(err, BundleError::InvalidLocale { .. }));
    }

    #[test]
    fn test_merge_catalog_installs_then_overlays() {
        let mut catalogs = Catalogs::new();
        merge_catalog(&mut catalogs, en(), [("a", "1"), ("b", "2")].into_iter().collect());
        merge_catalog(&mut catalogs, en(), [("b", "3"), ("c", "4")].into_iter().collect());

        let catalog = &catalogs[&en()];
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("a"), Some("1"));
        assert_eq!(catalog.get("b"), Some("3"));
        assert_eq!(catalog.get("c"), Some("4"));
    }

    #[test]
    fn test_load_merges_files_of_one_locale() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en.json", r#"{"a": "json", "b": "json"}"#);
        write(dir.path(), "nested/en.yaml", "b: yaml\nc: yaml\n");

        let catalogs = TreeLoader::new(dir.path()).load().unwrap();
        let catalog = &catalogs[&en()];
        // "en.json" sorts before "nested", so YAML wins for "b"
        assert_eq!(catalog.get("a"), Some("json"));
        assert_eq!(catalog.get("b"), Some("yaml"));
        assert_eq!(catalog.get("c"), Some("yaml"));
    }

    #[test]
    fn test_unsupported_extension_aborts() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "en.json", r#"{"a": "1"}"#);
        write(dir.path(), "en.txt", "a = 1");

        let err = TreeLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, BundleError::UnsupportedFormat { .. }));
        assert_eq!(err.path(), Some(dir.path().join("en.txt").as_path()));
    }

    #[test]
    fn test_file_without_extension_is_unsupported() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "de", "a = \"1\"");

        let err = TreeLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, BundleError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_decode_failure_aborts() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "fr.toml", "a = ");

        let err = TreeLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(
            err,
            BundleError::Decode {
                format: ResourceFormat::Toml,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = TreeLoader::new(dir.path().join("absent")).load().unwrap_err();
        assert!(matches!(err, BundleError::Io { .. }));
    }

    #[test]
    fn test_empty_tree_loads_nothing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("empty/deeper")).unwrap();
        assert!(TreeLoader::new(dir.path()).load().unwrap().is_empty());
    }
}
