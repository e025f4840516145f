//! The in-memory bundle store and its lookup path

use crate::catalog::Catalog;
use crate::error::BundleResult;
use crate::loader::{merge_catalog, Catalogs, TreeLoader};
use crate::locale::LocaleId;
use crate::printf::{sprintf, FormatArg};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Message catalogs for every locale found under a resource directory.
///
/// Create it with a root and a default locale, call [`Bundle::load`] once,
/// then read. Lookups never fail: an unknown locale yields the message id
/// and an unknown id yields an empty string.
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Root of the resource tree
    resources_dir: PathBuf,
    /// Catalogs by canonical locale
    catalogs: Catalogs,
    /// Locale tried when the current one yields nothing
    default_locale: LocaleId,
    /// Locale tried first; `und` until set
    current_locale: LocaleId,
}

impl Bundle {
    /// Create an empty bundle. Nothing is read until [`Bundle::load`].
    pub fn new<P: AsRef<Path>>(resources_dir: P, default_locale: LocaleId) -> Self {
        Self {
            resources_dir: resources_dir.as_ref().to_path_buf(),
            catalogs: Catalogs::new(),
            default_locale,
            current_locale: LocaleId::undetermined(),
        }
    }

    /// Ingest every resource file under the resource directory.
    ///
    /// The whole tree is decoded before anything is committed: on error the
    /// bundle keeps exactly the catalogs it had before the call.
    pub fn load(&mut self) -> BundleResult<()> {
        let staged = TreeLoader::new(&self.resources_dir).load()?;
        self.commit(staged);
        Ok(())
    }

    pub(crate) fn commit(&mut self, staged: Catalogs) {
        for (locale, catalog) in staged {
            self.merge(locale, catalog);
        }
    }

    /// Overlay `catalog` onto the catalog of `locale`, creating it if needed
    pub fn merge(&mut self, locale: LocaleId, catalog: Catalog) {
        merge_catalog(&mut self.catalogs, locale, catalog);
    }

    /// Select the locale [`Bundle::get`] tries first. Not validated.
    pub fn set_locale(&mut self, locale: LocaleId) {
        debug!("Current locale set to {}", locale);
        self.current_locale = locale;
    }

    /// Resolve `id` in the current locale, falling back to the default
    /// locale when the result is empty.
    ///
    /// An id returned verbatim because the current locale has no catalog is
    /// not empty and therefore never falls back.
    pub fn get(&self, id: &str, args: &[FormatArg]) -> String {
        let message = self.get_with_locale(&self.current_locale, id, args);
        if !message.is_empty() {
            return message;
        }

        trace!(
            "Message '{}' empty in {}, falling back to {}",
            id,
            self.current_locale,
            self.default_locale
        );
        self.get_with_locale(&self.default_locale, id, args)
    }

    /// Resolve `id` in `locale` and substitute `args`.
    ///
    /// - no catalog for `locale`: `id` itself
    /// - catalog without `id`: empty string
    /// - otherwise the template, formatted when both it and `args` are
    ///   non-empty
    pub fn get_with_locale(&self, locale: &LocaleId, id: &str, args: &[FormatArg]) -> String {
        let Some(catalog) = self.catalogs.get(locale) else {
            return id.to_string();
        };

        let template = catalog.get(id).unwrap_or_default();
        if template.is_empty() || args.is_empty() {
            template.to_string()
        } else {
            sprintf(template, args)
        }
    }

    /// Raw template of `id` in `locale`, distinguishing missing from empty
    pub fn lookup(&self, locale: &LocaleId, id: &str) -> Option<&str> {
        self.catalogs.get(locale).and_then(|catalog| catalog.get(id))
    }

    /// Raw template of `id` in the current locale, else the default locale
    pub fn lookup_with_fallback(&self, id: &str) -> Option<&str> {
        self.lookup(&self.current_locale, id)
            .or_else(|| self.lookup(&self.default_locale, id))
    }

    /// Whether `locale` has a template for `id`, empty or not
    pub fn has_message(&self, locale: &LocaleId, id: &str) -> bool {
        self.lookup(locale, id).is_some()
    }

    /// Catalog of `locale`, if any file provided one
    pub fn catalog(&self, locale: &LocaleId) -> Option<&Catalog> {
        self.catalogs.get(locale)
    }

    /// All catalogs by locale
    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Locales that have a catalog, sorted by tag
    pub fn locales(&self) -> Vec<&LocaleId> {
        let mut locales: Vec<_> = self.catalogs.keys().collect();
        locales.sort();
        locales
    }

    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    pub fn default_locale(&self) -> &LocaleId {
        &self.default_locale
    }

    pub fn current_locale(&self) -> &LocaleId {
        &self.current_locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle_args;

    fn locale(tag: &str) -> LocaleId {
        LocaleId::parse(tag).unwrap()
    }

    fn sample_bundle() -> Bundle {
        let mut bundle = Bundle::new("unused", locale("en"));
        bundle.merge(
            locale("en"),
            [("hello", "hello %s"), ("bye", "Goodbye"), ("blank", "")]
                .into_iter()
                .collect(),
        );
        bundle.merge(locale("fr"), [("bye", "Au revoir"), ("blank", "")].into_iter().collect());
        bundle
    }

    #[test]
    fn test_new_bundle_is_empty_and_undetermined() {
        let bundle = Bundle::new("resources", locale("en"));
        assert!(bundle.catalogs().is_empty());
        assert!(bundle.current_locale().is_undetermined());
        assert_eq!(bundle.default_locale(), &locale("en"));
        assert_eq!(bundle.resources_dir(), Path::new("resources"));
    }

    #[test]
    fn test_get_with_locale_unknown_locale_returns_id() {
        let bundle = sample_bundle();
        assert_eq!(bundle.get_with_locale(&locale("de"), "bye", &[]), "bye");
        assert_eq!(bundle.get_with_locale(&locale("de"), "bye", &bundle_args!["x"]), "bye");
    }

    #[test]
    fn test_get_with_locale_missing_id_is_empty() {
        let bundle = sample_bundle();
        assert_eq!(bundle.get_with_locale(&locale("fr"), "hello", &[]), "");
        assert_eq!(bundle.get_with_locale(&locale("fr"), "hello", &bundle_args!["x"]), "");
    }

    #[test]
    fn test_get_with_locale_formats_only_with_args() {
        let bundle = sample_bundle();
        assert_eq!(bundle.get_with_locale(&locale("en"), "hello", &[]), "hello %s");
        assert_eq!(
            bundle.get_with_locale(&locale("en"), "hello", &bundle_args!["world"]),
            "hello world"
        );
        assert_eq!(bundle.get_with_locale(&locale("en"), "blank", &bundle_args!["x"]), "");
    }

    #[test]
    fn test_get_falls_back_to_default_on_empty() {
        let mut bundle = sample_bundle();
        bundle.set_locale(locale("fr"));

        assert_eq!(bundle.get("bye", &[]), "Au revoir");
        assert_eq!(bundle.get("hello", &bundle_args!["world"]), "hello world");
        assert_eq!(bundle.get("blank", &[]), "");
    }

    #[test]
    fn test_get_does_not_fall_back_when_id_is_returned() {
        let mut bundle = sample_bundle();
        bundle.set_locale(locale("de"));
        assert_eq!(bundle.get("bye", &[]), "bye");

        // Unset current locale behaves like any locale without a catalog
        let bundle = sample_bundle();
        assert_eq!(bundle.get("bye", &[]), "bye");
    }

    #[test]
    fn test_set_locale_does_not_touch_catalogs() {
        let mut bundle = sample_bundle();
        let before = bundle.catalogs().clone();
        bundle.set_locale(locale("ja"));
        bundle.set_locale(locale("fr"));
        assert_eq!(bundle.catalogs(), &before);
        assert_eq!(bundle.current_locale(), &locale("fr"));
        assert_eq!(bundle.default_locale(), &locale("en"));
    }

    #[test]
    fn test_lookup_distinguishes_empty_from_missing() {
        let mut bundle = sample_bundle();
        bundle.set_locale(locale("fr"));

        assert_eq!(bundle.lookup(&locale("fr"), "blank"), Some(""));
        assert_eq!(bundle.lookup(&locale("fr"), "hello"), None);
        assert_eq!(bundle.lookup(&locale("de"), "hello"), None);
        assert_eq!(bundle.lookup_with_fallback("hello"), Some("hello %s"));
        assert_eq!(bundle.lookup_with_fallback("blank"), Some(""));
        assert_eq!(bundle.lookup_with_fallback("nope"), None);
        assert!(bundle.has_message(&locale("fr"), "blank"));
        assert!(!bundle.has_message(&locale("fr"), "hello"));
    }

    #[test]
    fn test_locales_are_sorted() {
        let bundle = sample_bundle();
        let tags: Vec<String> = bundle.locales().iter().map(ToString::to_string).collect();
        assert_eq!(tags, vec!["en", "fr"]);
        assert_eq!(bundle.catalog(&locale("fr")).map(Catalog::len), Some(2));
    }
}
