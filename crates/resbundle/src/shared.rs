//! A lock-guarded bundle for hosts that read from several threads

use crate::bundle::Bundle;
use crate::error::BundleResult;
use crate::loader::TreeLoader;
use crate::locale::LocaleId;
use crate::printf::FormatArg;
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Cheaply clonable handle to a [`Bundle`] behind a read/write lock.
///
/// Lookups take the read lock; `load` and `set_locale` take the write lock.
/// `load` decodes the tree without holding any lock and only locks to commit.
#[derive(Debug, Clone)]
pub struct SharedBundle {
    inner: Arc<RwLock<Bundle>>,
}

impl SharedBundle {
    pub fn new(bundle: Bundle) -> Self {
        Self {
            inner: Arc::new(RwLock::new(bundle)),
        }
    }

    /// See [`Bundle::load`]
    pub fn load(&self) -> BundleResult<()> {
        let root = self.inner.read().resources_dir().to_path_buf();
        let staged = TreeLoader::new(root).load()?;
        self.inner.write().commit(staged);
        Ok(())
    }

    /// See [`Bundle::set_locale`]
    pub fn set_locale(&self, locale: LocaleId) {
        self.inner.write().set_locale(locale);
    }

    /// See [`Bundle::get`]
    pub fn get(&self, id: &str, args: &[FormatArg]) -> String {
        self.inner.read().get(id, args)
    }

    /// See [`Bundle::get_with_locale`]
    pub fn get_with_locale(&self, locale: &LocaleId, id: &str, args: &[FormatArg]) -> String {
        self.inner.read().get_with_locale(locale, id, args)
    }

    pub fn current_locale(&self) -> LocaleId {
        self.inner.read().current_locale().clone()
    }

    /// Borrow the bundle for several reads under one lock
    pub fn read(&self) -> RwLockReadGuard<'_, Bundle> {
        self.inner.read()
    }
}

impl From<Bundle> for SharedBundle {
    fn from(bundle: Bundle) -> Self {
        Self::new(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle_args;
    use std::thread;

    fn shared() -> SharedBundle {
        let en = LocaleId::parse("en").unwrap();
        let mut bundle = Bundle::new("unused", en.clone());
        bundle.merge(en, [("count", "%d files")].into_iter().collect());
        SharedBundle::from(bundle)
    }

    #[test]
    fn test_clones_share_state() {
        let bundle = shared();
        let other = bundle.clone();
        other.set_locale(LocaleId::parse("en").unwrap());
        assert_eq!(bundle.current_locale().to_string(), "en");
        assert_eq!(bundle.get("count", &bundle_args![2]), "2 files");
    }

    #[test]
    fn test_concurrent_reads_and_locale_switches() {
        let bundle = shared();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let bundle = bundle.clone();
                thread::spawn(move || {
                    for n in 0..100 {
                        if i % 2 == 0 {
                            let tag = if n % 2 == 0 { "en" } else { "fr" };
                            bundle.set_locale(LocaleId::parse(tag).unwrap());
                        }
                        // "fr" has no catalog, so the id comes back verbatim
                        let message = bundle.get("count", &bundle_args![n]);
                        assert!(message == format!("{n} files") || message == "count");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_failed_load_keeps_catalogs() {
        let bundle = shared();
        let err = bundle.load();
        assert!(err.is_err(), "\"unused\" is not a directory");
        assert_eq!(
            bundle.get_with_locale(&LocaleId::parse("en").unwrap(), "count", &bundle_args![1]),
            "1 files"
        );
    }
}
