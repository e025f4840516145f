//! Canonical locale identifiers

use crate::error::{BundleError, BundleResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A canonical language tag such as `en`, `en-US` or `zh-Hant-TW`.
///
/// Parsing normalizes case (`EN_us` becomes `en-US`) and accepts `_` as a
/// subtag separator, so two identifiers compare equal exactly when their
/// canonical forms match. The default value is the undetermined tag `und`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleId(LanguageIdentifier);

impl LocaleId {
    /// Parse and canonicalize a language tag
    pub fn parse(tag: &str) -> BundleResult<Self> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(BundleError::InvalidLanguageId(tag.to_string()));
        }
        trimmed
            .parse::<LanguageIdentifier>()
            .map(Self)
            .map_err(|_| BundleError::InvalidLanguageId(tag.to_string()))
    }

    /// The undetermined tag `und`
    pub fn undetermined() -> Self {
        Self::default()
    }

    /// Whether this is the undetermined tag
    pub fn is_undetermined(&self) -> bool {
        self.0 == LanguageIdentifier::default()
    }

    /// Primary language subtag, e.g. `en` for `en-US`
    pub fn language(&self) -> &str {
        self.0.language.as_str()
    }

    /// Region subtag, if present
    pub fn region(&self) -> Option<&str> {
        self.0.region.as_ref().map(|region| region.as_str())
    }
}

impl FromStr for LocaleId {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl PartialOrd for LocaleId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocaleId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

impl From<LanguageIdentifier> for LocaleId {
    fn from(id: LanguageIdentifier) -> Self {
        Self(id)
    }
}

impl TryFrom<String> for LocaleId {
    type Error = BundleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocaleId> for String {
    fn from(locale: LocaleId) -> Self {
        locale.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonicalizes_case_and_separator() {
        let locale = LocaleId::parse("EN_us").unwrap();
        assert_eq!(locale.to_string(), "en-US");
        assert_eq!(locale, LocaleId::parse("en-US").unwrap());
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.region(), Some("US"));
    }

    #[test]
    fn test_script_subtag_is_titlecased() {
        let locale: LocaleId = "zh-hant-tw".parse().unwrap();
        assert_eq!(locale.to_string(), "zh-Hant-TW");
    }

    #[test]
    fn test_invalid_tags_are_rejected() {
        for tag in ["", "   ", "not a tag", "e", "en-US-!!"] {
            assert!(
                matches!(LocaleId::parse(tag), Err(BundleError::InvalidLanguageId(_))),
                "expected '{tag}' to be rejected"
            );
        }
    }

    #[test]
    fn test_extension_and_private_use_tags_are_rejected() {
        // Only language, script, region and variants are understood
        for tag in ["en-US-u-ca-gregory", "en-x-foo", "root"] {
            assert!(LocaleId::parse(tag).is_err(), "{tag} should not parse");
        }
    }

    #[test]
    fn test_default_is_undetermined() {
        let locale = LocaleId::default();
        assert!(locale.is_undetermined());
        assert_eq!(locale.to_string(), "und");
        assert_eq!(locale, LocaleId::undetermined());
        assert!(!LocaleId::parse("en").unwrap().is_undetermined());
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let locale: LocaleId = serde_json::from_str("\"fr_ca\"").unwrap();
        assert_eq!(locale.to_string(), "fr-CA");
        assert_eq!(serde_json::to_string(&locale).unwrap(), "\"fr-CA\"");
        assert!(serde_json::from_str::<LocaleId>("\"??\"").is_err());
    }
}
