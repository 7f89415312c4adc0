//! Locale tags, supported-locale sets, and platform locale detection.
//!
//! A [`LocaleTag`] is a dash-separated identifier ordered from most general
//! to most specific subtag (`en`, `en-au`). Tags are canonicalised to lower
//! case on construction so lookups against a [`SupportedLocales`] set are
//! case-insensitive without the set needing to care.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

/// A canonicalised locale identifier such as `en` or `en-au`.
///
/// Construction lowercases the input; no further validation is applied. The
/// resolver trusts well-formed dash-separated tags, so a malformed tag simply
/// fails to match anything in the supported set. The empty tag is legal and
/// means "no locale requested".
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub struct LocaleTag(String);

impl LocaleTag {
    /// Canonicalises `raw` into a tag, trimming whitespace and lowercasing.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether this is the empty tag (no locale requested).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the dash-separated subtags, most general first.
    ///
    /// The empty tag yields no subtags.
    pub fn subtags(&self) -> impl Iterator<Item = &str> {
        self.0.split('-').filter(|part| !part.is_empty())
    }

    /// Enumerates the cumulative prefixes of this tag, least specific first.
    ///
    /// `en-au-x` yields `en`, `en-au`, `en-au-x`. The empty tag yields
    /// nothing.
    pub fn prefixes(&self) -> impl Iterator<Item = Self> + '_ {
        let mut current = String::new();
        self.subtags().map(move |part| {
            if !current.is_empty() {
                current.push('-');
            }
            current.push_str(part);
            Self(current.clone())
        })
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocaleTag {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for LocaleTag {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<LocaleTag> for String {
    fn from(tag: LocaleTag) -> Self {
        tag.0
    }
}

/// The set of locale suffixes a root bundle actually has data for.
///
/// Declared on the root bundle itself or supplied through
/// [`LoaderConfig`](crate::LoaderConfig); a suffix absent from this set is
/// never fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SupportedLocales(BTreeSet<LocaleTag>);

impl SupportedLocales {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Whether `tag` has bundle data available.
    #[must_use]
    pub fn contains(&self, tag: &LocaleTag) -> bool {
        self.0.contains(tag)
    }

    /// Whether the set declares any locales at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds `tag` to the set.
    pub fn insert(&mut self, tag: LocaleTag) {
        self.0.insert(tag);
    }
}

impl<T: Into<LocaleTag>> FromIterator<T> for SupportedLocales {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Reads the platform locale and normalises it into a [`LocaleTag`].
///
/// Returns `None` when the platform reports no locale or reports something
/// that does not normalise to a valid language identifier. Consulted only
/// when [`LoaderConfig`](crate::LoaderConfig) opts in; the chain resolver
/// itself never reads ambient state.
#[must_use]
pub fn system_locale() -> Option<LocaleTag> {
    sys_locale::get_locale()
        .as_deref()
        .and_then(normalize_platform_locale)
}

/// Normalises a raw platform locale string into a canonical [`LocaleTag`].
///
/// Strips encoding suffixes (`.UTF-8`) and variant sections (`@latin`),
/// replaces underscores with hyphens (`en_AU` is common on POSIX and
/// Android), and validates the result as a BCP 47 language identifier before
/// lowercasing.
#[must_use]
pub fn normalize_platform_locale(raw: &str) -> Option<LocaleTag> {
    let stripped = raw.split(['.', '@']).next().unwrap_or_default().trim();
    if stripped.is_empty() {
        return None;
    }
    let candidate = stripped.replace('_', "-");
    LanguageIdentifier::from_str(&candidate)
        .ok()
        .map(|lang| LocaleTag::new(&lang.to_string()))
}
