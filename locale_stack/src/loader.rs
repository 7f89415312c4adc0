//! The orchestrator tying fetch, chain resolution, and merge together.
//!
//! Fetching is an external collaborator behind the [`BundleFetcher`] seam;
//! this module only decides *what* to fetch and in *which order* to fold the
//! results. A failed fetch for any chain member aborts the whole resolution:
//! silently dropping a layer would hand out a bundle with the wrong
//! precedence.

use serde_json::Value as JsonValue;

use crate::bundle::{Bundle, RootBundle};
use crate::chain;
use crate::config::LoaderConfig;
use crate::error::{BundleError, BundleResult};
use crate::locale::LocaleTag;
use crate::merge;

/// Error type returned by the external fetch layer.
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// External source of bundle documents.
///
/// Implementations resolve a bundle name (`strings`, `strings.en-au`) to the
/// raw JSON document published under that name, or fail with a not-found
/// style error. The loader validates the document; the fetcher does not need
/// to understand its contents.
pub trait BundleFetcher {
    /// Fetches the document published under `name`.
    ///
    /// # Errors
    ///
    /// Returns the fetch layer's own error when the document cannot be
    /// loaded; the loader wraps it in [`BundleError::Fetch`].
    fn fetch(&self, name: &str) -> Result<JsonValue, FetchError>;
}

/// Derives the bundle name for a locale variant of `root`.
///
/// The naming convention is a fixed `"."` join: `strings` with `en-au`
/// becomes `strings.en-au`. The root bundle name itself carries no suffix.
#[must_use]
pub fn locale_bundle_name(root: &str, tag: &LocaleTag) -> String {
    format!("{root}.{tag}")
}

/// Resolves named root bundles into merged translation tables.
#[derive(Debug, Clone)]
pub struct BundleLoader<F> {
    fetcher: F,
    config: LoaderConfig,
}

impl<F: BundleFetcher> BundleLoader<F> {
    /// Creates a loader with default configuration (no locale requested).
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, LoaderConfig::default())
    }

    /// Creates a loader with explicit configuration.
    pub fn with_config(fetcher: F, config: LoaderConfig) -> Self {
        Self { fetcher, config }
    }

    /// The configuration this loader resolves against.
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Resolves the root bundle `name` for the configured locale.
    ///
    /// Fetches the root document, resolves the locale chain against the
    /// supported set (the root bundle's own declaration wins over the
    /// configured fallback), fetches every chain member, and folds them onto
    /// the root defaults. An empty effective locale, or a locale none of
    /// whose prefixes are supported, yields the root defaults unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Fetch`] when the root or any chain member
    /// fails to load, and [`BundleError::Shape`] when a fetched document
    /// violates the bundle data contract.
    pub fn load(&self, name: &str) -> BundleResult<Bundle> {
        let document = self.fetch_document(name)?;
        let root = RootBundle::from_json(name, &document)?;

        let locale = self.config.effective_locale();
        if locale.is_empty() {
            tracing::debug!(bundle = name, "no locale requested, serving root defaults");
            return Ok(root.root);
        }

        let supported = root
            .supported_locales
            .or_else(|| self.config.supported_locales.clone())
            .unwrap_or_default();
        let tags = chain::resolve(&locale, &supported, self.config.prefix_policy);
        tracing::debug!(
            bundle = name,
            locale = %locale,
            chain = ?tags,
            "resolved locale chain"
        );

        let mut layers = Vec::with_capacity(tags.len());
        for tag in &tags {
            let layer_name = locale_bundle_name(name, tag);
            let layer = self.fetch_document(&layer_name)?;
            layers.push(Bundle::from_json(&layer_name, &layer)?);
        }
        Ok(merge::merge(&root.root, &layers))
    }

    fn fetch_document(&self, name: &str) -> BundleResult<JsonValue> {
        self.fetcher
            .fetch(name)
            .map_err(|source| BundleError::fetch(name, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn locale_bundle_names_join_with_a_dot() {
        assert_eq!(
            locale_bundle_name("strings", &LocaleTag::new("en-AU")),
            "strings.en-au"
        );
    }
}
