//! Error types produced during bundle resolution.
//!
//! An unsupported requested locale is deliberately not represented here: it
//! resolves to an empty chain and the caller receives the root defaults. Only
//! fetch failures, data-contract violations, and configuration gathering
//! failures are errors.

use thiserror::Error;

/// Convenience alias for fallible bundle-resolution operations.
pub type BundleResult<T> = Result<T, BundleError>;

/// Errors that can occur while resolving or assembling a bundle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BundleError {
    /// A root or chain-member bundle failed to load.
    ///
    /// Fatal for the whole resolution: silently omitting a chain member
    /// would break the precedence contract the resolved chain established.
    #[error("failed to fetch bundle '{name}': {source}")]
    Fetch {
        /// Name of the bundle whose fetch failed.
        name: String,
        /// Underlying error reported by the fetch layer.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A fetched document held a value that is neither a string leaf nor a
    /// nested object.
    #[error("bundle '{bundle}' has a {found} at '{path}'; leaves must be strings and nodes objects")]
    Shape {
        /// Name of the offending bundle.
        bundle: String,
        /// Dotted key path to the offending value.
        path: String,
        /// JSON kind actually found at the path.
        found: &'static str,
    },

    /// Loader configuration could not be gathered from its providers.
    #[error("failed to gather loader configuration: {0}")]
    Gathering(#[from] Box<figment::Error>),
}

impl BundleError {
    /// Builds a [`BundleError::Fetch`] for `name`.
    #[must_use]
    pub fn fetch(
        name: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Fetch {
            name: name.into(),
            source,
        }
    }

    /// Builds a [`BundleError::Shape`] for the value at `path`.
    #[must_use]
    pub fn shape(bundle: impl Into<String>, path: impl Into<String>, found: &'static str) -> Self {
        Self::Shape {
            bundle: bundle.into(),
            path: path.into(),
            found,
        }
    }
}

impl From<figment::Error> for BundleError {
    fn from(source: figment::Error) -> Self {
        Self::Gathering(Box::new(source))
    }
}
