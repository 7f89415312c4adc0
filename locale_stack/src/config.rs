//! Loader configuration and its environment provider.
//!
//! Everything the orchestrator needs to decide *which* locale to resolve and
//! *how* strictly to walk the prefix chain lives here, so the resolver and
//! merger stay pure. Configuration can be built in code or gathered from
//! prefixed environment variables, e.g. `APP_LOCALE=en-AU
//! APP_SUPPORTED_LOCALES=en,en-au APP_PREFIX_POLICY=abort-on-missing`.

use figment::providers::Env;
use figment::{
    Figment, Profile, Provider,
    error::Error as FigmentError,
    util::nest,
    value::{Dict, Map, Value},
};
use serde::{Deserialize, Serialize};

use crate::chain::PrefixPolicy;
use crate::error::BundleResult;
use crate::locale::{LocaleTag, SupportedLocales, system_locale};

/// Configuration consumed by [`BundleLoader`](crate::BundleLoader).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Explicitly requested locale. Takes precedence over platform
    /// detection.
    pub locale: Option<LocaleTag>,
    /// Fallback supported-locale set, used only when the root bundle does
    /// not declare one itself.
    pub supported_locales: Option<SupportedLocales>,
    /// How to treat gaps in the prefix chain.
    pub prefix_policy: PrefixPolicy,
    /// Whether to fall back to the platform locale when no explicit locale
    /// is configured.
    pub use_system_locale: bool,
}

impl LoaderConfig {
    /// Gathers configuration from environment variables prefixed with
    /// `prefix`.
    ///
    /// Comma-separated values are read as lists (see [`ListEnv`]).
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Gathering`](crate::BundleError::Gathering)
    /// when a variable cannot be deserialised into its field.
    pub fn from_env(prefix: &str) -> BundleResult<Self> {
        Figment::new()
            .merge(ListEnv::prefixed(prefix))
            .extract()
            .map_err(Into::into)
    }

    /// The locale this configuration asks the loader to resolve.
    ///
    /// The explicit [`locale`](Self::locale) wins; otherwise the platform
    /// locale is consulted when [`use_system_locale`](Self::use_system_locale)
    /// is set. The empty tag means "no locale", which short-circuits
    /// resolution to the root defaults.
    #[must_use]
    pub fn effective_locale(&self) -> LocaleTag {
        self.locale
            .clone()
            .or_else(|| self.use_system_locale.then(system_locale).flatten())
            .unwrap_or_default()
    }
}

/// Environment provider that parses comma-separated values as lists.
///
/// Wraps [`Env`] so a variable such as `APP_SUPPORTED_LOCALES=en,en-au`
/// deserialises as a sequence. A value without a comma stays scalar; a
/// trailing comma (`en,`) forces a single-element list, since empty segments
/// are discarded.
#[derive(Clone)]
pub struct ListEnv {
    inner: Env,
}

impl ListEnv {
    /// Creates a provider reading variables prefixed with `prefix`.
    #[must_use]
    pub fn prefixed(prefix: &str) -> Self {
        Self {
            inner: Env::prefixed(prefix),
        }
    }

    /// Creates an unprefixed provider.
    #[must_use]
    pub fn raw() -> Self {
        Self { inner: Env::raw() }
    }

    fn parse_value(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.contains(',') {
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(|segment| Value::from(segment.to_owned()))
                .collect::<Vec<_>>()
                .into()
        } else {
            trimmed
                .parse()
                .unwrap_or_else(|_| Value::from(trimmed.to_owned()))
        }
    }
}

impl Provider for ListEnv {
    fn metadata(&self) -> figment::Metadata {
        self.inner.metadata()
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.inner.profile.clone())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, FigmentError> {
        let mut dict = Dict::new();
        for (key, raw) in self.inner.iter() {
            let value = Self::parse_value(&raw);
            let Some(nested) = nest(key.as_str(), value).into_dict() else {
                return Err(FigmentError::from(format!(
                    "environment key `{key}` produced a non-object value"
                )));
            };
            dict.extend(nested);
        }
        Ok(self.inner.profile.collect(dict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn explicit_locale_wins_over_platform_detection() {
        let config = LoaderConfig {
            locale: Some(LocaleTag::new("fr")),
            use_system_locale: true,
            ..LoaderConfig::default()
        };
        assert_eq!(config.effective_locale(), LocaleTag::new("fr"));
    }

    #[rstest]
    fn no_locale_and_no_detection_yields_the_empty_tag() {
        let config = LoaderConfig::default();
        assert!(config.effective_locale().is_empty());
    }

    #[rstest]
    #[case("en,en-au", 2)]
    #[case("en, en-au ,", 2)]
    #[case("en,", 1)]
    fn comma_values_parse_as_lists(#[case] raw: &str, #[case] entries: usize) {
        match ListEnv::parse_value(raw) {
            Value::Array(_, items) => assert_eq!(items.len(), entries),
            other => panic!("expected an array, got {other:?}"),
        }
    }

    #[rstest]
    fn scalar_values_stay_scalar() {
        assert!(!matches!(ListEnv::parse_value("en-au"), Value::Array(..)));
    }

    #[rstest]
    fn environment_variables_populate_every_field() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("APP_LOCALE", "en-AU");
            jail.set_env("APP_SUPPORTED_LOCALES", "en,en-au");
            jail.set_env("APP_PREFIX_POLICY", "abort-on-missing");
            jail.set_env("APP_USE_SYSTEM_LOCALE", "true");

            let config = LoaderConfig::from_env("APP_")
                .map_err(|err| figment::Error::from(err.to_string()))?;
            if config.locale != Some(LocaleTag::new("en-au")) {
                return Err(figment::Error::from("locale should be lowercased"));
            }
            let supported = config
                .supported_locales
                .ok_or_else(|| figment::Error::from("supported locales missing"))?;
            if !supported.contains(&LocaleTag::new("en-au")) {
                return Err(figment::Error::from("supported set missing en-au"));
            }
            if config.prefix_policy != PrefixPolicy::AbortOnMissing {
                return Err(figment::Error::from("prefix policy not parsed"));
            }
            if !config.use_system_locale {
                return Err(figment::Error::from("use_system_locale not parsed"));
            }
            Ok(())
        });
    }
}
