//! Locale fallback-chain resolution and structural merging for translation
//! bundles.
//!
//! A root bundle carries language-neutral defaults and declares which locale
//! suffixes have data available. Given a requested locale such as `en-au`,
//! the crate resolves the ordered chain of supported prefixes (`en`, then
//! `en-au`), fetches each variant through the caller-supplied
//! [`BundleFetcher`], and deep-merges the layers onto the defaults with
//! later-wins precedence. Resolution and merge are pure and never mutate
//! their inputs, so root bundles can be cached and reused across requests.
//!
//! ```
//! use locale_stack::{BundleFetcher, BundleLoader, FetchError, LoaderConfig, LocaleTag};
//! use serde_json::{Value, json};
//!
//! struct StaticFetcher;
//!
//! impl BundleFetcher for StaticFetcher {
//!     fn fetch(&self, name: &str) -> Result<Value, FetchError> {
//!         match name {
//!             "strings" => Ok(json!({
//!                 "root": { "greeting": "Hello", "menu": { "save": "Save" } },
//!                 "supportedLocales": ["en", "en-au"]
//!             })),
//!             "strings.en" => Ok(json!({ "greeting": "Hello!" })),
//!             "strings.en-au" => Ok(json!({ "greeting": "G'day" })),
//!             other => Err(format!("unknown bundle: {other}").into()),
//!         }
//!     }
//! }
//!
//! # fn main() -> locale_stack::BundleResult<()> {
//! let config = LoaderConfig {
//!     locale: Some(LocaleTag::new("en-AU")),
//!     ..LoaderConfig::default()
//! };
//! let loader = BundleLoader::with_config(StaticFetcher, config);
//! let resolved = loader.load("strings")?;
//! assert_eq!(resolved.lookup("greeting"), Some("G'day"));
//! assert_eq!(resolved.lookup("menu.save"), Some("Save"));
//! # Ok(())
//! # }
//! ```

mod bundle;
mod chain;
mod config;
mod error;
mod loader;
mod locale;
mod merge;

pub use bundle::{Bundle, BundleValue, RootBundle};
pub use chain::{PrefixPolicy, resolve};
pub use config::{ListEnv, LoaderConfig};
pub use error::{BundleError, BundleResult};
pub use loader::{BundleFetcher, BundleLoader, FetchError, locale_bundle_name};
pub use locale::{LocaleTag, SupportedLocales, normalize_platform_locale, system_locale};
pub use merge::merge;
