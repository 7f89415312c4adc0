//! Locale fallback-chain resolution.
//!
//! Turns a requested tag such as `en-au` into the ordered list of supported
//! prefixes to fetch, least specific first, so that more specific bundles are
//! folded over more general ones during the merge.

use serde::{Deserialize, Serialize};

use crate::locale::{LocaleTag, SupportedLocales};

/// How the resolver treats a cumulative prefix missing from the supported
/// set.
///
/// Skipping a gap never loses data a bundle author published; stopping at
/// one treats a sparse declaration as a publishing mistake. Both behaviours
/// are useful, so the policy is configuration rather than a hard-wired rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixPolicy {
    /// Each prefix is tested on its own merits; a missing intermediate
    /// prefix is skipped and more specific supported prefixes still load.
    /// This is the default: it never loses data a bundle author published.
    #[default]
    Independent,
    /// The chain stops at the first unsupported prefix, even if a more
    /// specific prefix is supported.
    AbortOnMissing,
}

/// Resolves `requested` against `supported` into the ordered fetch chain.
///
/// The output is the subsequence of `requested`'s cumulative dash-prefixes
/// present in `supported`, least specific first. An empty requested tag, or a
/// tag none of whose prefixes are supported, yields an empty chain; the
/// caller then serves the root bundle's defaults as-is.
///
/// ```
/// use locale_stack::{LocaleTag, PrefixPolicy, SupportedLocales, resolve};
///
/// let supported: SupportedLocales = ["en", "en-au"].into_iter().collect();
/// let chain = resolve(&LocaleTag::new("en-au-x"), &supported, PrefixPolicy::Independent);
/// assert_eq!(chain, [LocaleTag::new("en"), LocaleTag::new("en-au")]);
/// ```
#[must_use]
pub fn resolve(
    requested: &LocaleTag,
    supported: &SupportedLocales,
    policy: PrefixPolicy,
) -> Vec<LocaleTag> {
    if requested.is_empty() {
        return Vec::new();
    }
    match policy {
        PrefixPolicy::Independent => requested
            .prefixes()
            .filter(|prefix| supported.contains(prefix))
            .collect(),
        PrefixPolicy::AbortOnMissing => requested
            .prefixes()
            .take_while(|prefix| supported.contains(prefix))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn supported(tags: &[&str]) -> SupportedLocales {
        tags.iter().copied().collect()
    }

    #[rstest]
    #[case("en-au", &["en", "en-au"], &["en", "en-au"])]
    #[case("en-au", &["en-au"], &["en-au"])]
    #[case("en-au-x", &["en", "en-au"], &["en", "en-au"])]
    #[case("fr", &["en"], &[])]
    #[case("", &["en"], &[])]
    fn independent_prefixes_filter_on_their_own_merits(
        #[case] requested: &str,
        #[case] declared: &[&str],
        #[case] expected: &[&str],
    ) {
        let chain = resolve(
            &LocaleTag::new(requested),
            &supported(declared),
            PrefixPolicy::Independent,
        );
        let expected: Vec<LocaleTag> = expected.iter().copied().map(LocaleTag::from).collect();
        assert_eq!(chain, expected);
    }

    #[rstest]
    #[case("en-au", &["en-au"], &[])]
    #[case("en-au", &["en", "en-au"], &["en", "en-au"])]
    #[case("en-au-x", &["en", "en-au"], &["en", "en-au"])]
    fn abort_policy_stops_at_the_first_gap(
        #[case] requested: &str,
        #[case] declared: &[&str],
        #[case] expected: &[&str],
    ) {
        let chain = resolve(
            &LocaleTag::new(requested),
            &supported(declared),
            PrefixPolicy::AbortOnMissing,
        );
        let expected: Vec<LocaleTag> = expected.iter().copied().map(LocaleTag::from).collect();
        assert_eq!(chain, expected);
    }

    #[rstest]
    fn output_is_an_increasing_specificity_subsequence_of_prefixes() {
        let requested = LocaleTag::new("zh-hans-cn-variant");
        let declared = supported(&["zh", "zh-hans-cn", "fr"]);
        let chain = resolve(&requested, &declared, PrefixPolicy::Independent);
        let prefixes: Vec<LocaleTag> = requested.prefixes().collect();
        let mut cursor = 0;
        for tag in &chain {
            assert!(declared.contains(tag));
            let position = prefixes
                .iter()
                .skip(cursor)
                .position(|p| p == tag)
                .map(|offset| cursor + offset);
            let Some(position) = position else {
                panic!("{tag} is not a later prefix of {requested}");
            };
            cursor = position + 1;
        }
        assert_eq!(chain.len(), 2);
    }
}
