//! Structural merge of a bundle chain onto root defaults.
//!
//! Later chain entries take precedence: a more specific locale both
//! overrides strings the defaults already carry and introduces keys that
//! exist only for that locale. Inputs are never mutated; root bundles are
//! routinely cached process-wide and merged repeatedly against different
//! requested locales.

use crate::bundle::{Bundle, BundleValue};

/// Folds `chain` onto a deep copy of `defaults`, least-specific entry first.
///
/// The overlay rule at every node, key by key:
///
/// - key absent from the accumulator: the incoming subtree is added;
/// - both values are leaves: the incoming leaf overwrites;
/// - both values are nodes: recurse;
/// - leaf/node shape conflict: the incoming value replaces outright, so the
///   last-applied bundle's shape wins at that key.
///
/// An empty chain returns a plain copy of `defaults`.
#[must_use]
pub fn merge(defaults: &Bundle, chain: &[Bundle]) -> Bundle {
    let mut resolved = defaults.clone();
    for layer in chain {
        overlay(&mut resolved, layer);
    }
    tracing::trace!(layers = chain.len(), keys = resolved.len(), "merged bundle chain");
    resolved
}

fn overlay(accumulator: &mut Bundle, layer: &Bundle) {
    for (key, incoming) in layer.iter() {
        match (accumulator.get_mut(key), incoming) {
            (Some(BundleValue::Node(existing)), BundleValue::Node(nested)) => {
                overlay(existing, nested);
            }
            (Some(slot), _) => *slot = incoming.clone(),
            (None, _) => accumulator.insert(key.to_owned(), incoming.clone()),
        }
    }
}
