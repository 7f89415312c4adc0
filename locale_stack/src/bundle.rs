//! The bundle tree and its JSON ingestion.
//!
//! A [`Bundle`] is a tree whose leaves are translated strings and whose
//! nodes are string-keyed maps. The tagged [`BundleValue`] variant makes any
//! other leaf kind unrepresentable, so the data contract is enforced once, at
//! ingestion, and the merge never has to re-check it. Violations are reported
//! with the dotted key path of the offending value.

use std::collections::BTreeMap;

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::{BundleError, BundleResult};
use crate::locale::{LocaleTag, SupportedLocales};

/// A single entry in a bundle node: a translated string or a nested node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleValue {
    /// A translated string.
    Leaf(String),
    /// A nested group of translations.
    Node(Bundle),
}

/// A validated tree of translations.
///
/// Keys are unique per node and iteration order is stable (sorted), which
/// keeps merges and test assertions deterministic. Instances are cheap to
/// clone structurally and are treated as immutable once built; the merge
/// always constructs a fresh tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    entries: BTreeMap<String, BundleValue>,
}

impl Bundle {
    /// Creates an empty bundle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Validates a fetched JSON document into a bundle.
    ///
    /// `bundle` names the document in diagnostics. The document must be an
    /// object; every value must be a string or a nested object.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Shape`] naming the dotted key path of the
    /// first value that is neither a string nor an object.
    pub fn from_json(bundle: &str, value: &JsonValue) -> BundleResult<Self> {
        match value {
            JsonValue::Object(entries) => from_object(bundle, "", entries),
            other => Err(BundleError::shape(bundle, "(document)", json_kind(other))),
        }
    }

    /// Looks up the value stored directly under `key` at this node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&BundleValue> {
        self.entries.get(key)
    }

    /// Resolves a dot-separated `path` to a leaf string.
    ///
    /// Returns `None` when any segment is missing, when an intermediate
    /// segment is a leaf, or when the final segment is a node.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut node = self;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            match node.get(segment)? {
                BundleValue::Leaf(text) => {
                    return segments.peek().is_none().then_some(text.as_str());
                }
                BundleValue::Node(child) => {
                    segments.peek()?;
                    node = child;
                }
            }
        }
        None
    }

    /// Whether this node holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries directly under this node.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates the entries of this node in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BundleValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut BundleValue> {
        self.entries.get_mut(key)
    }

    pub(crate) fn insert(&mut self, key: String, value: BundleValue) {
        self.entries.insert(key, value);
    }
}

impl<'bundle> IntoIterator for &'bundle Bundle {
    type Item = (&'bundle String, &'bundle BundleValue);
    type IntoIter = std::collections::btree_map::Iter<'bundle, String, BundleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A root bundle: default data plus an optional supported-locale declaration.
///
/// On the wire this is an object with an optional `root` member (the
/// language-neutral strings) and an optional `supportedLocales` array. A
/// missing `root` member means the bundle has no defaults of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootBundle {
    /// The language-neutral default strings.
    pub root: Bundle,
    /// Locale suffixes this bundle declares data for, when it declares any.
    pub supported_locales: Option<SupportedLocales>,
}

impl RootBundle {
    /// Validates a fetched root document.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Shape`] when the document is not an object,
    /// when the `root` member violates the bundle data contract, or when
    /// `supportedLocales` is not an array of strings.
    pub fn from_json(bundle: &str, value: &JsonValue) -> BundleResult<Self> {
        let JsonValue::Object(document) = value else {
            return Err(BundleError::shape(bundle, "(document)", json_kind(value)));
        };
        let root = match document.get("root") {
            None => Bundle::new(),
            Some(JsonValue::Object(entries)) => from_object(bundle, "root", entries)?,
            Some(other) => return Err(BundleError::shape(bundle, "root", json_kind(other))),
        };
        let supported_locales = document
            .get("supportedLocales")
            .map(|declared| supported_from_json(bundle, declared))
            .transpose()?;
        Ok(Self {
            root,
            supported_locales,
        })
    }
}

fn from_object(bundle: &str, path: &str, entries: &JsonMap<String, JsonValue>) -> BundleResult<Bundle> {
    let mut node = Bundle::new();
    for (key, value) in entries {
        let child_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{path}.{key}")
        };
        let converted = match value {
            JsonValue::String(text) => BundleValue::Leaf(text.clone()),
            JsonValue::Object(child) => {
                BundleValue::Node(from_object(bundle, &child_path, child)?)
            }
            other => return Err(BundleError::shape(bundle, child_path, json_kind(other))),
        };
        node.insert(key.clone(), converted);
    }
    Ok(node)
}

fn supported_from_json(bundle: &str, declared: &JsonValue) -> BundleResult<SupportedLocales> {
    let JsonValue::Array(tags) = declared else {
        return Err(BundleError::shape(
            bundle,
            "supportedLocales",
            json_kind(declared),
        ));
    };
    let mut supported = SupportedLocales::new();
    for (index, tag) in tags.iter().enumerate() {
        let JsonValue::String(text) = tag else {
            return Err(BundleError::shape(
                bundle,
                format!("supportedLocales.{index}"),
                json_kind(tag),
            ));
        };
        supported.insert(LocaleTag::new(text));
    }
    Ok(supported)
}

const fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn nested_documents_validate_into_bundles() {
        let document = json!({
            "greeting": "Hello",
            "menu": { "save": "Save", "file": { "open": "Open" } }
        });
        let bundle = Bundle::from_json("strings", &document).unwrap();
        assert_eq!(bundle.lookup("greeting"), Some("Hello"));
        assert_eq!(bundle.lookup("menu.file.open"), Some("Open"));
        assert_eq!(bundle.lookup("menu.file"), None);
        assert_eq!(bundle.lookup("menu.missing"), None);
    }

    #[rstest]
    #[case(json!({ "count": 3 }), "count", "number")]
    #[case(json!({ "menu": { "open": null } }), "menu.open", "null")]
    #[case(json!({ "flags": ["a"] }), "flags", "array")]
    #[case(json!({ "on": true }), "on", "boolean")]
    fn non_string_leaves_fail_with_their_path(
        #[case] document: serde_json::Value,
        #[case] path: &str,
        #[case] found: &str,
    ) {
        let err = Bundle::from_json("strings", &document).unwrap_err();
        match err {
            BundleError::Shape {
                bundle,
                path: reported,
                found: kind,
            } => {
                assert_eq!(bundle, "strings");
                assert_eq!(reported, path);
                assert_eq!(kind, found);
            }
            other => panic!("expected a shape error, got {other}"),
        }
    }

    #[rstest]
    fn non_object_documents_are_rejected() {
        let err = Bundle::from_json("strings", &json!("just text")).unwrap_err();
        assert!(matches!(err, BundleError::Shape { .. }));
    }

    #[rstest]
    fn root_documents_expose_defaults_and_declared_locales() {
        let document = json!({
            "root": { "greeting": "Hello" },
            "supportedLocales": ["en", "EN-AU"]
        });
        let root = RootBundle::from_json("strings", &document).unwrap();
        assert_eq!(root.root.lookup("greeting"), Some("Hello"));
        let supported = root.supported_locales.unwrap();
        assert!(supported.contains(&LocaleTag::new("en-au")));
    }

    #[rstest]
    fn root_documents_tolerate_missing_members() {
        let root = RootBundle::from_json("strings", &json!({})).unwrap();
        assert!(root.root.is_empty());
        assert!(root.supported_locales.is_none());
    }

    #[rstest]
    fn malformed_supported_locale_entries_are_rejected_with_their_index() {
        let document = json!({ "supportedLocales": ["en", 42] });
        let err = RootBundle::from_json("strings", &document).unwrap_err();
        assert_eq!(
            err.to_string(),
            "bundle 'strings' has a number at 'supportedLocales.1'; leaves must be strings and nodes objects"
        );
    }
}
