//! Published tree sets and the end-user lookup surface.
//!
//! A [`TranslationSet`] is the unit of publication: every language tree plus
//! the configured default language, immutable once built. The
//! [`TranslationStore`] hands out `Arc` snapshots and replaces the whole set
//! in one atomic swap on import, so concurrent readers never observe a
//! partially updated state (last writer wins).

use std::collections::BTreeMap;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};

use crate::csv::{
    CsvError,
    export_csv,
    import_csv,
};
use crate::flatten::{
    FlatMap,
    StructuralConflict,
    flatten,
    unflatten,
};
use crate::interpolate::{
    Params,
    interpolate,
};
use crate::resolve::{
    EventSink,
    resolve_with_fallback,
};
use crate::tree::TranslationTree;

/// All language trees plus the default language, read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSet {
    trees: BTreeMap<String, TranslationTree>,
    default_language: String,
}

impl TranslationSet {
    /// Create an empty set with the given default language.
    #[must_use]
    pub fn new(default_language: impl Into<String>) -> Self {
        Self { trees: BTreeMap::new(), default_language: default_language.into() }
    }

    /// Add (or replace) the tree for a language.
    pub fn insert(&mut self, language: impl Into<String>, tree: TranslationTree) {
        self.trees.insert(language.into(), tree);
    }

    /// The configured default language.
    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// The tree for a language, if loaded.
    #[must_use]
    pub fn tree(&self, language: &str) -> Option<&TranslationTree> {
        self.trees.get(language)
    }

    /// Language codes in the set, in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    /// Resolve a path with default-language fallback.
    ///
    /// See [`resolve_with_fallback`] for the fallback policy. The worst case
    /// returns `path` itself.
    #[must_use]
    pub fn resolve<'a>(&'a self, language: &str, path: &'a str) -> &'a str {
        resolve_with_fallback(&self.trees, language, &self.default_language, path, None)
    }

    /// Like [`Self::resolve`], with an observer for fallback diagnostics.
    #[must_use]
    pub fn resolve_observed<'a>(
        &'a self,
        language: &str,
        path: &'a str,
        on_event: EventSink<'_>,
    ) -> &'a str {
        resolve_with_fallback(&self.trees, language, &self.default_language, path, Some(on_event))
    }

    /// Resolve a path and interpolate `{{name}}` placeholders.
    ///
    /// This is the lookup the page-rendering layer calls.
    #[must_use]
    pub fn translate(&self, language: &str, path: &str, params: &Params) -> String {
        interpolate(self.resolve(language, path), params)
    }

    /// Flatten every language tree, keyed by language code.
    ///
    /// This is the export side of the admin flow; feed the result to
    /// [`export_csv`] or [`crate::report::diff_languages`].
    #[must_use]
    pub fn to_flat_maps(&self) -> BTreeMap<String, FlatMap> {
        self.trees.iter().map(|(language, tree)| (language.clone(), flatten(tree))).collect()
    }

    /// Rebuild a set from per-language flat maps (the import side).
    ///
    /// Structural conflicts are resolved last-write-wins per tree and
    /// reported per language so the admin UI can surface them.
    #[must_use]
    pub fn from_flat_maps(
        maps: &BTreeMap<String, FlatMap>,
        default_language: impl Into<String>,
    ) -> (Self, BTreeMap<String, Vec<StructuralConflict>>) {
        let mut set = Self::new(default_language);
        let mut all_conflicts = BTreeMap::new();

        for (language, flat) in maps {
            let (tree, conflicts) = unflatten(flat);
            if !conflicts.is_empty() {
                all_conflicts.insert(language.clone(), conflicts);
            }
            set.insert(language.clone(), tree);
        }

        (set, all_conflicts)
    }

    /// Export the whole set as CSV text.
    #[must_use]
    pub fn export_csv(&self) -> String {
        export_csv(&self.to_flat_maps())
    }

    /// Build a set from CSV text.
    ///
    /// # Errors
    /// Returns [`CsvError`] if the document as a whole is unparsable.
    pub fn import_csv(
        text: &str,
        default_language: impl Into<String>,
    ) -> Result<(Self, BTreeMap<String, Vec<StructuralConflict>>), CsvError> {
        let maps = import_csv(text)?;
        Ok(Self::from_flat_maps(&maps, default_language))
    }
}

/// Process-wide holder of the currently published [`TranslationSet`].
///
/// Readers take a cheap `Arc` snapshot and keep using it for the whole
/// render, even if an admin import publishes a new set meanwhile.
#[derive(Debug)]
pub struct TranslationStore {
    current: RwLock<Arc<TranslationSet>>,
}

impl TranslationStore {
    /// Create a store with an initial published set.
    #[must_use]
    pub fn new(initial: TranslationSet) -> Self {
        Self { current: RwLock::new(Arc::new(initial)) }
    }

    /// The currently published set.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TranslationSet> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Atomically replace the published set.
    pub fn publish(&self, next: TranslationSet) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(next);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn sample_set() -> TranslationSet {
        let mut set = TranslationSet::new("en");
        set.insert(
            "en",
            TranslationTree::from_json(&json!({
                "a": { "b": "Hello" },
                "welcome": "Welcome, {{name}}!"
            })),
        );
        set.insert("de", TranslationTree::from_json(&json!({ "a": { "b": "Hallo" } })));
        set
    }

    #[rstest]
    #[case::requested_language("de", "a.b", "Hallo")]
    #[case::fallback_to_default("de", "welcome", "Welcome, {{name}}!")]
    #[case::missing_everywhere("de", "a.c", "a.c")]
    fn test_set_resolve(#[case] language: &str, #[case] path: &str, #[case] expected: &str) {
        let set = sample_set();

        assert_that!(set.resolve(language, path), eq(expected));
    }

    #[googletest::test]
    fn test_translate_interpolates() {
        let set = sample_set();
        let params = Params::from([("name".to_string(), "Ava".to_string())]);

        assert_that!(set.translate("en", "welcome", &params), eq("Welcome, Ava!"));
    }

    #[googletest::test]
    fn test_flat_map_round_trip_through_set() {
        let set = sample_set();

        let (rebuilt, conflicts) = TranslationSet::from_flat_maps(&set.to_flat_maps(), "en");

        expect_that!(conflicts.is_empty(), eq(true));
        assert_that!(rebuilt, eq(&set));
    }

    #[googletest::test]
    fn test_csv_round_trip_through_set() {
        let set = sample_set();

        let (rebuilt, conflicts) = TranslationSet::import_csv(&set.export_csv(), "en").unwrap();

        expect_that!(conflicts.is_empty(), eq(true));
        assert_that!(rebuilt, eq(&set));
    }

    #[googletest::test]
    fn test_store_publish_swaps_whole_set() {
        let store = TranslationStore::new(sample_set());
        let before = store.snapshot();

        let mut next = TranslationSet::new("en");
        next.insert("en", TranslationTree::from_json(&json!({ "a": { "b": "Updated" } })));
        store.publish(next);

        // The old snapshot keeps rendering the old content.
        expect_that!(before.resolve("en", "a.b"), eq("Hello"));
        expect_that!(store.snapshot().resolve("en", "a.b"), eq("Updated"));
    }

    #[googletest::test]
    fn test_from_flat_maps_reports_conflicts_per_language() {
        let mut maps = BTreeMap::new();
        maps.insert(
            "en".to_string(),
            FlatMap::from([
                ("a".to_string(), "leaf".to_string()),
                ("a.b".to_string(), "nested".to_string()),
            ]),
        );
        maps.insert("de".to_string(), FlatMap::from([("a.b".to_string(), "ok".to_string())]));

        let (set, conflicts) = TranslationSet::from_flat_maps(&maps, "en");

        expect_that!(set.resolve("en", "a.b"), eq("nested"));
        expect_that!(conflicts.contains_key("de"), eq(false));
        expect_that!(conflicts.get("en").unwrap().len(), eq(1));
    }
}
