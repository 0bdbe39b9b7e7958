//! Cross-language key validation.
//!
//! Translation trees are allowed to disagree in shape across languages; this
//! module is how that inconsistency gets caught. Comparison is key-presence
//! only, values are never inspected.

use std::collections::BTreeMap;

use crate::flatten::FlatMap;

/// Key-set difference between a reference language and a target language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDiff {
    /// Keys present in the reference but absent from the target.
    pub missing_keys: Vec<String>,
    /// Keys present in the target but absent from the reference.
    pub extra_keys: Vec<String>,
}

impl KeyDiff {
    /// Whether the two key sets are identical.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing_keys.is_empty() && self.extra_keys.is_empty()
    }
}

/// Compare two flat maps by key presence.
///
/// Both result lists come out sorted because [`FlatMap`] iterates in key
/// order.
#[must_use]
pub fn diff(reference: &FlatMap, target: &FlatMap) -> KeyDiff {
    KeyDiff {
        missing_keys: reference.keys().filter(|k| !target.contains_key(*k)).cloned().collect(),
        extra_keys: target.keys().filter(|k| !reference.contains_key(*k)).cloned().collect(),
    }
}

/// Diff every language against a reference language.
///
/// The reference language itself is not reported. If the reference language
/// is absent from `maps`, an empty reference is used and every key in every
/// other language shows up as extra.
#[must_use]
pub fn diff_languages(
    maps: &BTreeMap<String, FlatMap>,
    reference_language: &str,
) -> BTreeMap<String, KeyDiff> {
    let empty = FlatMap::new();
    let reference = maps.get(reference_language).unwrap_or(&empty);

    maps.iter()
        .filter(|(language, _)| language.as_str() != reference_language)
        .map(|(language, map)| (language.clone(), diff(reference, map)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn flat(keys: &[&str]) -> FlatMap {
        keys.iter().map(|k| ((*k).to_string(), "value".to_string())).collect()
    }

    #[rstest]
    fn test_diff_identical_key_sets_is_empty() {
        let reference = flat(&["a.b", "a.c"]);
        let target = flat(&["a.b", "a.c"]);

        let result = diff(&reference, &target);

        assert_that!(result.is_empty(), eq(true));
    }

    #[googletest::test]
    fn test_diff_reports_missing_and_extra_sorted() {
        let reference = flat(&["a", "b", "c"]);
        let target = flat(&["b", "d", "a.extra"]);

        let result = diff(&reference, &target);

        expect_that!(result.missing_keys, elements_are![eq("a"), eq("c")]);
        expect_that!(result.extra_keys, elements_are![eq("a.extra"), eq("d")]);
    }

    #[googletest::test]
    fn test_diff_values_are_ignored() {
        let reference: FlatMap = [("k".to_string(), "one".to_string())].into_iter().collect();
        let target: FlatMap = [("k".to_string(), "completely different".to_string())]
            .into_iter()
            .collect();

        assert_that!(diff(&reference, &target).is_empty(), eq(true));
    }

    #[googletest::test]
    fn test_diff_languages_skips_reference() {
        let mut maps = BTreeMap::new();
        maps.insert("en".to_string(), flat(&["a", "b"]));
        maps.insert("de".to_string(), flat(&["a"]));
        maps.insert("sv".to_string(), flat(&["a", "b", "c"]));

        let report = diff_languages(&maps, "en");

        expect_that!(report.contains_key("en"), eq(false));
        expect_that!(report.get("de").unwrap().missing_keys, elements_are![eq("b")]);
        expect_that!(report.get("sv").unwrap().extra_keys, elements_are![eq("c")]);
    }

    #[googletest::test]
    fn test_diff_languages_unknown_reference() {
        let mut maps = BTreeMap::new();
        maps.insert("de".to_string(), flat(&["a"]));

        let report = diff_languages(&maps, "en");

        expect_that!(report.get("de").unwrap().extra_keys, elements_are![eq("a")]);
        expect_that!(report.get("de").unwrap().missing_keys, is_empty());
    }
}
