//! Flatten/unflatten transformer.
//!
//! Bidirectional mapping between a [`TranslationTree`] and a flat dot-path
//! map. The flat view is what gets diffed, exported to CSV, edited
//! externally, and imported back.
//!
//! Round-trip laws:
//! - `unflatten(flatten(t)) == t` for any tree `t`.
//! - `flatten(unflatten(f)) == f` for any flat map `f` in which no key is a
//!   strict dot-prefix of another key. Maps violating that are resolved
//!   last-write-wins in lexicographic key order, and every overwrite is
//!   reported as a [`StructuralConflict`].

use std::collections::BTreeMap;

use crate::tree::{
    TranslationTree,
    TreeNode,
};

/// A single-level dot-path view of a translation tree.
///
/// `BTreeMap` keys are sorted, which doubles as the deterministic processing
/// order for [`unflatten`] and the row order for CSV export.
pub type FlatMap = BTreeMap<String, String>;

/// A leaf/interior shape collision found while unflattening.
///
/// One entry wanted `path` to be a leaf while another needed it as an
/// interior node. The later-processed entry wins; the conflict is reported
/// instead of thrown because a translation data bug must not stop pages from
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralConflict {
    /// Path at which the shapes collided.
    pub path: String,
    /// Full key of the entry that overwrote the earlier structure.
    pub winner: String,
}

/// Flatten a tree into a dot-path map.
///
/// Depth-first traversal; only leaves are emitted, interior nodes contribute
/// their key to the accumulated path. Empty interior nodes contribute
/// nothing.
///
/// # Examples
/// ```
/// use i18n_kit::flatten::flatten;
/// use i18n_kit::tree::TranslationTree;
/// use serde_json::json;
///
/// let tree = TranslationTree::from_json(&json!({ "a": { "b": "x", "c": "y" } }));
/// let flat = flatten(&tree);
/// assert_eq!(flat.get("a.b"), Some(&"x".to_string()));
/// assert_eq!(flat.get("a.c"), Some(&"y".to_string()));
/// ```
#[must_use]
pub fn flatten(tree: &TranslationTree) -> FlatMap {
    let mut flat = FlatMap::new();
    flatten_entries(tree.root(), None, &mut flat);
    flat
}

fn flatten_entries(entries: &BTreeMap<String, TreeNode>, prefix: Option<&str>, out: &mut FlatMap) {
    for (key, node) in entries {
        let path = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
        match node {
            TreeNode::Leaf(value) => {
                out.insert(path, value.clone());
            }
            TreeNode::Interior(children) => flatten_entries(children, Some(&path), out),
        }
    }
}

/// Rebuild a tree from a dot-path map.
///
/// Entries are applied in the map's lexicographic key order. Shape
/// collisions (a path that is both a leaf and a strict prefix of another
/// key) are last-write-wins and collected as [`StructuralConflict`]s for the
/// caller to report.
#[must_use]
pub fn unflatten(flat: &FlatMap) -> (TranslationTree, Vec<StructuralConflict>) {
    let mut root = BTreeMap::new();
    let mut conflicts = Vec::new();

    for (path, value) in flat {
        insert_path(&mut root, path, value, &mut conflicts);
    }

    (TranslationTree::from_root(root), conflicts)
}

fn insert_path(
    root: &mut BTreeMap<String, TreeNode>,
    path: &str,
    value: &str,
    conflicts: &mut Vec<StructuralConflict>,
) {
    let mut current = root;
    let mut walked = String::new();
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        if !walked.is_empty() {
            walked.push('.');
        }
        walked.push_str(segment);

        if segments.peek().is_none() {
            // Final segment: an existing subtree here is a shape conflict.
            if matches!(current.get(segment), Some(TreeNode::Interior(_))) {
                conflicts
                    .push(StructuralConflict { path: walked.clone(), winner: path.to_owned() });
            }
            current.insert(segment.to_owned(), TreeNode::Leaf(value.to_owned()));
            return;
        }

        let entry = current
            .entry(segment.to_owned())
            .or_insert_with(|| TreeNode::Interior(BTreeMap::new()));
        if matches!(entry, TreeNode::Leaf(_)) {
            // An earlier entry made this a leaf; the deeper key wins.
            conflicts.push(StructuralConflict { path: walked.clone(), winner: path.to_owned() });
            *entry = TreeNode::Interior(BTreeMap::new());
        }

        let TreeNode::Interior(children) = entry else {
            return;
        };
        current = children;
    }
}
