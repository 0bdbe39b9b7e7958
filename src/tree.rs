//! Nested translation store.
//!
//! Each language owns one [`TranslationTree`]: a rooted tree whose interior
//! nodes map keys to children and whose leaves are the displayable strings.
//! Trees are built once (from bundled JSON or a CSV import) and never
//! mutated after publication.

use std::collections::BTreeMap;

use serde_json::Value;

/// A single node of a translation tree.
///
/// A key's value is exclusively a leaf or an interior node; the tagged
/// variant makes the duck-typed "string or object" check of dynamic
/// implementations impossible to get wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A displayable string at the end of a path.
    Leaf(String),
    /// A mapping from key to child node, traversable but not displayable.
    Interior(BTreeMap<String, TreeNode>),
}

impl TreeNode {
    /// Returns the leaf value, or `None` for interior nodes.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Interior(_) => None,
        }
    }
}

/// An immutable per-language tree of string leaves keyed by nested keys.
///
/// `BTreeMap` keeps traversal order deterministic, which keeps flatten
/// output, CSV exports, and diffs reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTree {
    root: BTreeMap<String, TreeNode>,
}

impl TranslationTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree directly from root entries.
    #[must_use]
    pub(crate) const fn from_root(root: BTreeMap<String, TreeNode>) -> Self {
        Self { root }
    }

    /// Build a tree from a parsed JSON document.
    ///
    /// JSON objects become interior nodes and strings become leaves.
    /// Non-string scalars and arrays are stringified to their JSON text so
    /// that a translation file with a stray number still renders something.
    /// A non-object root yields an empty tree.
    ///
    /// # Examples
    /// ```
    /// use i18n_kit::tree::TranslationTree;
    /// use serde_json::json;
    ///
    /// let tree = TranslationTree::from_json(&json!({
    ///     "about": { "title": "About us" }
    /// }));
    /// assert_eq!(tree.resolve("about.title"), Some("About us"));
    /// ```
    #[must_use]
    pub fn from_json(json: &Value) -> Self {
        match json {
            Value::Object(map) => Self { root: map.iter().map(|(k, v)| (k.clone(), node_from_json(v))).collect() },
            _ => Self::new(),
        }
    }

    /// Root entries of the tree.
    #[must_use]
    pub const fn root(&self) -> &BTreeMap<String, TreeNode> {
        &self.root
    }

    /// Whether the tree has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Resolve a dot-separated path to a leaf string.
    ///
    /// Returns `None` if any segment is absent, if a leaf is hit before the
    /// last segment, or if the full path names an interior node. A subtree
    /// is never an acceptable result for a single-string lookup.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&str> {
        let mut current = &self.root;
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            match current.get(segment)? {
                TreeNode::Leaf(value) => {
                    // A leaf only counts if the path is fully consumed.
                    return segments.peek().is_none().then_some(value.as_str());
                }
                TreeNode::Interior(children) => current = children,
            }
        }

        // Walk ended on an interior node.
        None
    }
}

fn node_from_json(json: &Value) -> TreeNode {
    match json {
        Value::Object(map) => {
            TreeNode::Interior(map.iter().map(|(k, v)| (k.clone(), node_from_json(v))).collect())
        }
        Value::String(s) => TreeNode::Leaf(s.clone()),
        other => TreeNode::Leaf(other.to_string()),
    }
}
