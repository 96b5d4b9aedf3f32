//! Trie of projected field paths.
//!
//! Built once from a set of [`FieldPath`]s, then shared read-only across any
//! number of traversals. Nodes live in an arena and refer to their parent by
//! index, so upward traversal needs no back-references.

use std::collections::BTreeMap;

use crate::field_path::{FieldPath, FieldSegment};

/// Key of a child node: an array index or a case-folded field name.
///
/// Index keys order before name keys, and the wildcard index (`None`) orders
/// before any concrete index, matching segment comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum ProjectionKey {
    Index(Option<i32>),
    Name(String),
}

impl ProjectionKey {
    fn from_segment(segment: &FieldSegment) -> Self {
        match segment {
            FieldSegment::Name(n) => Self::name(n.name()),
            FieldSegment::Index(i) => Self::Index(i.index()),
        }
    }

    pub(crate) fn name(name: &str) -> Self {
        Self::Name(name.chars().flat_map(char::to_lowercase).collect())
    }

    pub(crate) fn index(index: i32) -> Self {
        Self::Index(Some(index))
    }
}

#[derive(Debug)]
struct ProjectionNode {
    parent: Option<usize>,
    children: BTreeMap<ProjectionKey, usize>,
    is_leaf: bool,
    is_single_value_array: bool,
}

impl ProjectionNode {
    fn new(parent: Option<usize>) -> Self {
        Self {
            parent,
            children: BTreeMap::new(),
            is_leaf: false,
            is_single_value_array: false,
        }
    }
}

/// Immutable trie merging a set of field paths.
///
/// A node marked leaf absorbs everything below it: inserting a path makes its
/// final step a leaf and discards any deeper children, and inserting below an
/// existing leaf is a no-op, so a broader requested path always subsumes a
/// more specific one sharing its prefix.
#[derive(Debug)]
pub struct ProjectionTree {
    nodes: Vec<ProjectionNode>,
}

impl ProjectionTree {
    /// Index of the synthetic document-root node.
    pub(crate) const ROOT: usize = 0;

    /// Build a tree from the given paths. Empty paths are ignored.
    #[must_use]
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = FieldPath>,
    {
        let mut tree = Self {
            nodes: vec![ProjectionNode::new(None)],
        };
        for path in paths {
            if path.is_empty() {
                continue;
            }
            tree.add_or_get_child(Self::ROOT, path.root_segment());
        }
        tree
    }

    fn add_or_get_child(&mut self, node: usize, segment: &FieldSegment) {
        let key = ProjectionKey::from_segment(segment);
        let child = match self.nodes[node].children.get(&key) {
            Some(&id) => id,
            None => {
                let id = self.nodes.len();
                self.nodes.push(ProjectionNode::new(Some(node)));
                self.nodes[node].children.insert(key, id);
                id
            }
        };

        match segment.child() {
            None => self.set_leaf(child),
            // Do not descend below an existing leaf: the broader path wins.
            Some(next) => {
                if !self.nodes[child].is_leaf {
                    if is_wildcard(next) {
                        self.expand_entire_array(child, segment);
                    }
                    self.add_or_get_child(child, next);
                }
            }
        }
    }

    /// Record the permutations implied by a wildcard step.
    ///
    /// A path `a[].b` matches both an array of maps under `a` and a single
    /// map under `a`, so `b` is registered directly below `a` as well as
    /// below the wildcard child. A trailing `name[]` with no sub-steps marks
    /// `name` as a single-value array, where every index matches without a
    /// per-index lookup.
    fn expand_entire_array(&mut self, node: usize, segment: &FieldSegment) {
        let Some(index_step) = segment.child() else {
            return;
        };
        match index_step.child() {
            None => self.nodes[node].is_single_value_array = true,
            // A chained wildcard ([][]) is expanded one level at a time as
            // the insertion walk descends.
            Some(grand) => {
                if !is_wildcard(grand) {
                    self.add_or_get_child(node, grand);
                }
            }
        }
    }

    fn set_leaf(&mut self, node: usize) {
        let n = &mut self.nodes[node];
        n.children.clear();
        n.is_leaf = true;
    }

    /// Find the child of `node` matching a cursor key. An indexed key first
    /// consults the wildcard child, then the exact index.
    pub(crate) fn find_child(&self, node: usize, key: &ProjectionKey) -> Option<usize> {
        let children = &self.nodes[node].children;
        if children.is_empty() {
            return None;
        }
        if matches!(key, ProjectionKey::Index(Some(_))) {
            if let Some(&id) = children.get(&ProjectionKey::Index(None)) {
                return Some(id);
            }
        }
        children.get(key).copied()
    }

    pub(crate) fn is_leaf(&self, node: usize) -> bool {
        self.nodes[node].is_leaf
    }

    pub(crate) fn is_single_value_array(&self, node: usize) -> bool {
        self.nodes[node].is_single_value_array
    }

    pub(crate) fn parent(&self, node: usize) -> Option<usize> {
        self.nodes[node].parent
    }
}

fn is_wildcard(segment: &FieldSegment) -> bool {
    matches!(segment, FieldSegment::Index(i) if i.index().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(text: &str) -> FieldPath {
        FieldPath::parse(text).expect("valid path")
    }

    fn tree(paths: &[&str]) -> ProjectionTree {
        ProjectionTree::from_paths(paths.iter().map(|p| path(p)))
    }

    #[test]
    fn shorter_path_absorbs_longer() {
        let t = tree(&["a.b.c", "a.b"]);
        let a = t.find_child(ProjectionTree::ROOT, &ProjectionKey::name("a")).expect("a");
        let b = t.find_child(a, &ProjectionKey::name("b")).expect("b");
        assert!(t.is_leaf(b));
        assert!(t.find_child(b, &ProjectionKey::name("c")).is_none());
    }

    #[test]
    fn longer_path_under_leaf_is_ignored() {
        let t = tree(&["k", "k.l.l1"]);
        let k = t.find_child(ProjectionTree::ROOT, &ProjectionKey::name("k")).expect("k");
        assert!(t.is_leaf(k));
        assert!(t.find_child(k, &ProjectionKey::name("l")).is_none());
    }

    #[test]
    fn wildcard_registers_elided_permutation() {
        let t = tree(&["a[].b"]);
        let a = t.find_child(ProjectionTree::ROOT, &ProjectionKey::name("a")).expect("a");
        assert!(!t.is_single_value_array(a));
        // b both under the wildcard child and directly under a
        let wild = t.find_child(a, &ProjectionKey::index(7)).expect("wildcard");
        assert!(t.find_child(wild, &ProjectionKey::name("b")).is_some());
        assert!(t.find_child(a, &ProjectionKey::name("b")).is_some());
    }

    #[test]
    fn trailing_wildcard_is_single_value_array() {
        let t = tree(&["a.b[]"]);
        let a = t.find_child(ProjectionTree::ROOT, &ProjectionKey::name("a")).expect("a");
        let b = t.find_child(a, &ProjectionKey::name("b")).expect("b");
        assert!(t.is_single_value_array(b));
        // the wildcard child below b is the leaf that short-circuits elements
        let elem = t.find_child(b, &ProjectionKey::index(0)).expect("element");
        assert!(t.is_leaf(elem));
    }

    #[test]
    fn chained_wildcards_mark_inner_level() {
        let t = tree(&["a[][]"]);
        let a = t.find_child(ProjectionTree::ROOT, &ProjectionKey::name("a")).expect("a");
        assert!(!t.is_single_value_array(a));
        let inner = t.find_child(a, &ProjectionKey::index(0)).expect("inner");
        assert!(t.is_single_value_array(inner));
    }

    #[test]
    fn concrete_index_matches_exactly() {
        let t = tree(&["a[1]"]);
        let a = t.find_child(ProjectionTree::ROOT, &ProjectionKey::name("a")).expect("a");
        assert!(t.find_child(a, &ProjectionKey::index(1)).is_some());
        assert!(t.find_child(a, &ProjectionKey::index(0)).is_none());
    }

    #[test]
    fn names_are_matched_case_insensitively() {
        let t = tree(&["Name.First"]);
        let n = t.find_child(ProjectionTree::ROOT, &ProjectionKey::name("name")).expect("name");
        assert!(t.find_child(n, &ProjectionKey::name("FIRST")).is_some());
    }
}
