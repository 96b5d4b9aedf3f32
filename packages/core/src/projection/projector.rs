//! The streaming projection state machine.

use std::sync::Arc;

use crate::document::EventType;
use crate::field_path::FieldPath;
use crate::projection::tree::{ProjectionKey, ProjectionTree};

/// The field a cursor is positioned on, as seen by the projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    /// A named field inside a map.
    Name(&'a str),
    /// An element index inside an array.
    Index(i32),
}

/// Decides, event by event, whether the current cursor node is covered by a
/// set of projected field paths.
///
/// Pairs a shared, immutable [`ProjectionTree`] with small per-traversal
/// state. A single projector must not be driven by two traversals at once;
/// use [`clone_with_shared_tree`](Self::clone_with_shared_tree) to run
/// concurrent traversals over the same tree.
#[derive(Debug)]
pub struct FieldProjector {
    tree: Arc<ProjectionTree>,

    /// Current trie node, or `None` while short-circuited below a matched
    /// leaf.
    current: Option<usize>,

    /// The most recently matched node; restores the current node to its
    /// parent when the short-circuited subtree is exited.
    matched: usize,

    /// Container depth below the matched leaf, maintained only while
    /// short-circuited.
    level: i32,

    /// The current field's path is a prefix of (or equal to) a projected
    /// path, so the field itself is included.
    include_field: bool,

    /// The current field is a descendant of a projected path, so it is
    /// included without any lookup.
    include_all_children: bool,
}

impl FieldProjector {
    /// Create a projector over a prebuilt tree.
    #[must_use]
    pub fn new(tree: Arc<ProjectionTree>) -> Self {
        Self {
            tree,
            current: Some(ProjectionTree::ROOT),
            matched: ProjectionTree::ROOT,
            level: 0,
            include_field: false,
            include_all_children: false,
        }
    }

    /// Build a tree from `paths` and create a projector over it.
    #[must_use]
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = FieldPath>,
    {
        Self::new(Arc::new(ProjectionTree::from_paths(paths)))
    }

    /// A fresh projector sharing this one's tree, for an independent
    /// concurrent traversal. Only the small mutable cursor state is copied.
    #[must_use]
    pub fn clone_with_shared_tree(&self) -> Self {
        Self::new(Arc::clone(&self.tree))
    }

    /// The shared projection tree.
    #[must_use]
    pub fn tree(&self) -> &Arc<ProjectionTree> {
        &self.tree
    }

    /// Reset the traversal state to the document root.
    pub fn reset(&mut self) {
        self.current = Some(ProjectionTree::ROOT);
        self.matched = ProjectionTree::ROOT;
        self.level = 0;
        self.include_field = false;
        self.include_all_children = false;
    }

    /// `true` when the event just passed to [`move_to`](Self::move_to)
    /// should be forwarded.
    #[must_use]
    pub fn should_emit_event(&self) -> bool {
        self.include_field || self.include_all_children
    }

    /// Advance the projection state by one cursor event.
    ///
    /// `field` identifies the node within its enclosing container and must be
    /// supplied for every event except `EndMap`/`EndArray` (a close event is
    /// always forwarded: if its open was not projected the whole subtree was
    /// skipped and never reached this point).
    pub fn move_to(&mut self, event: EventType, field: Option<FieldRef<'_>>) {
        let mut child: Option<usize> = None;
        if let Some(cur) = self.current {
            if event.is_container_end() {
                self.include_field = true;
            } else {
                child = field.and_then(|f| {
                    let key = match f {
                        FieldRef::Name(name) => ProjectionKey::name(name),
                        FieldRef::Index(index) => ProjectionKey::index(index),
                    };
                    self.tree.find_child(cur, &key)
                });
                // A field is included when the current node is a
                // single-value array, or a matching child exists and the
                // event opens a container or the child covers scalars (leaf
                // or single-value array).
                self.include_field = self.tree.is_single_value_array(cur)
                    || child.is_some_and(|c| {
                        event.is_container_start()
                            || self.tree.is_leaf(c)
                            || self.tree.is_single_value_array(c)
                    });
            }
        }

        if event.is_container_start() {
            if self.should_emit_event() {
                match self.current {
                    Some(_) => {
                        self.current = child;
                        if let Some(c) = child {
                            self.matched = c;
                            self.include_all_children = self.tree.is_leaf(c);
                            if self.include_all_children {
                                // Entering the subtree of a fully projected
                                // field: stop per-step lookups and track
                                // depth until the matching close.
                                self.level = 1;
                                self.current = None;
                            }
                        }
                    }
                    None => self.level += 1,
                }
            }
        } else if event.is_container_end() && self.should_emit_event() {
            match self.current {
                None => {
                    self.level -= 1;
                    if self.level == 0 {
                        self.current = self.tree.parent(self.matched);
                        self.include_all_children = false;
                    }
                }
                Some(cur) => {
                    self.current = self.tree.parent(cur);
                }
            }
        }
    }
}
