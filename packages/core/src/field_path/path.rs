//! The public field-path type: parsed, canonical, cached, immutable.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PathResult;
use crate::field_path::cache::{self, PathCache};
use crate::field_path::parser::PathParser;
use crate::field_path::segment::{FieldSegment, NameSegment};

/// The unique zero-length path.
static EMPTY: Lazy<FieldPath> = Lazy::new(|| FieldPath {
    root: Arc::new(FieldSegment::Name(NameSegment::new("", None))),
});

/// An immutable, canonical field path.
///
/// Produced by [`FieldPath::parse`], which consults a bounded process-wide
/// cache so that repeated parsing of the same literal returns a handle to the
/// same shared instance. Cloning is cheap (the segment chain is shared), and
/// a path is never mutated; all derived operations return new instances.
#[derive(Clone)]
pub struct FieldPath {
    root: Arc<FieldSegment>,
}

impl FieldPath {
    /// The unique zero-length path.
    #[must_use]
    pub fn empty() -> FieldPath {
        EMPTY.clone()
    }

    /// Parse `text` into a field path, using the process-wide cache.
    ///
    /// # Errors
    ///
    /// Returns [`PathSyntaxError`](crate::error::PathSyntaxError) carrying the
    /// offending position when `text` is not a valid path. No partial path is
    /// ever returned.
    pub fn parse(text: &str) -> PathResult<FieldPath> {
        Self::parse_with_cache(text, cache::global())
    }

    /// Parse `text`, consulting (and populating) the supplied cache.
    pub fn parse_with_cache(text: &str, cache: &PathCache) -> PathResult<FieldPath> {
        if text.is_empty() {
            return Ok(Self::empty());
        }
        if let Some(path) = cache.get(text) {
            return Ok(path);
        }
        let root = PathParser::new(text).parse().map_err(|e| {
            log::debug!("failed to parse {text:?} as a field path: {e}");
            e
        })?;
        let path = FieldPath {
            root: Arc::new(root),
        };
        // Quoted spellings of the empty path canonicalize to the shared EMPTY.
        let path = if path == Self::empty() {
            Self::empty()
        } else {
            path
        };
        cache.insert(text, path.clone());
        Ok(path)
    }

    /// The root of this path's segment chain.
    #[must_use]
    pub fn root_segment(&self) -> &FieldSegment {
        &self.root
    }

    /// `true` for the zero-length path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf() && self.root.is_empty_name()
    }

    /// `true` when `self` and `other` are handles to the same shared instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &FieldPath) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    /// Serialize with minimal quoting: a name step is quoted only when it
    /// contains a character that would not survive a bare round-trip.
    #[must_use]
    pub fn as_path_string(&self) -> String {
        self.root.as_path_string(false)
    }

    /// Serialize with every name step quoted; the canonical form used for
    /// structural comparison and debugging.
    #[must_use]
    pub fn as_path_string_quoted(&self) -> String {
        self.root.as_path_string(true)
    }

    /// Iterate the segments of this path, root to leaf.
    #[must_use]
    pub fn iter(&self) -> Segments<'_> {
        Segments {
            next: Some(&self.root),
        }
    }

    /// A new path with `parent` prepended as a name step.
    #[must_use]
    pub fn with_new_parent(&self, parent: impl Into<String>) -> FieldPath {
        let root = FieldSegment::Name(NameSegment::new(
            parent,
            Some(Box::new(self.root.as_ref().clone())),
        ));
        FieldPath {
            root: Arc::new(root),
        }
    }

    /// A new path with `child` appended below this path's leaf.
    ///
    /// `child` may be a name (`&str`), an array index (`i32`) or any
    /// [`FieldSegment`].
    #[must_use]
    pub fn with_new_child(&self, child: impl Into<FieldSegment>) -> FieldPath {
        FieldPath {
            root: Arc::new(self.root.clone_with_new_child(child.into())),
        }
    }

    /// The remainder of this path after stripping the `ancestor` prefix.
    ///
    /// Returns the empty path when `ancestor` equals `self`, and `None` when
    /// `ancestor` is not a true prefix or the remainder would begin with an
    /// index step (which cannot root a path). A divergence inside an index
    /// step, such as `a[]` against `a[2]`, is not an ancestor match.
    #[must_use]
    pub fn after_ancestor(&self, ancestor: &FieldPath) -> Option<FieldPath> {
        let mut c1 = Some(self.root_segment());
        let mut c2 = Some(ancestor.root_segment());
        while let (Some(a), Some(b)) = (c1, c2) {
            if !a.segment_equals(b) {
                return None;
            }
            c1 = a.child();
            c2 = b.child();
        }
        match (c1, c2) {
            (None, None) => Some(Self::empty()),
            (Some(rest), None) if !rest.is_indexed() => Some(FieldPath {
                root: Arc::new(rest.clone()),
            }),
            // The "ancestor" is longer than this path, or the remainder
            // would begin with an index step, which cannot root a path.
            _ => None,
        }
    }

    /// `true` if `self` is the same as, or a descendant of, `other`.
    #[must_use]
    pub fn is_at_or_below(&self, other: &FieldPath) -> bool {
        self.root.is_at_or_below(Some(other.root_segment()))
    }

    /// `true` if `self` is the same as, or an ancestor of, `other`.
    #[must_use]
    pub fn is_at_or_above(&self, other: &FieldPath) -> bool {
        self.root.is_at_or_above(Some(other.root_segment()))
    }
}

/// Iterator over the segments of a [`FieldPath`], root to leaf.
pub struct Segments<'a> {
    next: Option<&'a FieldSegment>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a FieldSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.child();
        Some(current)
    }
}

impl<'a> IntoIterator for &'a FieldPath {
    type Item = &'a FieldSegment;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for FieldPath {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.root == other.root
    }
}

impl Eq for FieldPath {}

impl PartialOrd for FieldPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldPath {
    /// Segment-by-segment comparison, left to right; at equal depth a name
    /// step sorts after an index step, and a strict prefix sorts first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.root.cmp(&other.root)
    }
}

impl Hash for FieldPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root.hash(state);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_path_string())
    }
}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldPath({})", self.as_path_string_quoted())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_path_string())
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        FieldPath::parse(&text).map_err(D::Error::custom)
    }
}
