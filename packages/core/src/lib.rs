//! # docpath_core
//!
//! Field-path data model for semi-structured (JSON-like) documents:
//!
//! - a path language ([`FieldPath`]) with canonical parsing, interning and a
//!   total order;
//! - a forward-only cursor protocol ([`DocumentReader`]) over a document's
//!   shape and scalar values;
//! - a projection engine ([`ProjectionTree`], [`FieldProjector`],
//!   [`ProjectedDocumentReader`]) that filters a cursor's event stream down
//!   to a requested set of field paths without materializing the document.
//!
//! Storage clients, codecs and mappers supply or consume [`DocumentReader`]
//! implementations; this crate performs no I/O of its own.

#![deny(unsafe_code)]

pub mod document;
pub mod error;
pub mod field_path;
pub mod projection;

pub use self::{
    document::{Decimal, DocumentReader, DomDocumentReader, EventType, Interval},
    error::{DocumentError, DocumentResult, PathResult, PathSyntaxError},
    field_path::{FieldPath, FieldSegment, IndexSegment, NameSegment, PathCache, Segments},
    projection::{FieldProjector, FieldRef, ProjectedDocumentReader, ProjectionTree},
};

/// Parse a field path string, using the process-wide parse cache.
///
/// # Errors
///
/// Returns [`PathSyntaxError`] when `text` is not a valid field path.
pub fn parse_path(text: &str) -> PathResult<FieldPath> {
    FieldPath::parse(text)
}
