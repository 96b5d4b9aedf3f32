//! Docpath public API
//!
//! Field-path addressing and streaming projection for semi-structured
//! (JSON-like) documents. Parse path strings into canonical, interned
//! [`FieldPath`] values, merge a set of paths into an immutable
//! [`ProjectionTree`], and wrap any [`DocumentReader`] in a
//! [`ProjectedDocumentReader`] to stream only the requested fields.
//!
//! ```
//! use docpath::{DomDocumentReader, DocumentReader, EventType};
//! use serde_json::json;
//!
//! let doc = json!({"name": {"first": "Jo", "last": "Doe"}, "age": 33});
//! let reader = DomDocumentReader::new(&doc);
//! let mut projected = docpath::project(reader, &["name.first"]).expect("valid paths");
//!
//! // StartMap, StartMap(name), String(first), EndMap, EndMap — "age" and
//! // "name.last" are filtered out.
//! let mut events = Vec::new();
//! while let Some(event) = projected.next().expect("well-formed document") {
//!     events.push(event);
//! }
//! assert_eq!(
//!     events,
//!     vec![
//!         EventType::StartMap,
//!         EventType::StartMap,
//!         EventType::String,
//!         EventType::EndMap,
//!         EventType::EndMap,
//!     ]
//! );
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

// Re-export the core data model.
pub use docpath_core::{
    parse_path, Decimal, DocumentError, DocumentReader, DocumentResult, DomDocumentReader,
    EventType, FieldPath, FieldProjector, FieldRef, FieldSegment, IndexSegment, Interval,
    NameSegment, PathCache, PathResult, PathSyntaxError, ProjectedDocumentReader, ProjectionTree,
    Segments,
};

/// Commonly used types, for glob import.
pub mod prelude {
    pub use docpath_core::{
        parse_path, DocumentReader, DomDocumentReader, EventType, FieldPath, FieldProjector,
        ProjectedDocumentReader, ProjectionTree,
    };
}

/// Parse `paths` and wrap `reader` in a projecting cursor over them.
///
/// Shorthand for building a [`FieldProjector`] from parsed paths and
/// constructing a [`ProjectedDocumentReader`].
///
/// # Errors
///
/// Returns the first [`PathSyntaxError`] encountered while parsing `paths`.
pub fn project<R: DocumentReader>(
    reader: R,
    paths: &[&str],
) -> PathResult<ProjectedDocumentReader<R>> {
    let parsed = paths
        .iter()
        .map(|p| parse_path(p))
        .collect::<PathResult<Vec<_>>>()?;
    Ok(ProjectedDocumentReader::new(
        reader,
        FieldProjector::from_paths(parsed),
    ))
}
