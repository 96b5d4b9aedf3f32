//! The field-path language: segment model, parser, cache and the public
//! [`FieldPath`] type.

mod cache;
mod parser;
mod path;
mod segment;

pub use cache::PathCache;
pub use path::{FieldPath, Segments};
pub use segment::{FieldSegment, IndexSegment, NameSegment};
