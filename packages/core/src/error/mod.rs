//! Error types for path parsing and document traversal.

mod types;

pub use types::{DocumentError, DocumentResult, PathResult, PathSyntaxError};
