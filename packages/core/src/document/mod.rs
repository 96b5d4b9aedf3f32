//! The document cursor protocol and its scalar value types.

mod dom;
mod reader;
mod types;

pub use dom::DomDocumentReader;
pub use reader::{DocumentReader, EventType};
pub use types::{Decimal, Interval};
