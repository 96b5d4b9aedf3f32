//! The document cursor protocol: a pull-based, forward-only event iterator
//! over one document's shape and scalar values.

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::document::types::{Decimal, Interval};
use crate::error::{DocumentError, DocumentResult};

/// Kind of the node a [`DocumentReader`] is positioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Null,
    Boolean,
    String,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal,
    Date,
    Time,
    Timestamp,
    Interval,
    Binary,
    StartMap,
    EndMap,
    StartArray,
    EndArray,
}

impl EventType {
    /// `true` for `StartMap` and `StartArray`.
    #[must_use]
    pub fn is_container_start(&self) -> bool {
        matches!(self, Self::StartMap | Self::StartArray)
    }

    /// `true` for `EndMap` and `EndArray`.
    #[must_use]
    pub fn is_container_end(&self) -> bool {
        matches!(self, Self::EndMap | Self::EndArray)
    }

    /// `true` for every kind that is not a container boundary.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !self.is_container_start() && !self.is_container_end()
    }
}

/// Forward-only cursor over a document.
///
/// A reader is single-pass and not thread-safe: one logical consumer drives
/// it, no event is ever revisited, and it must not be used again once it has
/// reported end-of-document.
///
/// Container-context queries (`in_map`, `field_name`, `array_index`) are
/// valid only in the context implied by the nearest open `StartMap` or
/// `StartArray`; typed getters are valid only while `current_event()` is the
/// matching kind. Violations surface as [`DocumentError`] without
/// invalidating the cursor.
pub trait DocumentReader {
    /// Advance to the next node and return its kind, or `None` once the
    /// document is exhausted.
    ///
    /// # Errors
    ///
    /// [`DocumentError::Decoding`] if the underlying document is malformed
    /// or incomplete.
    fn next(&mut self) -> DocumentResult<Option<EventType>>;

    /// The event produced by the last call to [`next`](Self::next), without
    /// advancing.
    fn current_event(&self) -> Option<EventType>;

    /// `true` while traversing a map, `false` while traversing an array.
    fn in_map(&self) -> bool;

    /// Name of the current field; `None` for the top-level document.
    ///
    /// # Errors
    ///
    /// [`DocumentError::State`] if the reader is not traversing a map.
    fn field_name(&self) -> DocumentResult<Option<&str>>;

    /// Index of the current element within the enclosing array.
    ///
    /// # Errors
    ///
    /// [`DocumentError::State`] if the reader is not traversing an array.
    fn array_index(&self) -> DocumentResult<i32>;

    /// The `bool` value of the current `Boolean` node.
    fn get_boolean(&self) -> DocumentResult<bool>;

    /// The string value of the current `String` node.
    fn get_string(&self) -> DocumentResult<&str>;

    /// The `i8` value of the current `Byte` node.
    fn get_byte(&self) -> DocumentResult<i8>;

    /// The `i16` value of the current `Short` node.
    fn get_short(&self) -> DocumentResult<i16>;

    /// The `i32` value of the current `Int` node.
    fn get_int(&self) -> DocumentResult<i32>;

    /// The `i64` value of the current `Long` node.
    fn get_long(&self) -> DocumentResult<i64>;

    /// The `f32` value of the current `Float` node.
    fn get_float(&self) -> DocumentResult<f32>;

    /// The `f64` value of the current `Double` node.
    fn get_double(&self) -> DocumentResult<f64>;

    /// The value of the current `Decimal` node.
    fn get_decimal(&self) -> DocumentResult<Decimal>;

    /// The value of the current `Date` node.
    fn get_date(&self) -> DocumentResult<NaiveDate>;

    /// The value of the current `Time` node.
    fn get_time(&self) -> DocumentResult<NaiveTime>;

    /// The value of the current `Timestamp` node.
    fn get_timestamp(&self) -> DocumentResult<DateTime<Utc>>;

    /// The current `Timestamp` node as milliseconds since the epoch.
    fn get_timestamp_millis(&self) -> DocumentResult<i64> {
        self.get_timestamp().map(|t| t.timestamp_millis())
    }

    /// The value of the current `Interval` node.
    fn get_interval(&self) -> DocumentResult<Interval>;

    /// The current `Interval` node as a total number of milliseconds.
    fn get_interval_millis(&self) -> DocumentResult<i64> {
        self.get_interval().map(|i| i.total_millis())
    }

    /// The value of the current `Binary` node.
    fn get_binary(&self) -> DocumentResult<Bytes>;

    /// When positioned at `StartMap`/`StartArray`, advance past the matching
    /// `EndMap`/`EndArray`, skipping the entire subtree; a no-op otherwise.
    fn skip_children(&mut self) -> DocumentResult<()> {
        match self.current_event() {
            Some(e) if e.is_container_start() => {}
            _ => return Ok(()),
        }
        let mut depth = 1i32;
        while depth > 0 {
            match self.next()? {
                Some(e) if e.is_container_start() => depth += 1,
                Some(e) if e.is_container_end() => depth -= 1,
                Some(_) => {}
                None => {
                    return Err(DocumentError::decoding(
                        "document ended inside an open container",
                    ));
                }
            }
        }
        Ok(())
    }
}
