//! A projecting wrapper over any document cursor.

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::document::{Decimal, DocumentReader, EventType, Interval};
use crate::error::DocumentResult;
use crate::projection::projector::{FieldProjector, FieldRef};

/// A [`DocumentReader`] that re-emits another reader's events filtered down
/// to a set of projected field paths.
///
/// Implements the same cursor protocol as its input, so it composes
/// transparently with any downstream consumer. The synthetic document root
/// is always forwarded as an unconditional `StartMap`/`EndMap` pair;
/// unmatched branches are skipped with a single lookup per step and are
/// never structurally traversed.
pub struct ProjectedDocumentReader<R> {
    reader: R,
    projector: FieldProjector,
}

impl<R: DocumentReader> ProjectedDocumentReader<R> {
    /// Wrap `reader`, emitting only events covered by `projector`.
    pub fn new(reader: R, mut projector: FieldProjector) -> Self {
        projector.reset();
        Self { reader, projector }
    }

    /// Unwrap the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: DocumentReader> DocumentReader for ProjectedDocumentReader<R> {
    fn next(&mut self) -> DocumentResult<Option<EventType>> {
        loop {
            let Some(event) = self.reader.next()? else {
                return Ok(None);
            };

            if event == EventType::StartMap
                && self.reader.in_map()
                && self.reader.field_name()?.is_none()
            {
                // Document root, always forwarded.
                return Ok(Some(event));
            }

            let field = if event.is_container_end() {
                None
            } else if self.reader.in_map() {
                Some(FieldRef::Name(self.reader.field_name()?.unwrap_or("")))
            } else {
                Some(FieldRef::Index(self.reader.array_index()?))
            };
            self.projector.move_to(event, field);

            if self.projector.should_emit_event() {
                return Ok(Some(event));
            }
            // Excluded: drop the event and, for a container, its subtree.
            self.reader.skip_children()?;
        }
    }

    fn current_event(&self) -> Option<EventType> {
        self.reader.current_event()
    }

    fn in_map(&self) -> bool {
        self.reader.in_map()
    }

    fn field_name(&self) -> DocumentResult<Option<&str>> {
        self.reader.field_name()
    }

    fn array_index(&self) -> DocumentResult<i32> {
        self.reader.array_index()
    }

    fn get_boolean(&self) -> DocumentResult<bool> {
        self.reader.get_boolean()
    }

    fn get_string(&self) -> DocumentResult<&str> {
        self.reader.get_string()
    }

    fn get_byte(&self) -> DocumentResult<i8> {
        self.reader.get_byte()
    }

    fn get_short(&self) -> DocumentResult<i16> {
        self.reader.get_short()
    }

    fn get_int(&self) -> DocumentResult<i32> {
        self.reader.get_int()
    }

    fn get_long(&self) -> DocumentResult<i64> {
        self.reader.get_long()
    }

    fn get_float(&self) -> DocumentResult<f32> {
        self.reader.get_float()
    }

    fn get_double(&self) -> DocumentResult<f64> {
        self.reader.get_double()
    }

    fn get_decimal(&self) -> DocumentResult<Decimal> {
        self.reader.get_decimal()
    }

    fn get_date(&self) -> DocumentResult<NaiveDate> {
        self.reader.get_date()
    }

    fn get_time(&self) -> DocumentResult<NaiveTime> {
        self.reader.get_time()
    }

    fn get_timestamp(&self) -> DocumentResult<DateTime<Utc>> {
        self.reader.get_timestamp()
    }

    fn get_timestamp_millis(&self) -> DocumentResult<i64> {
        self.reader.get_timestamp_millis()
    }

    fn get_interval(&self) -> DocumentResult<Interval> {
        self.reader.get_interval()
    }

    fn get_interval_millis(&self) -> DocumentResult<i64> {
        self.reader.get_interval_millis()
    }

    fn get_binary(&self) -> DocumentResult<Bytes> {
        self.reader.get_binary()
    }

    fn skip_children(&mut self) -> DocumentResult<()> {
        self.reader.skip_children()
    }
}
