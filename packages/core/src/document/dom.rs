//! Reference cursor implementation over an in-memory `serde_json` document.
//!
//! Walks a borrowed [`Value`] tree with an explicit frame stack and emits the
//! cursor event sequence without copying the document. JSON scalars map onto
//! `Null`/`Boolean`/`String`/`Long`/`Double` events; the extended scalar
//! kinds never occur in a plain JSON document.

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::Value;

use crate::document::reader::{DocumentReader, EventType};
use crate::document::types::{Decimal, Interval};
use crate::error::{DocumentError, DocumentResult};

enum FrameIter<'a> {
    Map(serde_json::map::Iter<'a>),
    Array(std::slice::Iter<'a, Value>),
}

struct Frame<'a> {
    iter: FrameIter<'a>,
    // identity of this container within its parent; name is None for the
    // document root
    self_in_map: bool,
    self_name: Option<&'a str>,
    self_index: i32,
    // index of the most recently visited element while iterating an array
    next_index: i32,
}

enum Step<'a> {
    MapEntry(&'a str, &'a Value),
    ArrayEntry(i32, &'a Value),
    End,
}

/// A [`DocumentReader`] over a borrowed `serde_json::Value` whose root is a
/// map.
pub struct DomDocumentReader<'a> {
    root: &'a Value,
    stack: Vec<Frame<'a>>,
    started: bool,
    finished: bool,
    current: Option<EventType>,
    current_value: Option<&'a Value>,
    ctx_in_map: bool,
    ctx_name: Option<&'a str>,
    ctx_index: i32,
}

impl<'a> DomDocumentReader<'a> {
    /// Create a cursor over `document`. The root must be a JSON object;
    /// anything else surfaces as a `Decoding` error from the first `next()`.
    #[must_use]
    pub fn new(document: &'a Value) -> Self {
        Self {
            root: document,
            stack: Vec::new(),
            started: false,
            finished: false,
            current: None,
            current_value: None,
            ctx_in_map: true,
            ctx_name: None,
            ctx_index: -1,
        }
    }

    fn start(&mut self) -> DocumentResult<Option<EventType>> {
        self.started = true;
        let Value::Object(map) = self.root else {
            self.finished = true;
            return Err(DocumentError::decoding("document root must be a map"));
        };
        self.stack.push(Frame {
            iter: FrameIter::Map(map.iter()),
            self_in_map: true,
            self_name: None,
            self_index: -1,
            next_index: -1,
        });
        self.ctx_in_map = true;
        self.ctx_name = None;
        self.ctx_index = -1;
        self.current = Some(EventType::StartMap);
        self.current_value = None;
        Ok(self.current)
    }

    fn emit_value(&mut self, value: &'a Value) -> DocumentResult<Option<EventType>> {
        let event = match value {
            Value::Null => EventType::Null,
            Value::Bool(_) => EventType::Boolean,
            Value::String(_) => EventType::String,
            Value::Number(n) => {
                if n.as_i64().is_some() {
                    EventType::Long
                } else {
                    EventType::Double
                }
            }
            Value::Object(map) => {
                self.stack.push(Frame {
                    iter: FrameIter::Map(map.iter()),
                    self_in_map: self.ctx_in_map,
                    self_name: self.ctx_name,
                    self_index: self.ctx_index,
                    next_index: -1,
                });
                EventType::StartMap
            }
            Value::Array(items) => {
                self.stack.push(Frame {
                    iter: FrameIter::Array(items.iter()),
                    self_in_map: self.ctx_in_map,
                    self_name: self.ctx_name,
                    self_index: self.ctx_index,
                    next_index: -1,
                });
                EventType::StartArray
            }
        };
        self.current_value = if event.is_container_start() {
            None
        } else {
            Some(value)
        };
        self.current = Some(event);
        Ok(self.current)
    }

    fn expect_event(&self, expected: EventType) -> DocumentResult<&'a Value> {
        let Some(current) = self.current else {
            return Err(DocumentError::state("the reader is not positioned on a node"));
        };
        if current != expected {
            return Err(DocumentError::type_mismatch(expected, self.current));
        }
        self.current_value
            .ok_or_else(|| DocumentError::state("current event carries no value"))
    }

    fn unsupported(&self, expected: EventType) -> DocumentError {
        DocumentError::type_mismatch(expected, self.current)
    }
}

impl<'a> DocumentReader for DomDocumentReader<'a> {
    fn next(&mut self) -> DocumentResult<Option<EventType>> {
        if self.finished {
            return Ok(None);
        }
        if !self.started {
            return self.start();
        }
        let step = match self.stack.last_mut() {
            None => {
                self.finished = true;
                self.current = None;
                self.current_value = None;
                return Ok(None);
            }
            Some(top) => match &mut top.iter {
                FrameIter::Map(it) => match it.next() {
                    Some((k, v)) => Step::MapEntry(k.as_str(), v),
                    None => Step::End,
                },
                FrameIter::Array(it) => match it.next() {
                    Some(v) => {
                        top.next_index += 1;
                        Step::ArrayEntry(top.next_index, v)
                    }
                    None => Step::End,
                },
            },
        };
        match step {
            Step::MapEntry(name, value) => {
                self.ctx_in_map = true;
                self.ctx_name = Some(name);
                self.emit_value(value)
            }
            Step::ArrayEntry(index, value) => {
                self.ctx_in_map = false;
                self.ctx_index = index;
                self.emit_value(value)
            }
            Step::End => {
                let Some(frame) = self.stack.pop() else {
                    return Ok(None);
                };
                let event = match frame.iter {
                    FrameIter::Map(_) => EventType::EndMap,
                    FrameIter::Array(_) => EventType::EndArray,
                };
                self.ctx_in_map = frame.self_in_map;
                self.ctx_name = frame.self_name;
                self.ctx_index = frame.self_index;
                self.current = Some(event);
                self.current_value = None;
                Ok(self.current)
            }
        }
    }

    fn current_event(&self) -> Option<EventType> {
        self.current
    }

    fn in_map(&self) -> bool {
        self.ctx_in_map
    }

    fn field_name(&self) -> DocumentResult<Option<&str>> {
        if self.current.is_none() {
            return Err(DocumentError::state("the reader is not positioned on a node"));
        }
        if !self.ctx_in_map {
            return Err(DocumentError::state("the reader is not traversing a map"));
        }
        Ok(self.ctx_name)
    }

    fn array_index(&self) -> DocumentResult<i32> {
        if self.current.is_none() {
            return Err(DocumentError::state("the reader is not positioned on a node"));
        }
        if self.ctx_in_map {
            return Err(DocumentError::state("the reader is not traversing an array"));
        }
        Ok(self.ctx_index)
    }

    fn get_boolean(&self) -> DocumentResult<bool> {
        match self.expect_event(EventType::Boolean)? {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.unsupported(EventType::Boolean)),
        }
    }

    fn get_string(&self) -> DocumentResult<&str> {
        match self.expect_event(EventType::String)? {
            Value::String(s) => Ok(s),
            _ => Err(self.unsupported(EventType::String)),
        }
    }

    fn get_byte(&self) -> DocumentResult<i8> {
        Err(self.unsupported(EventType::Byte))
    }

    fn get_short(&self) -> DocumentResult<i16> {
        Err(self.unsupported(EventType::Short))
    }

    fn get_int(&self) -> DocumentResult<i32> {
        Err(self.unsupported(EventType::Int))
    }

    fn get_long(&self) -> DocumentResult<i64> {
        match self.expect_event(EventType::Long)? {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| self.unsupported(EventType::Long)),
            _ => Err(self.unsupported(EventType::Long)),
        }
    }

    fn get_float(&self) -> DocumentResult<f32> {
        Err(self.unsupported(EventType::Float))
    }

    fn get_double(&self) -> DocumentResult<f64> {
        match self.expect_event(EventType::Double)? {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| self.unsupported(EventType::Double)),
            _ => Err(self.unsupported(EventType::Double)),
        }
    }

    fn get_decimal(&self) -> DocumentResult<Decimal> {
        Err(self.unsupported(EventType::Decimal))
    }

    fn get_date(&self) -> DocumentResult<NaiveDate> {
        Err(self.unsupported(EventType::Date))
    }

    fn get_time(&self) -> DocumentResult<NaiveTime> {
        Err(self.unsupported(EventType::Time))
    }

    fn get_timestamp(&self) -> DocumentResult<DateTime<Utc>> {
        Err(self.unsupported(EventType::Timestamp))
    }

    fn get_interval(&self) -> DocumentResult<Interval> {
        Err(self.unsupported(EventType::Interval))
    }

    fn get_binary(&self) -> DocumentResult<Bytes> {
        Err(self.unsupported(EventType::Binary))
    }
}
