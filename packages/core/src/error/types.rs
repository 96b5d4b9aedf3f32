//! Core error types for field-path parsing and document cursor operations.

use thiserror::Error;

use crate::document::EventType;

/// Error raised when a field path string fails to parse.
///
/// Carries the line and column of the offending character. Parsing stops at
/// the first error; no partially-built path is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid field path at {line}:{column}: {message}")]
pub struct PathSyntaxError {
    /// 1-based line of the offending character.
    pub line: u32,
    /// 1-based column of the offending character within its line.
    pub column: u32,
    /// Human-readable description of the failure.
    pub message: String,
}

impl PathSyntaxError {
    /// Build an error pointing at `offset` (a char offset) within `input`.
    pub(crate) fn at(input: &str, offset: usize, message: impl Into<String>) -> Self {
        let mut line = 1u32;
        let mut column = 1u32;
        for ch in input.chars().take(offset) {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Errors surfaced while driving a [`DocumentReader`](crate::document::DocumentReader).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// A typed getter was called while the cursor was positioned on a
    /// different event kind. Local to the call; the cursor stays usable.
    #[error("type mismatch: expected {expected:?}, current event is {actual:?}")]
    TypeMismatch {
        /// Event kind the getter requires.
        expected: EventType,
        /// Event kind the cursor is actually positioned on, if any.
        actual: Option<EventType>,
    },

    /// A container-context query or cursor operation was made in the wrong
    /// state (outside the matching container, before the first `next()`, or
    /// after end-of-document).
    #[error("invalid reader state: {0}")]
    State(String),

    /// The underlying document was malformed or ended prematurely.
    #[error("malformed document: {0}")]
    Decoding(String),
}

impl DocumentError {
    /// Create a new `State` error.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Create a new `Decoding` error.
    pub fn decoding(msg: impl Into<String>) -> Self {
        Self::Decoding(msg.into())
    }

    /// Create a `TypeMismatch` error for a getter expecting `expected`.
    #[must_use]
    pub fn type_mismatch(expected: EventType, actual: Option<EventType>) -> Self {
        Self::TypeMismatch { expected, actual }
    }
}

/// Result type for field-path parsing.
pub type PathResult<T> = Result<T, PathSyntaxError>;

/// Result type for document cursor operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
