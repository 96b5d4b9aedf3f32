//! Hand-rolled parser for the field-path grammar.
//!
//! Walks the input as a `Vec<char>` and produces a canonical segment chain,
//! independent of whether individual steps were written quoted or bare.
//! Escape handling covers the quote characters, backslash, the grammar's
//! special characters, the control-character mnemonics and `\uXXXX` unicode
//! escapes, in both quoted and bare names.

use crate::error::{PathResult, PathSyntaxError};
use crate::field_path::segment::{FieldSegment, IndexSegment, NameSegment};

/// One parsed step, before the chain is linked together.
enum RawStep {
    Name(String),
    Index(Option<i32>),
}

pub(crate) struct PathParser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> PathParser<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Parse the full input into a root segment chain.
    ///
    /// The chain is always rooted at a name step; an input beginning with an
    /// index step is a syntax error.
    pub(crate) fn parse(mut self) -> PathResult<FieldSegment> {
        let mut steps = Vec::new();

        loop {
            steps.push(RawStep::Name(self.parse_name()?));
            while self.peek() == Some('[') {
                steps.push(RawStep::Index(self.parse_index()?));
            }
            match self.peek() {
                None => break,
                Some('.') => {
                    self.pos += 1;
                }
                Some(c) => {
                    return Err(self.error_here(format!(
                        "expected '.', '[' or end of path, found {c:?}"
                    )));
                }
            }
        }

        // Link the chain right to left; the leading Name step is the root.
        let mut chain: Option<FieldSegment> = None;
        for step in steps.into_iter().rev() {
            let child = chain.take().map(Box::new);
            chain = Some(match step {
                RawStep::Name(name) => FieldSegment::Name(NameSegment::new(name, child)),
                RawStep::Index(index) => FieldSegment::Index(IndexSegment::new(index, child)),
            });
        }
        // The loop above always pushes at least one name step.
        chain.ok_or_else(|| self.error_here("empty field path"))
    }

    fn parse_name(&mut self) -> PathResult<String> {
        match self.peek() {
            Some(q @ ('`' | '"')) => self.parse_quoted_name(q),
            Some('[') => Err(self.error_here("a field path step must begin with a name")),
            _ => self.parse_bare_name(),
        }
    }

    fn parse_quoted_name(&mut self, quote: char) -> PathResult<String> {
        let open = self.pos;
        self.pos += 1;
        let mut name = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(PathSyntaxError::at(
                        self.input,
                        open,
                        "unterminated quoted name",
                    ));
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(name);
                }
                Some('\\') => name.push(self.parse_escape()?),
                Some(c) if c.is_control() => {
                    return Err(self.error_here("un-escaped control character in name"));
                }
                Some(c) => {
                    name.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn parse_bare_name(&mut self) -> PathResult<String> {
        let start = self.pos;
        let mut name = String::new();
        loop {
            match self.peek() {
                None | Some('.' | '[' | ']') => break,
                Some('\\') => name.push(self.parse_escape()?),
                Some(c @ ('`' | '"')) => {
                    return Err(self.error_here(format!(
                        "quote character {c:?} must start a step or be escaped"
                    )));
                }
                Some(c) if c.is_control() => {
                    return Err(self.error_here("un-escaped control character in name"));
                }
                Some(c) => {
                    name.push(c);
                    self.pos += 1;
                }
            }
        }
        if name.is_empty() {
            return Err(PathSyntaxError::at(self.input, start, "empty name step"));
        }
        Ok(name)
    }

    /// Parse one `\x` escape; `self.pos` is on the backslash.
    fn parse_escape(&mut self) -> PathResult<char> {
        let backslash = self.pos;
        self.pos += 1;
        let Some(c) = self.peek() else {
            return Err(PathSyntaxError::at(
                self.input,
                backslash,
                "dangling escape at end of path",
            ));
        };
        self.pos += 1;
        match c {
            '"' | '`' | '\\' | '/' | '.' | '[' | ']' => Ok(c),
            'b' => Ok('\u{0008}'),
            'f' => Ok('\u{000C}'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'u' => self.parse_unicode_escape(backslash),
            other => Err(PathSyntaxError::at(
                self.input,
                backslash,
                format!("invalid escape sequence '\\{other}'"),
            )),
        }
    }

    /// Parse the `XXXX` of a `\uXXXX` escape; `self.pos` is past the `u`.
    fn parse_unicode_escape(&mut self, backslash: usize) -> PathResult<char> {
        if self.pos + 4 > self.chars.len() {
            return Err(PathSyntaxError::at(
                self.input,
                backslash,
                "incomplete unicode escape sequence",
            ));
        }
        let hex: String = self.chars[self.pos..self.pos + 4].iter().collect();
        let code_point = u32::from_str_radix(&hex, 16).map_err(|_| {
            PathSyntaxError::at(self.input, backslash, "invalid unicode escape sequence")
        })?;
        self.pos += 4;
        char::from_u32(code_point).ok_or_else(|| {
            PathSyntaxError::at(self.input, backslash, "invalid unicode code point")
        })
    }

    /// Parse one `[index]` or `[]` step; `self.pos` is on the `[`.
    fn parse_index(&mut self) -> PathResult<Option<i32>> {
        let open = self.pos;
        self.pos += 1;
        self.skip_spaces();
        let digits_start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits: String = self.chars[digits_start..self.pos].iter().collect();
        self.skip_spaces();
        match self.peek() {
            Some(']') => self.pos += 1,
            Some(_) => {
                return Err(self.error_here("array index must contain decimal digits only"));
            }
            None => {
                return Err(PathSyntaxError::at(self.input, open, "unterminated index step"));
            }
        }
        if digits.is_empty() {
            return Ok(None);
        }
        digits
            .parse::<i32>()
            .map(Some)
            .map_err(|_| PathSyntaxError::at(self.input, digits_start, "array index out of range"))
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn error_here(&self, message: impl Into<String>) -> PathSyntaxError {
        PathSyntaxError::at(self.input, self.pos, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> PathResult<FieldSegment> {
        PathParser::new(text).parse()
    }

    #[test]
    fn bare_names_and_indexes() {
        let root = parse("a.b[3].c").expect("valid path");
        assert!(root.is_map());
        let b = root.child().expect("b");
        assert!(b.is_array());
        let idx = b.child().expect("[3]");
        assert_eq!(idx.as_index().expect("index").index(), Some(3));
        assert!(idx.is_map());
        assert!(idx.child().expect("c").is_leaf());
    }

    #[test]
    fn whitespace_inside_brackets_is_wildcard() {
        let root = parse("a[ ]").expect("valid path");
        let idx = root.child().expect("index").as_index().expect("index");
        assert_eq!(idx.index(), None);
    }

    #[test]
    fn escaped_specials_in_bare_name() {
        let root = parse("a\\.b\\[4\\]").expect("valid path");
        assert!(root.is_leaf());
        assert_eq!(root.as_name().expect("name").name(), "a.b[4]");
    }

    #[test]
    fn unicode_escapes_in_bare_and_quoted_names() {
        let root = parse("\\u0041.\\u0042").expect("valid path");
        assert_eq!(root.as_name().expect("name").name(), "A");
        assert_eq!(
            root.child()
                .and_then(FieldSegment::as_name)
                .expect("second step")
                .name(),
            "B"
        );

        let root = parse("\"\\u000F\\`\\\"\\b\\f\\n\\r\\t\\\\\\/\"").expect("valid path");
        assert_eq!(
            root.as_name().expect("name").name(),
            "\u{000F}`\"\u{0008}\u{000C}\n\r\t\\/"
        );
    }

    #[test]
    fn rejects_bad_index_characters() {
        for bad in ["a[x]", "a[\u{4251}]", "a[1x]", "a[-1]"] {
            assert!(parse(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn rejects_control_characters_and_lone_quotes() {
        for bad in ["\\", "\n", "\t", "`", "\"", "\"\n\"", "`\t`"] {
            assert!(parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn rejects_structural_mistakes() {
        for bad in ["a..b", "a.", ".a", "[1]", "a[0]b", "a]", "ab\"cd"] {
            assert!(parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn error_carries_position() {
        let err = parse("a.b[x]").expect_err("invalid index");
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 5);
    }
}
