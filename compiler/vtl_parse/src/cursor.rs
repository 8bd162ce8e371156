//! Character cursor over template text.
//!
//! One character of lookahead plus a single pushback slot. The parser never
//! needs to back up further than one character.

use std::str::Chars;
use std::sync::Arc;

use tracing::trace;
use vtl_ir::Location;

use crate::error::describe_char;
use crate::{ParseError, ParseErrorKind};

/// Cursor over the characters of one template.
///
/// `current()` is `None` at end of input. Advancing past the end is a no-op,
/// so end of input can be observed any number of times.
pub struct Cursor<'a> {
    chars: Chars<'a>,
    current: Option<char>,
    /// Character to replay after `current` is consumed.
    pushed: Option<char>,
    resource: Arc<str>,
    line: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str, resource: Arc<str>) -> Self {
        let mut chars = text.chars();
        let current = chars.next();
        Cursor {
            chars,
            current,
            pushed: None,
            resource,
            line: 1,
        }
    }

    /// The lookahead character, or `None` at end of input.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// 1-based line of the lookahead character.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn location(&self) -> Location {
        Location::new(Arc::clone(&self.resource), self.line)
    }

    /// Consume the lookahead character.
    pub fn advance(&mut self) {
        let Some(consumed) = self.current else {
            return;
        };
        if consumed == '\n' {
            self.line += 1;
        }
        self.current = self.pushed.take().or_else(|| self.chars.next());
    }

    /// Make `c` the lookahead and replay the current lookahead after it.
    ///
    /// Only one character can be pending at a time.
    pub fn pushback(&mut self, c: char) {
        debug_assert!(self.pushed.is_none(), "pushback slot already in use");
        trace!(pushed = %c, line = self.line, "pushback");
        self.pushed = self.current;
        self.current = Some(c);
    }

    /// Skip spaces, tabs and line breaks.
    pub fn skip_space(&mut self) {
        while self.current.is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Consume the lookahead, then skip any space after it.
    pub fn next_non_space(&mut self) {
        self.advance();
        self.skip_space();
    }

    /// Skip space, then consume `expected` or fail naming what was found.
    pub fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_space();
        if self.current == Some(expected) {
            self.advance();
            return Ok(());
        }
        Err(self.error(ParseErrorKind::Expected {
            expected: format!("`{expected}`"),
            found: describe_char(self.current),
        }))
    }

    /// An error at the current line.
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            resource: self.resource.to_string(),
            line: self.line,
            kind,
        }
    }
}

#[cfg(test)]
mod tests;
