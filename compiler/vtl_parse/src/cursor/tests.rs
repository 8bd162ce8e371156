#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::Cursor;
use crate::ParseErrorKind;

fn cursor(text: &str) -> Cursor<'_> {
    Cursor::new(text, Arc::from("cursor.vm"))
}

#[test]
fn test_advance_and_eof_is_idempotent() {
    let mut c = cursor("ab");
    assert_eq!(c.current(), Some('a'));
    c.advance();
    assert_eq!(c.current(), Some('b'));
    c.advance();
    assert_eq!(c.current(), None);
    c.advance();
    c.advance();
    assert_eq!(c.current(), None);
}

#[test]
fn test_line_counts_consumed_newlines() {
    let mut c = cursor("a\nb\n\nc");
    assert_eq!(c.line(), 1);
    c.advance();
    // The newline itself is still on line 1.
    assert_eq!(c.current(), Some('\n'));
    assert_eq!(c.line(), 1);
    c.advance();
    assert_eq!(c.line(), 2);
    c.advance();
    c.advance();
    c.advance();
    assert_eq!(c.current(), Some('c'));
    assert_eq!(c.line(), 4);
}

#[test]
fn test_pushback_replays_once() {
    let mut c = cursor("xy");
    c.advance();
    assert_eq!(c.current(), Some('y'));
    c.pushback('x');
    assert_eq!(c.current(), Some('x'));
    c.advance();
    assert_eq!(c.current(), Some('y'));
    c.advance();
    assert_eq!(c.current(), None);
}

#[test]
fn test_pushback_at_eof() {
    let mut c = cursor("a");
    c.advance();
    c.pushback('.');
    assert_eq!(c.current(), Some('.'));
    c.advance();
    assert_eq!(c.current(), None);
}

#[test]
fn test_skip_space_and_next_non_space() {
    let mut c = cursor("(  \t\n x");
    c.next_non_space();
    assert_eq!(c.current(), Some('x'));
    assert_eq!(c.line(), 2);
}

#[test]
fn test_expect_skips_space() {
    let mut c = cursor("   )z");
    assert!(c.expect(')').is_ok());
    assert_eq!(c.current(), Some('z'));
}

#[test]
fn test_expect_reports_found_character() {
    let mut c = cursor("\n\n  ]");
    let err = c.expect(')').unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(
        err.kind,
        ParseErrorKind::Expected {
            expected: "`)`".into(),
            found: "`]`".into(),
        }
    );
    assert_eq!(err.to_string(), "cursor.vm:3: expected `)`, found `]`");
}

#[test]
fn test_expect_at_eof() {
    let mut c = cursor("");
    let err = c.expect('}').unwrap_err();
    assert_eq!(err.to_string(), "cursor.vm:1: expected `}`, found end of file");
}
