//! Template grammar.
//!
//! # Module Structure
//!
//! - `mod.rs`: node dispatch, text, comments, quoted blocks and `parse_to_stop`
//! - `directive.rs`: `#if`, `#foreach`, `#set` and other `#name` forms
//! - `reference.rs`: `$` references, their suffix chains and argument lists
//! - `expr.rs`: precedence climbing and unary expressions
//! - `primary.rs`: literals and primaries

mod directive;
mod expr;
mod primary;
mod reference;

use vtl_ir::{Location, Node, NodeKind, Stop, StopKind};

use crate::{ParseError, ParseErrorKind, Parser};

/// One step of the node-level parse.
pub(crate) enum Parsed {
    Node(Node),
    Stop(Stop),
}

/// The nodes of a sub-parse and the stop that ended it.
pub(crate) struct ParsedBody {
    pub nodes: Vec<Node>,
    pub stop: Stop,
}

impl Parser<'_> {
    /// Parse nodes until a stop marker.
    ///
    /// The stop must be one of `accepted`. Anything else is an error that
    /// names the stop and `context`, so an `#end` at top level or end of file
    /// inside `#foreach` fails instead of silently closing the construct.
    pub(crate) fn parse_to_stop(
        &mut self,
        accepted: &[StopKind],
        context: &str,
    ) -> Result<ParsedBody, ParseError> {
        let mut nodes = Vec::new();
        loop {
            match self.parse_node()? {
                Parsed::Stop(stop) => {
                    if !accepted.contains(&stop.kind) {
                        return Err(ParseError::at(
                            &stop.location,
                            ParseErrorKind::UnexpectedStop {
                                stop: stop.kind,
                                context: context.to_owned(),
                            },
                        ));
                    }
                    return Ok(ParsedBody { nodes, stop });
                }
                Parsed::Node(node) => {
                    if matches!(node.kind, NodeKind::Set { .. }) && whitespace_yields_to_set(&nodes) {
                        if let Some(last) = nodes.last_mut() {
                            *last = node;
                        }
                    } else {
                        nodes.push(node);
                    }
                }
            }
        }
    }

    /// Skip one newline directly after a directive's closing `)`, then
    /// parse to a stop.
    pub(crate) fn skip_newline_and_parse_to_stop(
        &mut self,
        accepted: &[StopKind],
        context: &str,
    ) -> Result<ParsedBody, ParseError> {
        if self.current_is('\n') {
            self.advance();
        }
        self.parse_to_stop(accepted, context)
    }

    fn parse_node(&mut self) -> Result<Parsed, ParseError> {
        let location = self.location();
        match self.current() {
            Some('#') => {
                self.advance();
                match self.current() {
                    Some('#') => Ok(Parsed::Node(self.parse_line_comment(location))),
                    Some('*') => Ok(Parsed::Node(self.parse_block_comment(location))),
                    Some('[') => self.parse_hash_square(location).map(Parsed::Node),
                    Some('{') => self.parse_directive(location),
                    Some(c) if c.is_ascii_alphabetic() => self.parse_directive(location),
                    // `#` before anything else is text; `#$foo` is `#` then `$foo`.
                    _ => Ok(Parsed::Node(self.parse_text_from("#".to_owned(), location))),
                }
            }
            Some('$') => self.parse_dollar().map(Parsed::Node),
            Some(c) => {
                self.advance();
                Ok(Parsed::Node(self.parse_text_from(String::from(c), location)))
            }
            None => Ok(Parsed::Stop(Stop {
                kind: StopKind::Eof,
                location,
            })),
        }
    }

    /// `##` through the end of the line, newline included.
    fn parse_line_comment(&mut self, location: Location) -> Node {
        while !matches!(self.current(), Some('\n') | None) {
            self.advance();
        }
        self.advance();
        Node::new(NodeKind::Comment, location)
    }

    /// `#*` through the next `*#`. A missing terminator runs to end of file.
    fn parse_block_comment(&mut self, location: Location) -> Node {
        let mut last = None;
        self.advance();
        while !(last == Some('*') && self.current_is('#')) && self.current().is_some() {
            last = self.current();
            self.advance();
        }
        self.advance();
        Node::new(NodeKind::Comment, location)
    }

    /// `#[[quoted]]#`, or the text `#[` when the second `[` is missing.
    fn parse_hash_square(&mut self, location: Location) -> Result<Node, ParseError> {
        self.advance();
        if !self.current_is('[') {
            return Ok(self.parse_text_from("#[".to_owned(), location));
        }
        self.advance();

        let mut quoted = String::new();
        loop {
            match self.current() {
                None => {
                    return Err(ParseError::at(
                        &location,
                        ParseErrorKind::UnterminatedQuotedBlock,
                    ))
                }
                Some('#') if quoted.ends_with("]]") => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    quoted.push(c);
                    self.advance();
                }
            }
        }
        quoted.truncate(quoted.len() - "]]".len());
        Ok(Node::text(quoted, location))
    }

    /// Extend `text` with characters up to the next `$`, `#` or end of file.
    pub(crate) fn parse_text_from(&mut self, mut text: String, location: Location) -> Node {
        while let Some(c) = self.current() {
            if c == '$' || c == '#' {
                break;
            }
            text.push(c);
            self.advance();
        }
        Node::text(text, location)
    }
}

/// Whether a `#set` about to be appended should replace the last node.
///
/// True when the last node is whitespace sitting between the `#set` and a
/// reference (horizontal whitespace only), a comment or a directive, so a
/// `#set` on a line of its own leaves no blank line behind.
fn whitespace_yields_to_set(nodes: &[Node]) -> bool {
    let [.., before_space, space] = nodes else {
        return false;
    };
    if before_space.is_reference() {
        space.is_horizontal_whitespace()
    } else if before_space.is_comment() || before_space.is_directive() {
        space.is_whitespace()
    } else {
        false
    }
}
