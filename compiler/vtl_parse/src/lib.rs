//! Recursive descent parser for VTL templates.
//!
//! There is no separate lexing pass. Whether `$` or `#` starts a reference or
//! a directive depends on the character after it, so the parser reads
//! characters directly through a [`Cursor`].
//!
//! Parsing is all-or-nothing: the first grammar violation aborts with a
//! [`ParseError`] and no tree is returned.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;
use vtl_ir::{Location, MacroDefinition, Node, NodeKind, StopKind};

/// A successfully parsed template.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOutput {
    /// Top-level sequence.
    pub root: Node,
    /// Macros defined by the template, by name.
    pub macros: FxHashMap<String, MacroDefinition>,
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    macros: FxHashMap<String, MacroDefinition>,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str, resource: &str) -> Self {
        Parser {
            cursor: Cursor::new(text, Arc::from(resource)),
            macros: FxHashMap::default(),
        }
    }

    /// Parse the whole input into a root sequence.
    pub fn parse(mut self) -> Result<ParseOutput, ParseError> {
        let location = self.location();
        let body = self.parse_to_stop(&[StopKind::Eof], "outside any construct")?;
        let root = Node::new(NodeKind::Sequence(body.nodes), location);

        // Macro calls may precede definitions, so they are checked once the
        // whole template has been read.
        if let Some((name, location)) = first_undefined_macro(&root, &self.macros) {
            return Err(ParseError::at(
                location,
                ParseErrorKind::UndefinedMacro {
                    name: name.to_owned(),
                },
            ));
        }

        if let NodeKind::Sequence(children) = &root.kind {
            debug!(
                resource = root.location.resource(),
                nodes = children.len(),
                lines = self.cursor.line(),
                "parsed template"
            );
        }

        Ok(ParseOutput {
            root,
            macros: self.macros,
        })
    }

    // Cursor delegation.

    #[inline]
    fn current(&self) -> Option<char> {
        self.cursor.current()
    }

    #[inline]
    fn current_is(&self, c: char) -> bool {
        self.cursor.current() == Some(c)
    }

    #[inline]
    fn current_is_letter(&self) -> bool {
        self.cursor.current().is_some_and(|c| c.is_ascii_alphabetic())
    }

    #[inline]
    fn advance(&mut self) {
        self.cursor.advance();
    }

    #[inline]
    fn skip_space(&mut self) {
        self.cursor.skip_space();
    }

    #[inline]
    fn next_non_space(&mut self) {
        self.cursor.next_non_space();
    }

    #[inline]
    fn expect(&mut self, c: char) -> Result<(), ParseError> {
        self.cursor.expect(c)
    }

    #[inline]
    fn location(&self) -> Location {
        self.cursor.location()
    }

    #[inline]
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.cursor.error(kind)
    }
}

/// Parse `text` as a template named `resource`.
#[tracing::instrument(level = "debug", skip_all, fields(resource = resource, len = text.len()))]
pub fn parse(text: &str, resource: &str) -> Result<ParseOutput, ParseError> {
    Parser::new(text, resource).parse()
}

/// The first macro call (in source order) whose name has no definition.
fn first_undefined_macro<'n>(
    node: &'n Node,
    macros: &FxHashMap<String, MacroDefinition>,
) -> Option<(&'n str, &'n Location)> {
    match &node.kind {
        NodeKind::MacroCall { name, .. } if !macros.contains_key(name) => {
            Some((name, &node.location))
        }
        NodeKind::Sequence(children) => children
            .iter()
            .find_map(|child| first_undefined_macro(child, macros)),
        NodeKind::If {
            then_branch,
            else_branch,
            ..
        } => first_undefined_macro(then_branch, macros)
            .or_else(|| first_undefined_macro(else_branch, macros)),
        NodeKind::ForEach { body, .. } => first_undefined_macro(body, macros),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
