//! `#` directives.
//!
//! Directives can be spelled `#if` or `#{if}`. `#end`, `#else` and `#elseif`
//! come back as stops; `#if` and `#foreach` parse their whole body,
//! including the closing `#end`.

use tracing::trace;
use vtl_ir::{Location, Node, NodeKind, Stop, StopKind};

use super::Parsed;
use crate::error::describe_char;
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse a directive. The cursor is on the letter or `{` after `#`.
    pub(super) fn parse_directive(&mut self, location: Location) -> Result<Parsed, ParseError> {
        let name = if self.current_is('{') {
            self.advance();
            let name = self.parse_id("directive inside #{...}")?;
            self.expect('}')?;
            name
        } else {
            self.parse_id("directive")?
        };
        trace!(directive = %name, line = location.line(), "directive");

        let parsed = match name.as_str() {
            "end" => stop(StopKind::End, location),
            "else" => stop(StopKind::Else, location),
            "elseif" => stop(StopKind::ElseIf, location),
            // Both consume their own trailing newline along with `#end`.
            "if" => return self.parse_if("#if", location).map(Parsed::Node),
            "foreach" => return self.parse_foreach(location).map(Parsed::Node),
            "set" => Parsed::Node(self.parse_set(location)?),
            "parse" => {
                return Err(ParseError::at(
                    &location,
                    ParseErrorKind::Unsupported { feature: "#parse" },
                ))
            }
            "macro" => {
                return Err(ParseError::at(
                    &location,
                    ParseErrorKind::Unsupported {
                        feature: "#macro definition",
                    },
                ))
            }
            _ => Parsed::Node(self.parse_macro_call(name, location)?),
        };

        if self.current_is('\n') {
            self.advance();
        }
        Ok(parsed)
    }

    /// `#if (cond) body [#elseif (cond) body]* [#else body] #end`
    ///
    /// An `#elseif` chain becomes nested conditionals: the false branch of
    /// each `#if` is the next `#elseif`.
    fn parse_if(&mut self, directive: &str, location: Location) -> Result<Node, ParseError> {
        self.expect('(')?;
        let condition = self.parse_expression()?;
        self.expect(')')?;

        let context = format!(
            "while parsing {directive} starting on line {}",
            location.line()
        );
        let then_part = self.skip_newline_and_parse_to_stop(
            &[StopKind::Else, StopKind::ElseIf, StopKind::End],
            &context,
        )?;
        let then_branch = Node::new(NodeKind::Sequence(then_part.nodes), location.clone());

        let else_branch = match then_part.stop.kind {
            StopKind::End => Node::empty(then_part.stop.location),
            StopKind::ElseIf => self.parse_if("#elseif", then_part.stop.location)?,
            StopKind::Else => {
                let else_location = then_part.stop.location;
                let context = format!(
                    "while parsing #else starting on line {}",
                    else_location.line()
                );
                let else_part = self.parse_to_stop(&[StopKind::End], &context)?;
                Node::new(NodeKind::Sequence(else_part.nodes), else_location)
            }
            StopKind::Eof => unreachable!("parse_to_stop rejects end of file inside #if"),
        };

        Ok(Node::new(
            NodeKind::If {
                condition,
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            location,
        ))
    }

    /// `#foreach ($id in <expr>) body #end`
    fn parse_foreach(&mut self, location: Location) -> Result<Node, ParseError> {
        self.expect('(')?;
        self.expect('$')?;
        let variable = self.parse_id("#foreach variable")?;
        self.skip_space();
        self.expect_in_keyword()?;
        let collection = self.parse_expression()?;
        self.expect(')')?;

        let context = format!("while parsing #foreach starting on line {}", location.line());
        let body = self.skip_newline_and_parse_to_stop(&[StopKind::End], &context)?;

        Ok(Node::new(
            NodeKind::ForEach {
                variable,
                collection,
                body: Box::new(Node::new(NodeKind::Sequence(body.nodes), location.clone())),
            },
            location,
        ))
    }

    fn expect_in_keyword(&mut self) -> Result<(), ParseError> {
        if self.current_is('i') {
            self.advance();
            if self.current_is('n') {
                self.advance();
                return Ok(());
            }
        }
        Err(self.error(ParseErrorKind::expected(
            "`in` after the #foreach variable",
            self.current(),
        )))
    }

    /// `#set ($id = <expr>)`
    fn parse_set(&mut self, location: Location) -> Result<Node, ParseError> {
        self.expect('(')?;
        self.expect('$')?;
        let variable = self.parse_id("#set variable")?;
        self.expect('=')?;
        let value = self.parse_expression()?;
        self.expect(')')?;
        trace!(variable = %variable, line = location.line(), "set");
        Ok(Node::new(NodeKind::Set { variable, value }, location))
    }

    /// `#name(args)` for any name that is not a standard directive.
    ///
    /// Arguments are primaries separated by commas or whitespace. Whether
    /// `name` is defined is checked after the whole template is parsed.
    fn parse_macro_call(&mut self, name: String, location: Location) -> Result<Node, ParseError> {
        self.skip_space();
        if !self.current_is('(') {
            return Err(self.error(ParseErrorKind::expected(
                format!("`(` after macro name #{name}"),
                self.current(),
            )));
        }
        let args = self.parse_arguments()?;
        Ok(Node::new(NodeKind::MacroCall { name, args }, location))
    }

    /// An identifier: an ASCII letter, then letters, digits, `-` or `_`.
    pub(crate) fn parse_id(&mut self, what: &'static str) -> Result<String, ParseError> {
        if !self.current_is_letter() {
            return Err(self.error(ParseErrorKind::InvalidIdentifier {
                what,
                found: describe_char(self.current()),
            }));
        }
        let mut id = String::new();
        while let Some(c) = self.current() {
            if !is_id_char(c) {
                break;
            }
            id.push(c);
            self.advance();
        }
        Ok(id)
    }
}

fn stop(kind: StopKind, location: Location) -> Parsed {
    Parsed::Stop(Stop { kind, location })
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
