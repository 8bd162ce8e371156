//! `$` references.
//!
//! ```text
//! reference        -> $ [!] reference-body | $ [!] { reference-body }
//! reference-body   -> id suffix*
//! suffix           -> . id | . id ( arguments ) | [ primary ]
//! ```
//!
//! In text, `$` only starts a reference when a letter or `{` follows;
//! otherwise it is plain text. Inside expressions a reference is required.

use vtl_ir::{Expr, Location, Node, NodeKind, Reference, ReferenceKind};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// A `$` in text position.
    pub(super) fn parse_dollar(&mut self) -> Result<Node, ParseError> {
        let location = self.location();
        self.advance();

        let silent = self.current_is('!');
        if silent {
            self.advance();
        }

        if self.current_is_letter() || self.current_is('{') {
            return self.parse_reference(silent, location);
        }

        let text = if silent { "$!" } else { "$" };
        Ok(self.parse_text_from(text.to_owned(), location))
    }

    fn parse_reference(&mut self, silent: bool, location: Location) -> Result<Node, ParseError> {
        let reference = if self.current_is('{') {
            self.advance();
            if !self.current_is_letter() {
                let text = if silent { "$!{" } else { "${" };
                return Ok(self.parse_text_from(text.to_owned(), location));
            }
            let reference = self.parse_reference_no_brace(silent)?;
            self.expect('}')?;
            reference
        } else {
            self.parse_reference_no_brace(silent)?
        };
        Ok(Node::new(NodeKind::Expr(reference.into()), location))
    }

    /// A reference inside an expression. The `$` has been consumed.
    pub(super) fn parse_required_reference(&mut self) -> Result<Reference, ParseError> {
        let silent = self.current_is('!');
        if silent {
            self.advance();
        }

        if self.current_is('{') {
            self.advance();
            let reference = self.parse_reference_no_brace(silent)?;
            self.expect('}')?;
            return Ok(reference);
        }
        self.parse_reference_no_brace(silent)
    }

    fn parse_reference_no_brace(&mut self, silent: bool) -> Result<Reference, ParseError> {
        let location = self.location();
        let name = self.parse_id("reference")?;
        self.parse_reference_suffix(Reference::plain(name, silent, location))
    }

    /// Extend `lhs` with `.member`, `.method(...)` and `[index]` links.
    fn parse_reference_suffix(&mut self, mut lhs: Reference) -> Result<Reference, ParseError> {
        loop {
            let location = self.location();
            match self.current() {
                Some('.') => {
                    self.advance();
                    if !self.current_is_letter() {
                        // `$foo.` ends the reference; the dot is text.
                        self.cursor.pushback('.');
                        return Ok(lhs);
                    }
                    lhs = self.parse_reference_member(lhs, location)?;
                }
                Some('[') => lhs = self.parse_reference_index(lhs, location)?,
                _ => return Ok(lhs),
            }
        }
    }

    fn parse_reference_member(
        &mut self,
        lhs: Reference,
        location: Location,
    ) -> Result<Reference, ParseError> {
        let silent = lhs.silent;
        let name = self.parse_id("member")?;
        let kind = if self.current_is('(') {
            ReferenceKind::Method {
                lhs: Box::new(lhs),
                name,
                args: self.parse_arguments()?,
            }
        } else {
            ReferenceKind::Member {
                lhs: Box::new(lhs),
                name,
            }
        };
        Ok(Reference {
            kind,
            silent,
            location,
        })
    }

    fn parse_reference_index(
        &mut self,
        lhs: Reference,
        location: Location,
    ) -> Result<Reference, ParseError> {
        self.advance();
        let index = self.parse_primary(false)?;
        if !self.current_is(']') {
            return Err(self.error(ParseErrorKind::expected("`]`", self.current())));
        }
        self.advance();
        Ok(Reference {
            silent: lhs.silent,
            kind: ReferenceKind::Index {
                lhs: Box::new(lhs),
                index: Box::new(index),
            },
            location,
        })
    }

    /// `( primary [,] primary ... )` for method and macro calls.
    ///
    /// The cursor is on the `(`. `null` is allowed as an argument. A comma
    /// must be followed by another argument.
    pub(super) fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.next_non_space();
        let mut args = Vec::new();
        loop {
            match self.current() {
                Some(')') => {
                    self.advance();
                    return Ok(args);
                }
                None => {
                    return Err(self.error(ParseErrorKind::expected(
                        "`)` to close the argument list",
                        None,
                    )))
                }
                Some(_) => {
                    args.push(self.parse_primary(true)?);
                    if self.current_is(',') {
                        self.next_non_space();
                        if self.current_is(')') {
                            return Err(self.error(ParseErrorKind::expected(
                                "an argument after `,`",
                                Some(')'),
                            )));
                        }
                    }
                }
            }
        }
    }
}
