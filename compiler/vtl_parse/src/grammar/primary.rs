//! Primaries: references and literals.

use vtl_ir::{Expr, ExprKind, Literal, Location};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// A reference, integer, `true`/`false`, `null` (when `null_allowed`),
    /// or a list or range literal. Surrounding space is skipped.
    pub(crate) fn parse_primary(&mut self, null_allowed: bool) -> Result<Expr, ParseError> {
        self.skip_space();
        let location = self.location();
        let expr = match self.current() {
            Some('$') => {
                self.advance();
                Expr::from(self.parse_required_reference()?)
            }
            Some('"' | '\'') => {
                return Err(self.error(ParseErrorKind::Unsupported {
                    feature: "string literals",
                }))
            }
            // No unary minus: `-` always starts a negative integer.
            Some('-') => {
                self.advance();
                self.parse_int_literal("-", location)?
            }
            Some('[') => self.parse_list_literal(location)?,
            Some(c) if c.is_ascii_digit() => self.parse_int_literal("", location)?,
            Some(c) if c.is_ascii_alphabetic() => {
                self.parse_keyword_literal(null_allowed, location)?
            }
            found => {
                return Err(self.error(ParseErrorKind::expected(
                    "a reference or a literal",
                    found,
                )))
            }
        };
        self.skip_space();
        Ok(expr)
    }

    fn parse_int_literal(&mut self, prefix: &str, location: Location) -> Result<Expr, ParseError> {
        let mut text = prefix.to_owned();
        while let Some(c) = self.current().filter(char::is_ascii_digit) {
            text.push(c);
            self.advance();
        }
        match text.parse::<i64>() {
            Ok(value) => Ok(Expr::literal(Literal::Int(value), location)),
            Err(_) => Err(ParseError::at(
                &location,
                ParseErrorKind::InvalidInteger { text },
            )),
        }
    }

    fn parse_keyword_literal(
        &mut self,
        null_allowed: bool,
        location: Location,
    ) -> Result<Expr, ParseError> {
        let name = self.parse_id("identifier without $")?;
        let literal = match name.as_str() {
            "true" => Literal::Bool(true),
            "false" => Literal::Bool(false),
            "null" if null_allowed => Literal::Null,
            _ => {
                let allowed = if null_allowed {
                    "true, false or null"
                } else {
                    "true or false"
                };
                return Err(ParseError::at(
                    &location,
                    ParseErrorKind::BareIdentifier { name, allowed },
                ));
            }
        };
        Ok(Expr::literal(literal, location))
    }

    /// `[]`, `[a, b, ...]` or `[a..b]`. The cursor is on the `[`.
    fn parse_list_literal(&mut self, location: Location) -> Result<Expr, ParseError> {
        self.next_non_space();
        if self.current_is(']') {
            self.advance();
            return Ok(Expr::new(ExprKind::List(Vec::new()), location));
        }

        let first = self.parse_primary(false)?;
        if self.current_is('.') {
            return self.parse_range_literal(first, location);
        }

        let mut items = vec![first];
        while self.current_is(',') {
            self.advance();
            items.push(self.parse_primary(false)?);
        }
        if !self.current_is(']') {
            return Err(self.error(ParseErrorKind::expected(
                "`]` at end of list literal",
                self.current(),
            )));
        }
        self.advance();
        Ok(Expr::new(ExprKind::List(items), location))
    }

    fn parse_range_literal(&mut self, first: Expr, location: Location) -> Result<Expr, ParseError> {
        self.advance();
        if !self.current_is('.') {
            return Err(self.error(ParseErrorKind::expected(
                "two dots (..) in range literal",
                self.current(),
            )));
        }
        self.next_non_space();
        let last = self.parse_primary(false)?;
        if !self.current_is(']') {
            return Err(self.error(ParseErrorKind::expected(
                "`]` at end of range literal",
                self.current(),
            )));
        }
        self.advance();
        Ok(Expr::new(
            ExprKind::Range {
                first: Box::new(first),
                last: Box::new(last),
            },
            location,
        ))
    }
}
