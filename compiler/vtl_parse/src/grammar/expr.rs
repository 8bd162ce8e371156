//! Expressions: precedence climbing over the operator table.
//!
//! ```text
//! expression -> unary (operator unary)*
//! unary      -> primary | ( expression ) | ! unary
//! ```
//!
//! Arbitrary expressions only appear inside directives. References take
//! primaries as indexes and arguments, never full expressions.

use vtl_ir::{Expr, ExprKind, Operator};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_unary()?;
        let mut current = self.next_operator()?;
        self.climb(&mut current, lhs, 1)
    }

    /// Fold operators of precedence `min` or higher onto `lhs`.
    ///
    /// `current` is the operator already scanned after the last operand;
    /// [`Operator::Stop`] (precedence 0) ends every climb.
    fn climb(&mut self, current: &mut Operator, mut lhs: Expr, min: u8) -> Result<Expr, ParseError> {
        while current.precedence() >= min {
            let op = *current;
            let mut rhs = self.parse_unary()?;
            *current = self.next_operator()?;
            while current.precedence() > op.precedence() {
                let tighter = current.precedence();
                rhs = self.climb(current, rhs, tighter)?;
            }
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Scan the next operator, or return [`Operator::Stop`] when no operator
    /// starts at the cursor.
    fn next_operator(&mut self) -> Result<Operator, ParseError> {
        self.skip_space();
        let Some(first) = self.current() else {
            return Ok(Operator::Stop);
        };
        let mut candidates = Operator::starting_with(first).peekable();
        if candidates.peek().is_none() {
            return Ok(Operator::Stop);
        }
        self.advance();

        // A two-character match overrides the one-character operator that
        // is its prefix, which comes first in the table.
        let mut found = None;
        for op in candidates {
            if op.symbol_len() == 1 {
                found = Some(op);
            } else if op.second_char() == self.current() {
                self.advance();
                found = Some(op);
            }
        }
        found.ok_or_else(|| self.error(ParseErrorKind::UnknownOperator { found: first }))
    }

    pub(crate) fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        self.skip_space();
        match self.current() {
            Some('(') => {
                self.next_non_space();
                let inner = self.parse_expression()?;
                self.expect(')')?;
                self.skip_space();
                Ok(inner)
            }
            Some('!') => {
                let location = self.location();
                self.advance();
                let operand = self.parse_unary()?;
                self.skip_space();
                Ok(Expr::new(ExprKind::Not(Box::new(operand)), location))
            }
            _ => self.parse_primary(false),
        }
    }
}
