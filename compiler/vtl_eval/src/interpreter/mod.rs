//! Tree-walking renderer.
//!
//! Nodes render into a `String` sink; expressions evaluate to a [`Value`].
//! Evaluation never touches the tree, only the [`EvaluationContext`], so a
//! parsed template can be rendered any number of times.

mod shadow;

pub use shadow::ShadowedInterpreter;

use tracing::trace;
use vtl_ir::{Expr, ExprKind, Location, Node, NodeKind, Operator, Reference, ReferenceKind};

use crate::errors::{not_an_integer, undefined_reference, EvalError, EvalErrorKind, EvalResult};
use crate::methods::{call_method, index, member};
use crate::operators::evaluate_binary;
use crate::{EvaluationContext, Value};

/// Longest list a range literal may produce.
pub const MAX_RANGE_LEN: usize = 1_000_000;

/// Renders nodes against a variable context it owns.
pub struct Interpreter {
    pub context: EvaluationContext,
}

impl Interpreter {
    pub fn new(context: EvaluationContext) -> Self {
        Interpreter { context }
    }

    /// Render `node` and everything below it into `out`.
    pub fn render(&mut self, node: &Node, out: &mut String) -> EvalResult<()> {
        if node.is_directive() {
            trace!(node = node.kind_name(), line = node.location.line(), "render");
        }
        match &node.kind {
            NodeKind::Sequence(children) => {
                for child in children {
                    self.render(child, out)?;
                }
                Ok(())
            }
            NodeKind::Text(text) => {
                out.push_str(text);
                Ok(())
            }
            NodeKind::Expr(expr) => self.render_expr(expr, out),
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.is_true(condition)? {
                    self.render(then_branch, out)
                } else {
                    self.render(else_branch, out)
                }
            }
            NodeKind::ForEach {
                variable,
                collection,
                body,
            } => self.render_foreach(variable, collection, body, out),
            NodeKind::Set { variable, value } => {
                let value = self.evaluate(value)?;
                trace!(variable = %variable, value = %value, "#set");
                self.context.set(variable.as_str(), value);
                Ok(())
            }
            NodeKind::Comment => Ok(()),
            NodeKind::MacroCall { name, .. } => Err(EvalError::new(
                EvalErrorKind::Unsupported {
                    feature: format!("macro call #{name}"),
                },
                &node.location,
            )),
        }
    }

    fn render_expr(&mut self, expr: &Expr, out: &mut String) -> EvalResult<()> {
        let value = self.evaluate(expr)?;
        if value.is_null() {
            let silent = expr.as_reference().is_some_and(|reference| reference.silent);
            if silent {
                return Ok(());
            }
            return Err(EvalError::new(
                EvalErrorKind::NullValue {
                    reference: expr.to_string(),
                },
                &expr.location,
            ));
        }
        out.push_str(&value.to_string());
        Ok(())
    }

    fn render_foreach(
        &mut self,
        variable: &str,
        collection: &Expr,
        body: &Node,
        out: &mut String,
    ) -> EvalResult<()> {
        let items = match self.evaluate(collection)? {
            Value::Null => return Ok(()),
            Value::List(items) => items,
            Value::Map(entries) => entries.into_values().collect(),
            other => {
                return Err(EvalError::new(
                    EvalErrorKind::NotIterable {
                        type_name: other.type_name(),
                    },
                    &collection.location,
                ))
            }
        };

        let len = items.len();
        for (i, item) in items.into_iter().enumerate() {
            trace!(variable, index = i, "#foreach iteration");
            let mut scoped = self.shadowed();
            scoped.bind(variable, item);
            scoped.bind("foreach", loop_metadata(i, len));
            scoped.render(body, out)?;
        }
        Ok(())
    }

    /// Evaluate an expression to a value.
    pub fn evaluate(&self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(Value::from(*literal)),
            ExprKind::Reference(reference) => self.resolve(reference),
            ExprKind::Binary { op, lhs, rhs } => match op {
                Operator::Or => Ok(Value::Bool(self.is_true(lhs)? || self.is_true(rhs)?)),
                Operator::And => Ok(Value::Bool(self.is_true(lhs)? && self.is_true(rhs)?)),
                _ => {
                    let lhs = self.evaluate(lhs)?;
                    let rhs = self.evaluate(rhs)?;
                    evaluate_binary(*op, &lhs, &rhs).map_err(|kind| at(kind, &expr.location))
                }
            },
            ExprKind::Not(operand) => Ok(Value::Bool(!self.is_true(operand)?)),
            ExprKind::List(items) => items
                .iter()
                .map(|item| self.evaluate(item))
                .collect::<EvalResult<Vec<_>>>()
                .map(Value::List),
            ExprKind::Range { first, last } => {
                let first = self.range_bound(first)?;
                let last = self.range_bound(last)?;
                let span = first.abs_diff(last);
                if !matches!(usize::try_from(span), Ok(span) if span < MAX_RANGE_LEN) {
                    return Err(at(
                        EvalErrorKind::RangeTooLarge {
                            len: u128::from(span) + 1,
                            max: MAX_RANGE_LEN,
                        },
                        &expr.location,
                    ));
                }
                let items: Vec<Value> = if first <= last {
                    (first..=last).map(Value::Int).collect()
                } else {
                    (last..=first).rev().map(Value::Int).collect()
                };
                Ok(Value::List(items))
            }
        }
    }

    fn range_bound(&self, bound: &Expr) -> EvalResult<i64> {
        let value = self.evaluate(bound)?;
        value
            .as_int()
            .ok_or_else(|| at(not_an_integer("range literal", value.type_name()), &bound.location))
    }

    /// Defined-and-true: a plain reference to an undefined variable is false
    /// here instead of an error.
    pub fn is_true(&self, expr: &Expr) -> EvalResult<bool> {
        if let Some(Reference {
            kind: ReferenceKind::Plain { name },
            ..
        }) = expr.as_reference()
        {
            return Ok(self.context.get(name).is_some_and(Value::is_true));
        }
        Ok(self.evaluate(expr)?.is_true())
    }

    /// Walk a reference chain left to right.
    ///
    /// A silent link whose left-hand side is `Null` yields `Null`.
    fn resolve(&self, reference: &Reference) -> EvalResult {
        let location = &reference.location;
        match &reference.kind {
            ReferenceKind::Plain { name } => match self.context.get(name) {
                Some(value) => Ok(value.clone()),
                None if reference.silent => Ok(Value::Null),
                None => Err(at(undefined_reference(name), location)),
            },
            ReferenceKind::Member { lhs, name } => {
                let target = self.resolve(lhs)?;
                if target.is_null() && reference.silent {
                    return Ok(Value::Null);
                }
                member(&target, name).map_err(|kind| at(kind, location))
            }
            ReferenceKind::Method { lhs, name, args } => {
                let target = self.resolve(lhs)?;
                if target.is_null() && reference.silent {
                    return Ok(Value::Null);
                }
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<EvalResult<Vec<_>>>()?;
                call_method(&target, name, &args).map_err(|kind| at(kind, location))
            }
            ReferenceKind::Index { lhs, index: idx } => {
                let target = self.resolve(lhs)?;
                if target.is_null() && reference.silent {
                    return Ok(Value::Null);
                }
                let idx = self.evaluate(idx)?;
                index(&target, &idx).map_err(|kind| at(kind, location))
            }
        }
    }
}

#[inline]
fn at(kind: EvalErrorKind, location: &Location) -> EvalError {
    EvalError::new(kind, location)
}

/// The `$foreach` binding for iteration `i` of `len`.
fn loop_metadata(i: usize, len: usize) -> Value {
    let index = i64::try_from(i).unwrap_or(i64::MAX);
    [
        ("index", Value::Int(index)),
        ("count", Value::Int(index.saturating_add(1))),
        ("hasNext", Value::Bool(i + 1 < len)),
        ("first", Value::Bool(i == 0)),
        ("last", Value::Bool(i + 1 == len)),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests;
