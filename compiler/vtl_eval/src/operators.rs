//! Binary operators over values.
//!
//! `||` and `&&` short-circuit on truthiness and are handled by the
//! interpreter. Everything here sees both operands already evaluated.

use vtl_ir::Operator;

use crate::errors::{integer_overflow, not_an_integer, EvalErrorKind};
use crate::Value;

/// Equality as the template language defines it.
///
/// - `null` equals only `null`.
/// - Operands of the same variant use native equality.
/// - Operands of different variants compare their string forms, so `5`
///   equals `"5"`.
pub fn values_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        _ if std::mem::discriminant(lhs) == std::mem::discriminant(rhs) => lhs == rhs,
        _ => lhs.to_string() == rhs.to_string(),
    }
}

/// Apply a non-short-circuit binary operator.
///
/// `||`, `&&` and the stop marker are rejected: they have no meaning once
/// both operands are evaluated.
pub fn evaluate_binary(op: Operator, lhs: &Value, rhs: &Value) -> Result<Value, EvalErrorKind> {
    match op {
        Operator::Equal => Ok(Value::Bool(values_equal(lhs, rhs))),
        Operator::NotEqual => Ok(Value::Bool(!values_equal(lhs, rhs))),
        Operator::Plus => int_binary(op, lhs, rhs, |a, b| {
            checked_arith(a.checked_add(b), "addition")
        }),
        Operator::Minus => int_binary(op, lhs, rhs, |a, b| {
            checked_arith(a.checked_sub(b), "subtraction")
        }),
        Operator::Times => int_binary(op, lhs, rhs, |a, b| {
            checked_arith(a.checked_mul(b), "multiplication")
        }),
        Operator::Divide => int_binary(op, lhs, rhs, |a, b| {
            if b == 0 {
                Err(EvalErrorKind::DivisionByZero)
            } else {
                checked_arith(a.checked_div(b), "division")
            }
        }),
        Operator::Remainder => int_binary(op, lhs, rhs, |a, b| {
            if b == 0 {
                Err(EvalErrorKind::RemainderByZero)
            } else {
                checked_arith(a.checked_rem(b), "remainder")
            }
        }),
        Operator::Less => int_binary(op, lhs, rhs, |a, b| Ok(Value::Bool(a < b))),
        Operator::LessOrEqual => int_binary(op, lhs, rhs, |a, b| Ok(Value::Bool(a <= b))),
        Operator::Greater => int_binary(op, lhs, rhs, |a, b| Ok(Value::Bool(a > b))),
        Operator::GreaterOrEqual => int_binary(op, lhs, rhs, |a, b| Ok(Value::Bool(a >= b))),
        Operator::Stop | Operator::Or | Operator::And => Err(EvalErrorKind::Unsupported {
            feature: format!("operator `{op}` on evaluated operands"),
        }),
    }
}

/// Unwrap both operands as integers, then apply `apply`.
fn int_binary(
    op: Operator,
    lhs: &Value,
    rhs: &Value,
    apply: impl FnOnce(i64, i64) -> Result<Value, EvalErrorKind>,
) -> Result<Value, EvalErrorKind> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => apply(*a, *b),
        (Value::Int(_), other) | (other, _) => Err(not_an_integer(
            format!("operator `{op}`"),
            other.type_name(),
        )),
    }
}

#[inline]
fn checked_arith(result: Option<i64>, operation: &'static str) -> Result<Value, EvalErrorKind> {
    result.map(Value::Int).ok_or_else(|| integer_overflow(operation))
}
