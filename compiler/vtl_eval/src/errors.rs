//! Evaluation errors.
//!
//! Helpers that only know about values (operators, built-in methods) return a
//! bare [`EvalErrorKind`]. The interpreter attaches the location of the node
//! being evaluated when it propagates them.

use std::fmt;

use vtl_ir::Location;

/// Result of evaluating an expression.
pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

/// An evaluation failure, located when the failing node is known.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}{kind}", location_prefix(.location))]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub location: Option<Location>,
}

fn location_prefix(location: &Option<Location>) -> String {
    location
        .as_ref()
        .map(|location| format!("{location}: "))
        .unwrap_or_default()
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, location: &Location) -> Self {
        EvalError {
            kind,
            location: Some(location.clone()),
        }
    }
}

/// Typed evaluation error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // References
    UndefinedReference { name: String },
    /// A value rendered to absence in a non-silent position.
    NullValue { reference: String },

    // Iteration
    NotIterable { type_name: &'static str },
    RangeTooLarge { len: u128, max: usize },

    // Arithmetic
    NotAnInteger { context: String, type_name: &'static str },
    DivisionByZero,
    RemainderByZero,
    IntegerOverflow { operation: &'static str },

    // Access
    NoSuchMember { member: String, type_name: &'static str },
    NotIndexable { type_name: &'static str },
    IndexOutOfBounds { index: i64, len: usize },
    NoSuchMethod { method: String, type_name: &'static str },
    WrongArgCount { method: &'static str, expected: usize, got: usize },

    Unsupported { feature: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedReference { name } => write!(f, "undefined reference ${name}"),
            Self::NullValue { reference } => write!(f, "null value for {reference}"),
            Self::NotIterable { type_name } => {
                write!(f, "#foreach needs a list or map, found {type_name}")
            }
            Self::RangeTooLarge { len, max } => {
                write!(f, "range of {len} elements exceeds the limit of {max}")
            }
            Self::NotAnInteger { context, type_name } => {
                write!(f, "{context} requires integers, found {type_name}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::RemainderByZero => write!(f, "remainder by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),
            Self::NoSuchMember { member, type_name } => {
                write!(f, "cannot get member {member} of {type_name}")
            }
            Self::NotIndexable { type_name } => write!(f, "cannot index {type_name}"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for list of length {len}")
            }
            Self::NoSuchMethod { method, type_name } => {
                write!(f, "no method {method}() on {type_name}")
            }
            Self::WrongArgCount {
                method,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{method}() expects {expected} {arg_word}, got {got}")
            }
            Self::Unsupported { feature } => write!(f, "{feature} is not supported"),
        }
    }
}

// Constructors

pub fn undefined_reference(name: &str) -> EvalErrorKind {
    EvalErrorKind::UndefinedReference {
        name: name.to_owned(),
    }
}

pub fn not_an_integer(context: impl Into<String>, type_name: &'static str) -> EvalErrorKind {
    EvalErrorKind::NotAnInteger {
        context: context.into(),
        type_name,
    }
}

pub fn integer_overflow(operation: &'static str) -> EvalErrorKind {
    EvalErrorKind::IntegerOverflow { operation }
}

pub fn no_such_member(member: &str, type_name: &'static str) -> EvalErrorKind {
    EvalErrorKind::NoSuchMember {
        member: member.to_owned(),
        type_name,
    }
}

pub fn no_such_method(method: &str, type_name: &'static str) -> EvalErrorKind {
    EvalErrorKind::NoSuchMethod {
        method: method.to_owned(),
        type_name,
    }
}
