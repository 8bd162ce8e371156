//! Parse error types.
//!
//! Parsing stops at the first error. There is no recovery and no partial
//! tree, so a single error value is all a caller ever sees.

use vtl_ir::{Location, StopKind};

/// A parse failure with the resource and line where it happened.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{resource}:{line}: {kind}")]
pub struct ParseError {
    pub resource: String,
    pub line: u32,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn at(location: &Location, kind: ParseErrorKind) -> Self {
        ParseError {
            resource: location.resource().to_owned(),
            line: location.line(),
            kind,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },

    #[error("unterminated #[[ - did not see matching ]]#")]
    UnterminatedQuotedBlock,

    /// A `#end`, `#else`, `#elseif` or end of file where the enclosing
    /// construct does not accept it.
    #[error("found {stop} {context}")]
    UnexpectedStop { stop: StopKind, context: String },

    #[error("{what} should start with an ASCII letter, found {found}")]
    InvalidIdentifier { what: &'static str, found: String },

    #[error("invalid integer literal `{text}`")]
    InvalidInteger { text: String },

    #[error("identifier must be preceded by $ or be {allowed}: {name}")]
    BareIdentifier { name: String, allowed: &'static str },

    #[error("expected an operator, found `{found}`")]
    UnknownOperator { found: char },

    #[error("{feature} is not supported")]
    Unsupported { feature: &'static str },

    #[error("#{name} is neither a standard directive nor a macro that has been defined")]
    UndefinedMacro { name: String },
}

impl ParseErrorKind {
    pub fn expected(expected: impl Into<String>, found: Option<char>) -> Self {
        ParseErrorKind::Expected {
            expected: expected.into(),
            found: describe_char(found),
        }
    }
}

/// How a lookahead character reads in a diagnostic.
pub(crate) fn describe_char(c: Option<char>) -> String {
    match c {
        Some('\n') => "newline".to_owned(),
        Some(c) => format!("`{c}`"),
        None => StopKind::Eof.describe().to_owned(),
    }
}
