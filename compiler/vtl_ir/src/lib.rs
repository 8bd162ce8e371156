//! VTL IR - syntax tree types shared by the parser and the evaluator.
//!
//! # Architecture
//!
//! - [`Operator`]: the immutable binary operator table with precedence ranks
//! - [`Location`]: resource name + line, carried by every node for diagnostics
//! - [`Node`] / [`NodeKind`]: the rendered tree (text, directives, sequences)
//! - [`Expr`] / [`ExprKind`]: the expression subset (evaluates to a value)
//! - [`Reference`] / [`ReferenceKind`]: `$`-accessor chains, a subset of `Expr`
//! - [`Stop`] / [`StopKind`]: parse-time markers that end a sub-parse and never
//!   appear in the rendered tree
//!
//! The tree is immutable once built. Evaluation reads it through shared
//! references and only ever mutates the evaluation context.

mod ast;
mod location;
mod operator;

pub use ast::{
    Expr, ExprKind, Literal, MacroDefinition, Node, NodeKind, Reference, ReferenceKind, Stop,
    StopKind,
};
pub use location::Location;
pub use operator::Operator;
