//! Tree-walking evaluator for VTL templates.
//!
//! # Architecture
//!
//! - [`Value`]: the closed runtime value model
//! - [`EvaluationContext`]: variable bindings with scoped shadowing for loops
//! - [`Interpreter`]: renders nodes and evaluates expressions
//! - `operators` / `methods`: value-level semantics with no knowledge of the tree
//!
//! Evaluation is all-or-nothing: the first error aborts the render and no
//! partial output is returned.

mod context;
pub mod errors;
mod interpreter;
pub mod methods;
pub mod operators;
mod value;

pub use context::EvaluationContext;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, ShadowedInterpreter, MAX_RANGE_LEN};
pub use value::Value;

use tracing::debug;
use vtl_ir::Node;

/// Render `root` against `context`.
#[tracing::instrument(level = "debug", skip_all, fields(resource = root.location.resource()))]
pub fn render(root: &Node, context: EvaluationContext) -> EvalResult<String> {
    debug!(variables = context.len(), "render started");
    let mut interpreter = Interpreter::new(context);
    let mut out = String::new();
    interpreter.render(root, &mut out)?;
    debug!(bytes = out.len(), "render finished");
    Ok(out)
}
