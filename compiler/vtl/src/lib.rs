//! VTL - a parser and renderer for Velocity-style templates.
//!
//! ```text
//! text ──parse──▶ Template ──evaluate(variables)──▶ String
//! ```
//!
//! [`parse`] reads the whole template up front and fails on the first
//! grammar error. [`Template::evaluate`] renders the tree against a fresh
//! [`EvaluationContext`] each time, so a template can be rendered many times
//! with different variables.
//!
//! The pipeline stages live in their own crates and are re-exported here:
//! `vtl_ir` (tree), `vtl_parse` (parser) and `vtl_eval` (renderer).

pub mod variables;

use std::sync::Once;

use rustc_hash::FxHashMap;

pub use vtl_eval::{EvalError, EvalErrorKind, EvaluationContext, Value};
pub use vtl_ir::{MacroDefinition, Node, NodeKind};
pub use vtl_parse::{ParseError, ParseErrorKind};

/// A parsed template.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    root: Node,
    macros: FxHashMap<String, MacroDefinition>,
    resource_name: String,
}

impl Template {
    /// The top-level sequence.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Macros defined by the template. Always empty: `#macro` is rejected
    /// by the parser.
    pub fn macros(&self) -> &FxHashMap<String, MacroDefinition> {
        &self.macros
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        match &self.root.kind {
            NodeKind::Sequence(children) => children.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render with the given variables.
    ///
    /// Each call starts from a fresh context, so `#set` in one render is not
    /// visible in the next.
    pub fn evaluate<K, V>(
        &self,
        variables: impl IntoIterator<Item = (K, V)>,
    ) -> Result<String, EvalError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        vtl_eval::render(&self.root, EvaluationContext::with_variables(variables))
    }
}

/// Parse `text`, naming it `resource_name` in diagnostics.
pub fn parse(text: &str, resource_name: &str) -> Result<Template, ParseError> {
    let output = vtl_parse::parse(text, resource_name)?;
    Ok(Template {
        root: output.root,
        macros: output.macros,
        resource_name: resource_name.to_owned(),
    })
}

/// Either stage's failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Parse and render in one step.
pub fn render<K, V>(
    text: &str,
    resource_name: &str,
    variables: impl IntoIterator<Item = (K, V)>,
) -> Result<String, Error>
where
    K: Into<String>,
    V: Into<Value>,
{
    let template = parse(text, resource_name)?;
    Ok(template.evaluate(variables)?)
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and nothing after the first call.
/// Libraries never call this; the binary does.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
