//! Command handlers for the `vtl` binary.
//!
//! Handlers return a [`CommandError`]; `main` prints it and picks the exit
//! status.

mod check;
mod render;

pub use check::check_file;
pub use render::{render_file, RenderOptions};

use vtl::variables::VariableError;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot write output: {0}")]
    Write(#[source] std::io::Error),
    #[error("{path}: {source}")]
    Variables {
        path: String,
        source: VariableError,
    },
    #[error(transparent)]
    Template(#[from] vtl::Error),
}

fn read_file(path: &str) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_owned(),
        source,
    })
}
