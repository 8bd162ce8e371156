//! The `render` command: evaluate a template with variables and print it.

use std::collections::BTreeMap;
use std::io::Write;

use tracing::debug;
use vtl::variables::{from_json, parse_assignment};
use vtl::Value;

use super::{read_file, CommandError};

/// Parsed `render` arguments.
#[derive(Debug, Default, PartialEq)]
pub struct RenderOptions {
    pub template: String,
    pub vars_file: Option<String>,
    /// `--var` bindings in command-line order; later ones win.
    pub assignments: Vec<String>,
}

impl RenderOptions {
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut options = RenderOptions::default();
        let mut template = None;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--vars" => {
                    let file = iter.next().ok_or("--vars needs a file")?;
                    options.vars_file = Some(file.clone());
                }
                "--var" => {
                    let assignment = iter.next().ok_or("--var needs name=value")?;
                    options.assignments.push(assignment.clone());
                }
                flag if flag.starts_with("--") => return Err(format!("unknown option `{flag}`")),
                path if template.is_none() => template = Some(path.to_owned()),
                extra => return Err(format!("unexpected argument `{extra}`")),
            }
        }
        options.template = template.ok_or("render needs a template path")?;
        Ok(options)
    }
}

pub fn render_file(options: &RenderOptions) -> Result<(), CommandError> {
    let text = read_file(&options.template)?;

    let mut variables: BTreeMap<String, Value> = BTreeMap::new();
    if let Some(path) = &options.vars_file {
        let json = read_file(path)?;
        variables = from_json(&json).map_err(|source| CommandError::Variables {
            path: path.clone(),
            source,
        })?;
    }
    for assignment in &options.assignments {
        let (name, value) =
            parse_assignment(assignment).map_err(|source| CommandError::Variables {
                path: "--var".to_owned(),
                source,
            })?;
        variables.insert(name, value);
    }
    debug!(variables = variables.len(), template = %options.template, "rendering");

    let output = vtl::render(&text, &options.template, variables)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(CommandError::Write)
}
