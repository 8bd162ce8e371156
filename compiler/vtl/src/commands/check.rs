//! The `check` command: parse a template without rendering it.

use std::time::Instant;

use super::{read_file, CommandError};

pub fn check_file(path: &str) -> Result<(), CommandError> {
    let text = read_file(path)?;
    let start = Instant::now();
    let template = vtl::parse(&text, path).map_err(vtl::Error::from)?;
    let elapsed = start.elapsed();
    println!(
        "ok ({} top-level nodes, parsed in {elapsed:?})",
        template.len()
    );
    Ok(())
}
