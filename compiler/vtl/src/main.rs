//! VTL command-line tool.

mod commands;

use std::process::ExitCode;

use commands::{check_file, render_file, RenderOptions};

const USAGE: &str = "\
Usage: vtl <command> [options]

Commands:
  render <template> [--vars <file.json>] [--var name=value]...
                        Render a template to stdout
  check <template>      Parse a template and report its size

Set RUST_LOG (for example RUST_LOG=vtl_parse=trace) to see tracing output.";

fn main() -> ExitCode {
    vtl::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let result = match command.as_str() {
        "render" => match RenderOptions::from_args(&args[1..]) {
            Ok(options) => render_file(&options),
            Err(message) => return usage_error(&message),
        },
        "check" => match args.get(1..) {
            Some([path]) => check_file(path),
            _ => return usage_error("check takes exactly one template path"),
        },
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        other => return usage_error(&format!("unknown command `{other}`")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn usage_error(message: &str) -> ExitCode {
    eprintln!("error: {message}");
    eprintln!();
    eprintln!("{USAGE}");
    ExitCode::from(2)
}
