//! Entry point: parses argv, dispatches to the driver, and maps the result to an exit code.

mod args;
mod driver;

use std::process::ExitCode;

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let parsed = match args::parse(argv) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if parsed.help {
        print!("{}", args::HELP_TEXT);
        return ExitCode::SUCCESS;
    }

    match driver::run(&parsed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
