//! `flexquery` binary
//!
//! All work happens in `cli::run`; failures print `CODE: message` on
//! stderr and exit with status 1.

use std::process::ExitCode;

use flexquery::cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
