//! CLI module for flexquery
//!
//! Provides command-line interface for:
//! - order: sort JSON records by one or more keys
//! - compare: check two JSON record files for structural equality

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{compare, compare_records, load_config, order, order_records, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_records, read_records, write_response, write_response_to};
