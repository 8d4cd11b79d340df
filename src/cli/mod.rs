//! CLI module for achdb
//!
//! One-shot commands over a JSON state file. Every invocation prints a
//! single JSON response on stdout.

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{execute, init, run, run_command, run_with_state, Outcome};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
