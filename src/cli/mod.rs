//! Command-line interface
//!
//! - translate: one phrase to a JSON report
//! - explain: human-readable translation
//! - batch: one phrase per stdin line
//! - serve: HTTP endpoint

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{batch, explain, run, run_command, serve, translate, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_lines, write_error, write_json};
