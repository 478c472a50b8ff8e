//! reelquery CLI entry point
//!
//! Parses arguments, dispatches to the CLI module and exits non-zero on
//! failure. The error is written to stdout as a JSON line.

use std::io;

use reelquery::cli;

fn main() {
    if let Err(e) = cli::run() {
        let _ = cli::write_error(&mut io::stdout().lock(), &e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
