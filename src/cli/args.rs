//! CLI argument definitions using clap
//!
//! Commands:
//! - reelquery translate <TEXT>... [--config <path>]
//! - reelquery explain <TEXT>...
//! - reelquery batch [--config <path>]
//! - reelquery serve [--config <path>] [--port <n>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// reelquery - turn questions about a movie watch log into queries
#[derive(Parser, Debug)]
#[command(name = "reelquery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate one phrase and print the result as JSON
    Translate {
        /// The phrase; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Configuration file binding the table to a dataset path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show how a phrase would be translated
    Explain {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Translate one phrase per stdin line
    Batch {
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Start the HTTP server
    Serve {
        #[arg(long, default_value = "./reelquery.json")]
        config: PathBuf,

        /// Overrides the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
