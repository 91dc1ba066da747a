//! CLI argument definitions using clap
//!
//! Commands:
//! - piecebox init --config <path>
//! - piecebox start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// piecebox - a headless REST server for content pieces
#[derive(Parser, Debug)]
#[command(name = "piecebox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./piecebox.json")]
        config: PathBuf,
    },

    /// Start the server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./piecebox.json")]
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
