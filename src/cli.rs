//! Command-line interface for strictly_hanoi.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Hanoi - Tower of Hanoi with persisted sessions
#[derive(Parser, Debug)]
#[command(name = "strictly_hanoi")]
#[command(about = "Type-safe Tower of Hanoi for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it does not exist)
    #[arg(long, default_value = "strictly_hanoi.toml")]
    pub config: PathBuf,

    /// Override the session data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play,

    /// Print the stored session
    Status,

    /// Discard the stored session and start a fresh attempt
    Restart,
}
