//! Command-line interface for strictly_gomoku.

use clap::{Parser, Subcommand};

/// Strictly Gomoku - five-in-a-row rules and matchmaking core
#[derive(Parser, Debug)]
#[command(name = "strictly_gomoku")]
#[command(about = "Five-in-a-row rule engine and matchmaking core", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the enabled variants with board size, turn timer and points
    Variants,

    /// Replay a move list and print the resulting board
    Replay {
        /// Variant to play (defaults to the configured default)
        #[arg(short, long)]
        variant: Option<String>,

        /// Space-separated moves as col,row pairs, first player first
        #[arg(short, long)]
        moves: String,

        /// Print the board as JSON instead of a grid
        #[arg(long)]
        json: bool,
    },

    /// Match two local players and play a scripted game through the orchestrator
    Demo {
        /// Variant to play (defaults to the configured default)
        #[arg(short, long)]
        variant: Option<String>,
    },
}
