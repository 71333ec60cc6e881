//! Command-line interface for marklines.

use clap::{Parser, Subcommand};
use marklines::{DiagonalRule, SeatKind};
use std::path::PathBuf;

/// Marklines - N-in-a-row on 3×3, 5×5 and 9×9 grids
#[derive(Parser, Debug)]
#[command(name = "marklines")]
#[command(about = "Line-marking games for two or three players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play rounds in the terminal
    Play {
        /// Settings file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Grid edge length: 3, 5 or 9
        #[arg(short, long)]
        grid: Option<usize>,

        /// Seat kind, once per seat in turn order (human or computer)
        #[arg(long = "seat")]
        seats: Vec<SeatKind>,

        /// Diagonal rule: classic or complete
        #[arg(long)]
        diagonals: Option<DiagonalRule>,

        /// Stop after this many rounds instead of asking
        #[arg(long)]
        rounds: Option<u32>,
    },

    /// Run rounds between computer seats and print the score table
    Simulate {
        /// Grid edge length: 3, 5 or 9
        #[arg(short, long, default_value_t = 3)]
        grid: usize,

        /// Number of computer seats: 2 or 3
        #[arg(short, long, default_value_t = 2)]
        players: usize,

        /// Rounds to play
        #[arg(short, long, default_value_t = 100)]
        rounds: u32,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Diagonal rule: classic or complete
        #[arg(long, default_value = "classic")]
        diagonals: DiagonalRule,
    },

    /// Print the winnable lines of a configuration as JSON
    Topology {
        /// Grid edge length: 3, 5 or 9
        #[arg(short, long, default_value_t = 3)]
        grid: usize,

        /// Number of players: 2 or 3
        #[arg(short, long, default_value_t = 2)]
        players: usize,

        /// Diagonal rule: classic or complete
        #[arg(long, default_value = "classic")]
        diagonals: DiagonalRule,
    },
}
