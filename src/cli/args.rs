//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for protodoc commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// Protodoc CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "protodoc")]
#[command(about = "Documentation linter for Protocol Buffers schemas")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,
}

/// Available protodoc subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lint schema files for documentation problems
    Lint {
        /// Directory to lint (defaults to current directory)
        #[arg(default_value = ".")]
        dir_path: String,

        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,
    },

    /// List all enabled rules
    List {
        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,
    },

    /// Write a default protodoc.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
