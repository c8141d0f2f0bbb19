//! Protodoc CLI entry point

use clap::Parser;
use protodoc::cli::{args::Cli, Command};
use std::process;

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Lint { dir_path, format } => {
            protodoc::cli::lint::run_lint(&dir_path, format, cli.color)
        }
        Command::List { format } => protodoc::cli::list::run_list(format),
        Command::Init { force } => match protodoc::cli::init::run_init(force) {
            Ok(()) => {
                println!("Created protodoc.toml.");
                0
            }
            Err(e) => {
                eprintln!("Error: {e}");
                2
            }
        },
    };

    process::exit(exit_code);
}
