//! Lint command implementation
//!
//! This module implements the `protodoc lint` command, which:
//! - Loads configuration from protodoc.toml (defaults when absent)
//! - Discovers `.proto` files under the given directory
//! - Parses each file into a schema tree
//! - Runs all enabled rules over the forest
//! - Formats output (human or JSONL)
//! - Returns an appropriate exit code

use crate::ast::FileNode;
use crate::cli::args::OutputFormat;
use crate::cli::common::{EXIT_CONFIG_ERROR, EXIT_ERROR, EXIT_FAILURES, EXIT_SUCCESS};
use crate::config::Config;
use crate::engine::{RunOutcome, Runner};
use crate::error::{ConfigError, ParseError};
use crate::output::{HumanFormatter, JsonlFormatter};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type specific to the lint command
#[derive(Debug, thiserror::Error)]
pub(crate) enum LintError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File walker error: {0}")]
    FileWalker(#[from] crate::engine::FileWalkerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the lint command, returning the process exit code
pub fn run_lint(dir_path: &str, format: OutputFormat, color: crate::cli::ColorChoice) -> i32 {
    match run_lint_inner(dir_path, format, color) {
        Ok(outcome) => {
            if !outcome.run.errors.is_empty() || outcome.had_parse_errors {
                EXIT_ERROR
            } else if outcome.run.failures.is_empty() {
                EXIT_SUCCESS
            } else {
                EXIT_FAILURES
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            match e {
                LintError::Config(ConfigError::Parse(_)) => EXIT_CONFIG_ERROR,
                _ => EXIT_ERROR,
            }
        }
    }
}

/// What one lint invocation produced, for exit-code purposes
struct LintOutcome {
    run: RunOutcome,
    had_parse_errors: bool,
}

fn run_lint_inner(
    dir_path: &str,
    format: OutputFormat,
    color: crate::cli::ColorChoice,
) -> Result<LintOutcome, LintError> {
    let dir_path = Path::new(dir_path);
    let config = Config::load_or_default(dir_path)?;

    let registry = super::common::build_registry(&config);
    if registry.is_empty() {
        eprintln!("Warning: No rules are enabled. Nothing to check.");
        return Ok(LintOutcome {
            run: RunOutcome::default(),
            had_parse_errors: false,
        });
    }

    let paths = crate::engine::discover_proto_files(dir_path, &config.lint.excludes)?;
    let (files, parse_errors) = parse_forest(dir_path, &paths);

    // Parse errors are structural: surface them on stderr, keep linting the
    // files that did parse.
    for error in &parse_errors {
        eprintln!("Error: {error}");
    }

    let runner = Runner::new(registry);
    let run = runner.run(dir_path, &files);

    for error in &run.errors {
        eprintln!("Error: rule {}: {}", error.rule_id, error.source);
    }

    match format {
        OutputFormat::Human => {
            let mut out = super::common::stdout_stream(color);
            HumanFormatter::new().write(&mut out, &run)?;
        }
        OutputFormat::Jsonl => {
            let stdout = std::io::stdout();
            JsonlFormatter::new().write(&mut stdout.lock(), &run)?;
        }
    }

    Ok(LintOutcome {
        run,
        had_parse_errors: !parse_errors.is_empty(),
    })
}

/// Reads and parses every discovered file, in parallel
///
/// Returns the trees that parsed plus the errors for those that did not,
/// both in path order.
fn parse_forest(dir_path: &Path, paths: &[PathBuf]) -> (Vec<FileNode>, Vec<ParseError>) {
    let results: Vec<Result<FileNode, ParseError>> = paths
        .par_iter()
        .map(|relative| {
            let full = dir_path.join(relative);
            let source = fs::read_to_string(&full).map_err(|e| ParseError {
                file: relative.clone(),
                line: 0,
                column: 0,
                message: format!("failed to read file: {e}"),
            })?;
            crate::parser::parse_file(relative, &source)
        })
        .collect();

    let mut files = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(file) => files.push(file),
            Err(error) => errors.push(error),
        }
    }
    (files, errors)
}
