#![forbid(unsafe_code)]

//! Discovery of `.proto` files with gitignore support
//!
//! Walks the lint base directory with the `ignore` crate (so `.gitignore`
//! rules apply), keeps `.proto` files, and filters out anything matching the
//! configured exclude globs. Paths are returned relative to the base
//! directory, sorted, so downstream output is reproducible.

use crate::types::GlobPattern;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file discovery
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Discovers `.proto` files under `dir_path`, honoring gitignore rules and
/// the configured exclude globs
///
/// Returned paths are relative to `dir_path` and sorted.
pub fn discover_proto_files(
    dir_path: &Path,
    excludes: &[GlobPattern],
) -> Result<Vec<PathBuf>, FileWalkerError> {
    let exclude_set = build_globset(excludes)?;

    let mut files = Vec::new();
    for entry in WalkBuilder::new(dir_path).build() {
        let entry = entry?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("proto") {
            continue;
        }

        let relative = path.strip_prefix(dir_path).unwrap_or(path).to_path_buf();
        if exclude_set.is_match(&relative) {
            continue;
        }
        files.push(relative);
    }

    files.sort();
    Ok(files)
}

fn build_globset(patterns: &[GlobPattern]) -> Result<GlobSet, FileWalkerError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern.as_str()).map_err(|source| FileWalkerError::InvalidGlob {
            pattern: pattern.as_str().to_string(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| FileWalkerError::InvalidGlob {
        pattern: String::new(),
        source,
    })
}
