//! Error types for protodoc
//!
//! This module defines the error types used throughout the linter, following
//! a hierarchical structure with specific error variants for different
//! error categories.
//!
//! Engine-level errors are kept strictly separate from lint failures: a
//! [`RuleError`] means the tool or a rule broke on an input, while a
//! `Failure` (see `rules::rule`) is an expected, reportable finding.

use std::path::PathBuf;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid configuration syntax
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Schema parse errors, with a precise source location
#[derive(Debug, thiserror::Error)]
#[error("{file}:{line}:{column}: {message}")]
pub struct ParseError {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

/// Rule-related errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Two rules with the same ID were registered
    #[error("Duplicate rule ID: {0}")]
    DuplicateId(String),

    /// Rule not found
    #[error("Rule not found: {0}")]
    NotFound(String),

    /// A rule's check hit a structural fault in an input tree
    #[error("Rule {rule} failed on {file}: {message}")]
    Check {
        rule: String,
        file: PathBuf,
        message: String,
    },
}

/// Top-level error type for protodoc
#[derive(Debug, thiserror::Error)]
pub enum ProtodocError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Parse error in a schema file
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
