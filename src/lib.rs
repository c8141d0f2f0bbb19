#![forbid(unsafe_code)]

//! Protodoc: documentation linting for Protocol Buffers schemas
//!
//! Protodoc parses `.proto` files into a schema tree and runs a set of
//! pluggable documentation rules over it, reporting every declaration whose
//! comment does not open with a complete sentence.

pub mod ast;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod parser;
pub mod rules;
pub mod text;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, ParseError, ProtodocError, RuleError};

// Re-export core domain types for convenient access
pub use types::{GlobPattern, Position, RuleId};
