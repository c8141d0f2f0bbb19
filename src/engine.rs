//! Rule execution and file discovery

pub mod file_walker;
pub mod runner;

pub use file_walker::{discover_proto_files, FileWalkerError};
pub use runner::{RuleRunError, RunOutcome, Runner};
