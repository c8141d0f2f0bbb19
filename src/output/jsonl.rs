#![forbid(unsafe_code)]

//! JSON Lines failure output
//!
//! One JSON object per failure, suitable for piping into other tools.

use crate::engine::RunOutcome;
use crate::rules::Failure;
use serde::Serialize;
use std::io::{self, Write};

/// Serialized shape of one failure
#[derive(Debug, Serialize)]
pub struct FailureRecord<'a> {
    pub rule_id: &'a str,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: &'a str,
}

impl<'a> From<&'a Failure> for FailureRecord<'a> {
    fn from(failure: &'a Failure) -> Self {
        FailureRecord {
            rule_id: failure.rule_id.as_str(),
            file: failure.position.path.display().to_string(),
            line: failure.position.line,
            column: failure.position.column,
            message: &failure.message,
        }
    }
}

/// Formats failures as JSON Lines
pub struct JsonlFormatter;

impl JsonlFormatter {
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Writes one JSON object per line for each failure
    pub fn write(&self, out: &mut dyn Write, outcome: &RunOutcome) -> io::Result<()> {
        for failure in &outcome.failures {
            let record = FailureRecord::from(failure);
            let json = serde_json::to_string(&record)?;
            writeln!(out, "{json}")?;
        }
        Ok(())
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}
