#![forbid(unsafe_code)]

//! Human-readable failure output
//!
//! One line per failure, `path:line:col: message [rule-id]`, with the
//! position colored when the stream supports it.

use crate::engine::RunOutcome;
use std::io::{self};
use termcolor::{Color, ColorSpec, WriteColor};

/// Formats failures for terminals
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Writes every failure, then a one-line summary
    pub fn write(&self, out: &mut dyn WriteColor, outcome: &RunOutcome) -> io::Result<()> {
        let mut position_spec = ColorSpec::new();
        position_spec.set_bold(true);

        let mut rule_spec = ColorSpec::new();
        rule_spec.set_fg(Some(Color::Cyan));

        for failure in &outcome.failures {
            out.set_color(&position_spec)?;
            write!(out, "{}", failure.position)?;
            out.reset()?;
            write!(out, ": {} ", failure.message)?;
            out.set_color(&rule_spec)?;
            writeln!(out, "[{}]", failure.rule_id)?;
            out.reset()?;
        }

        if outcome.failures.is_empty() {
            writeln!(out, "No documentation problems found.")?;
        } else {
            writeln!(out)?;
            writeln!(
                out,
                "Found {} documentation problem(s).",
                outcome.failures.len()
            )?;
        }
        Ok(())
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}
