#![forbid(unsafe_code)]

//! Parallel rule runner
//!
//! Executes every registered rule against the same forest of parsed files.
//! Rules run in parallel via rayon; each rule gets its own failure collector
//! and the per-rule results are merged afterwards, so neither the sentence
//! predicate nor the dispatcher ever needs a lock. A structural error from
//! one rule is recorded and does not stop the other rules.

use crate::ast::FileNode;
use crate::error::RuleError;
use crate::rules::{Failure, FailureCollector, RuleRegistry};
use crate::types::RuleId;
use rayon::prelude::*;
use std::path::Path;

/// A structural error produced by one rule's run
///
/// Kept apart from lint [`Failure`]s: this means the tool or rule broke on
/// the input, not that the schema has a documentation problem.
#[derive(Debug)]
pub struct RuleRunError {
    /// Rule whose check failed
    pub rule_id: RuleId,
    /// The underlying fault
    pub source: RuleError,
}

/// Result of running all rules over one forest
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Merged lint failures, sorted by (path, line, column, rule id)
    pub failures: Vec<Failure>,
    /// Structural errors, one per rule whose check aborted
    pub errors: Vec<RuleRunError>,
}

impl RunOutcome {
    /// Returns true when no rule reported a lint failure and none errored
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.errors.is_empty()
    }
}

/// Runs a registry of rules over parsed schema trees
pub struct Runner {
    registry: RuleRegistry,
}

impl Runner {
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Number of rules this runner will execute
    pub fn rule_count(&self) -> usize {
        self.registry.len()
    }

    /// Execute every rule against the forest
    ///
    /// `dir_path` is the lint base directory, handed to rules for
    /// relative-path diagnostics only; no I/O happens here.
    pub fn run(&self, dir_path: &Path, files: &[FileNode]) -> RunOutcome {
        let per_rule: Vec<Result<Vec<Failure>, RuleRunError>> = self
            .registry
            .iter_rules()
            .collect::<Vec<_>>()
            .par_iter()
            .map(|rule| {
                let mut collector = FailureCollector::new();
                match rule.check(&mut collector, dir_path, files) {
                    Ok(()) => Ok(collector.into_failures()),
                    Err(source) => Err(RuleRunError {
                        rule_id: rule.id().clone(),
                        source,
                    }),
                }
            })
            .collect();

        let mut outcome = RunOutcome::default();
        for result in per_rule {
            match result {
                Ok(failures) => outcome.failures.extend(failures),
                Err(error) => outcome.errors.push(error),
            }
        }

        // Stable sort keeps each rule's source-order discovery as the
        // tiebreak within identical positions.
        outcome
            .failures
            .sort_by(|a, b| a.position.cmp(&b.position).then(a.rule_id.cmp(&b.rule_id)));
        outcome
    }
}
