#![forbid(unsafe_code)]

//! Core Rule trait, lint failures and the failure sink

use crate::ast::FileNode;
use crate::error::RuleError;
use crate::types::{Position, RuleId};
use std::path::Path;

/// A single documentation violation detected by a rule
///
/// Failures are expected, data-driven findings; they are collected, never
/// returned as errors, and a single tree may yield any number of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// ID of the rule that detected this failure
    pub rule_id: RuleId,

    /// Source location of the offending declaration
    pub position: Position,

    /// Human-readable message describing the failure
    pub message: String,
}

impl Failure {
    pub fn new(rule_id: RuleId, position: Position, message: impl Into<String>) -> Self {
        Failure {
            rule_id,
            position,
            message: message.into(),
        }
    }
}

/// Sink that rules report failures into
///
/// Passing the sink explicitly keeps ownership and concurrency boundaries
/// visible: a rule can only report through the handle it was given, and the
/// runner decides how collectors are shared or merged.
pub trait FailureSink {
    fn report(&mut self, failure: Failure);
}

/// The default sink: accumulates failures in memory
#[derive(Debug, Default)]
pub struct FailureCollector {
    failures: Vec<Failure>,
}

impl FailureCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the collector, returning the failures in report order
    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl FailureSink for FailureCollector {
    fn report(&mut self, failure: Failure) {
        self.failures.push(failure);
    }
}

/// Trait that all lint rules implement
///
/// A rule owns its traversal configuration (which node variants it inspects)
/// and reports findings through the provided sink. Rules never mutate the
/// input trees, so the same forest can be checked by many rules at once; the
/// trait is `Send + Sync` to allow parallel execution.
pub trait Rule: Send + Sync {
    /// Returns the unique identifier for this rule
    fn id(&self) -> &RuleId;

    /// Returns a one-sentence description of what this rule checks
    fn description(&self) -> &str;

    /// Runs the rule over every provided file tree
    ///
    /// Lint findings go into `sink`. A returned [`RuleError`] is a structural
    /// fault (the input tree violated the shape contract) and aborts only
    /// this rule's run; it is never folded into the failure list.
    fn check(
        &self,
        sink: &mut dyn FailureSink,
        dir_path: &Path,
        files: &[FileNode],
    ) -> Result<(), RuleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: u32) -> Position {
        Position::new("test.proto", line, 1)
    }

    #[test]
    fn test_failure_construction() {
        let rule_id = RuleId::new("test-rule").unwrap();
        let failure = Failure::new(rule_id.clone(), pos(10), "Something is undocumented.");

        assert_eq!(failure.rule_id, rule_id);
        assert_eq!(failure.position.line, 10);
        assert_eq!(failure.message, "Something is undocumented.");
    }

    #[test]
    fn test_collector_preserves_report_order() {
        let rule_id = RuleId::new("test-rule").unwrap();
        let mut collector = FailureCollector::new();
        assert!(collector.is_empty());

        collector.report(Failure::new(rule_id.clone(), pos(5), "second"));
        collector.report(Failure::new(rule_id.clone(), pos(2), "first"));

        assert_eq!(collector.len(), 2);
        let failures = collector.into_failures();
        // Report order, not position order; sorting is the runner's job.
        assert_eq!(failures[0].message, "second");
        assert_eq!(failures[1].message, "first");
    }

    #[test]
    fn test_rule_is_send_sync() {
        fn assert_send<T: Send + ?Sized>() {}
        fn assert_sync<T: Sync + ?Sized>() {}

        assert_send::<Box<dyn Rule>>();
        assert_sync::<Box<dyn Rule>>();
    }
}
