#![forbid(unsafe_code)]

//! Rule registry
//!
//! The registry is an explicit value constructed by the caller and passed to
//! the runner; there is no process-wide rule list. Rules are keyed by their
//! unique ID, and iteration order is the ID order so that runs are
//! reproducible.

use crate::config::RulesConfig;
use crate::error::RuleError;
use crate::rules::builtin::builtin_rules;
use crate::rules::rule::Rule;
use crate::types::RuleId;
use std::collections::BTreeMap;

/// Registry for storing and managing all active rules
pub struct RuleRegistry {
    rules: BTreeMap<RuleId, Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new empty RuleRegistry
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Create a registry preloaded with every built-in rule
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::new();
        for rule in builtin_rules() {
            // Builtin IDs are distinct by construction.
            let _ = registry.register(rule);
        }
        registry
    }

    /// Register a rule
    ///
    /// # Errors
    ///
    /// Returns `RuleError::DuplicateId` if a rule with the same ID is
    /// already registered.
    pub fn register(&mut self, rule: Box<dyn Rule>) -> Result<(), RuleError> {
        let id = rule.id().clone();
        if self.rules.contains_key(&id) {
            return Err(RuleError::DuplicateId(id.as_str().to_string()));
        }
        self.rules.insert(id, rule);
        Ok(())
    }

    /// Filter rules based on configuration
    ///
    /// Removes rules that are disabled in the configuration. Rules are
    /// enabled by default unless explicitly disabled.
    pub fn filter_by_config(&mut self, config: &RulesConfig) {
        let to_remove: Vec<RuleId> = self
            .rules
            .keys()
            .filter(|id| !config.is_enabled(id))
            .cloned()
            .collect();

        for rule_id in to_remove {
            self.rules.remove(&rule_id);
        }
    }

    /// Get a rule by its ID
    ///
    /// Returns `None` if the rule is not found in the registry.
    pub fn get_rule(&self, id: &RuleId) -> Option<&dyn Rule> {
        self.rules.get(id).map(|boxed| boxed.as_ref())
    }

    /// Iterate over all rules, in rule ID order
    pub fn iter_rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.values().map(|boxed| boxed.as_ref())
    }

    /// Get the number of rules in the registry
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
