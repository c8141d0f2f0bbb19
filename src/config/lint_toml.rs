//! Parsing and validation for protodoc.toml configuration files

use crate::error::ConfigError;
use crate::types::{GlobPattern, RuleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the lint base directory
pub const CONFIG_FILE_NAME: &str = "protodoc.toml";

/// Main configuration struct for protodoc.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Lint configuration
    #[serde(default)]
    pub lint: LintConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration from `protodoc.toml` in `dir`, falling back to
    /// defaults when the file does not exist
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        // Validate glob patterns by attempting to compile them with globset
        for pattern in &self.lint.excludes {
            globset::Glob::new(pattern.as_str()).map_err(|e| ConfigError::InvalidValue {
                field: "lint.excludes".to_string(),
                message: format!("invalid glob pattern '{}': {}", pattern.as_str(), e),
            })?;
        }
        Ok(())
    }
}

/// Lint configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LintConfig {
    /// File patterns to exclude from linting
    #[serde(default)]
    pub excludes: Vec<GlobPattern>,

    /// Per-rule enablement, `[lint.rules]` table
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Rules configuration section
///
/// Rules absent from the table are enabled; an explicit `false` disables a
/// rule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RulesConfig {
    enabled: BTreeMap<RuleId, bool>,
}

impl RulesConfig {
    /// Returns whether a rule is enabled under this configuration
    pub fn is_enabled(&self, id: &RuleId) -> bool {
        self.enabled.get(id).copied().unwrap_or(true)
    }

    /// Explicitly enable or disable a rule
    pub fn set_enabled(&mut self, id: RuleId, enabled: bool) {
        self.enabled.insert(id, enabled);
    }
}
