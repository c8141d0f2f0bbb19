//! Configuration file parsing and validation

pub mod lint_toml;

pub use lint_toml::{Config, LintConfig, RulesConfig, CONFIG_FILE_NAME};
