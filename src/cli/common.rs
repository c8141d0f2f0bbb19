//! Common helper functions shared across CLI commands

use crate::config::Config;
use crate::rules::RuleRegistry;
use termcolor::{ColorChoice as TermColorChoice, StandardStream};

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURES: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_CONFIG_ERROR: i32 = 3;

/// Build the rule registry for a configuration: every builtin rule, minus
/// the ones the config disables
pub(crate) fn build_registry(config: &Config) -> RuleRegistry {
    let mut registry = RuleRegistry::with_builtin_rules();
    registry.filter_by_config(&config.lint.rules);
    registry
}

/// Stdout stream honoring the --color flag
pub(crate) fn stdout_stream(color: crate::cli::ColorChoice) -> StandardStream {
    let choice = match color {
        crate::cli::ColorChoice::Auto => {
            if std::io::IsTerminal::is_terminal(&std::io::stdout()) {
                TermColorChoice::Auto
            } else {
                TermColorChoice::Never
            }
        }
        crate::cli::ColorChoice::Always => TermColorChoice::Always,
        crate::cli::ColorChoice::Never => TermColorChoice::Never,
    };
    StandardStream::stdout(choice)
}
