//! List command implementation
//!
//! Prints every enabled rule with its description.

use crate::cli::args::OutputFormat;
use crate::cli::common::{EXIT_CONFIG_ERROR, EXIT_ERROR, EXIT_SUCCESS};
use crate::config::Config;
use crate::error::ConfigError;
use serde::Serialize;

/// Serialized shape of one rule listing
#[derive(Debug, Serialize)]
struct RuleRecord<'a> {
    id: &'a str,
    description: &'a str,
}

/// Run the list command, returning the process exit code
pub fn run_list(format: OutputFormat) -> i32 {
    let config = match Config::load_or_default(".") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return match e {
                ConfigError::Parse(_) => EXIT_CONFIG_ERROR,
                _ => EXIT_ERROR,
            };
        }
    };

    let registry = super::common::build_registry(&config);
    match format {
        OutputFormat::Human => {
            for rule in registry.iter_rules() {
                println!("{}: {}", rule.id(), rule.description());
            }
        }
        OutputFormat::Jsonl => {
            for rule in registry.iter_rules() {
                let record = RuleRecord {
                    id: rule.id().as_str(),
                    description: rule.description(),
                };
                if let Ok(json) = serde_json::to_string(&record) {
                    println!("{json}");
                }
            }
        }
    }
    EXIT_SUCCESS
}
