//! Init command implementation
//!
//! Writes a commented default protodoc.toml into the current directory.

use crate::config::CONFIG_FILE_NAME;
use crate::error::ConfigError;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# protodoc configuration
#
# All rules are enabled by default; set one to false to disable it.

[lint]
# Glob patterns excluded from linting, relative to this directory.
excludes = [
    # "vendor/**",
]

[lint.rules]
# enum-fields-have-sentence-comments = true
# messages-have-sentence-comments = true
# services-have-sentence-comments = true
# rpcs-have-sentence-comments = true
"#;

/// Write the default configuration file
///
/// # Errors
///
/// Returns an error if the file already exists (unless `force` is set) or
/// cannot be written.
pub fn run_init(force: bool) -> Result<(), ConfigError> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: CONFIG_FILE_NAME.to_string(),
            message: "already exists; use --force to overwrite".to_string(),
        });
    }
    fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}
