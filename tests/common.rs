//! Test utilities for protodoc integration tests

use std::fs;
use tempfile::TempDir;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Creates a temp directory containing the given `.proto` fixtures
pub fn fixture_dir(files: &[(&str, &str)]) -> TestResult<TempDir> {
    let temp_dir = TempDir::new()?;
    for (name, contents) in files {
        let path = temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
    }
    Ok(temp_dir)
}

/// A schema whose documentation is fully compliant
pub const CLEAN_PROTO: &str = r#"syntax = "proto3";

package acme.v1;

// Lifecycle states of a record.
enum Status {
  // Active state.
  ACTIVE = 0;
  // Inactive state.
  INACTIVE = 1;
}

// A user record.
message User {
  string id = 1;
  Status status = 2;
}

// Manages users.
service UserService {
  // Fetches one user by ID.
  rpc GetUser(User) returns (User);
}
"#;

/// The scenario schema: ACTIVE documented, INACTIVE with a non-sentence comment
pub const STATUS_PROTO: &str = r#"syntax = "proto3";

// Lifecycle states of a record.
enum Status {
  // Active state.
  ACTIVE = 0;
  // inactive
  INACTIVE = 1;
}
"#;
