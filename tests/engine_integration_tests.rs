//! End-to-end engine tests: parse real schema text, run the rule engine,
//! check the merged failure list.

mod common;

use common::{TestResult, CLEAN_PROTO, STATUS_PROTO};
use protodoc::ast::FileNode;
use protodoc::engine::Runner;
use protodoc::parser::parse_file;
use protodoc::rules::RuleRegistry;
use std::path::Path;

fn parse(name: &str, source: &str) -> TestResult<FileNode> {
    Ok(parse_file(Path::new(name), source)?)
}

#[test]
fn clean_schema_produces_no_failures() -> TestResult {
    let forest = vec![parse("clean.proto", CLEAN_PROTO)?];
    let runner = Runner::new(RuleRegistry::with_builtin_rules());

    let outcome = runner.run(Path::new("."), &forest);
    assert!(outcome.is_clean(), "unexpected failures: {:?}", outcome.failures);
    Ok(())
}

#[test]
fn status_scenario_reports_exactly_inactive() -> TestResult {
    let forest = vec![parse("status.proto", STATUS_PROTO)?];
    let runner = Runner::new(RuleRegistry::with_builtin_rules());

    let outcome = runner.run(Path::new("."), &forest);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.failures.len(), 1);

    let failure = &outcome.failures[0];
    assert_eq!(
        failure.rule_id.as_str(),
        "enum-fields-have-sentence-comments"
    );
    assert_eq!(
        failure.message,
        "Enum field \"INACTIVE\" needs a comment with a complete sentence \
         that starts on the first line of the comment."
    );
    // INACTIVE is declared on line 8, column 3 of the fixture.
    assert_eq!(failure.position.line, 8);
    assert_eq!(failure.position.column, 3);
    Ok(())
}

#[test]
fn deeply_nested_enum_is_linted_like_top_level() -> TestResult {
    let source = r#"syntax = "proto3";

// Outer container.
message Outer {
  // Inner container.
  message Inner {
    // Kinds of inner records.
    enum Kind {
      // Known kind.
      KNOWN = 0;
      UNDOCUMENTED = 1;
    }
  }
}
"#;
    let forest = vec![parse("nested.proto", source)?];
    let runner = Runner::new(RuleRegistry::with_builtin_rules());

    let outcome = runner.run(Path::new("."), &forest);
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].message.contains("\"UNDOCUMENTED\""));
    Ok(())
}

#[test]
fn failures_merge_sorted_across_files_and_rules() -> TestResult {
    let undocumented = r#"syntax = "proto3";

message Bare {
  string id = 1;
}

enum Flag {
  UNSET = 0;
}
"#;
    let forest = vec![
        parse("b.proto", undocumented)?,
        parse("a.proto", undocumented)?,
    ];
    let runner = Runner::new(RuleRegistry::with_builtin_rules());

    let outcome = runner.run(Path::new("."), &forest);
    // Per file: one message failure plus one enum-field failure.
    assert_eq!(outcome.failures.len(), 4);

    let keys: Vec<(String, u32, u32, String)> = outcome
        .failures
        .iter()
        .map(|f| {
            (
                f.position.path.display().to_string(),
                f.position.line,
                f.position.column,
                f.rule_id.to_string(),
            )
        })
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted, "failures must be (path, line, column, rule) sorted");
    assert_eq!(keys[0].0, "a.proto");
    Ok(())
}

#[test]
fn two_runs_yield_identical_output() -> TestResult {
    let forest = vec![parse("status.proto", STATUS_PROTO)?];
    let runner = Runner::new(RuleRegistry::with_builtin_rules());

    let first = runner.run(Path::new("."), &forest);
    let second = runner.run(Path::new("."), &forest);
    assert_eq!(first.failures, second.failures);
    Ok(())
}

#[test]
fn running_rules_together_equals_running_them_apart() -> TestResult {
    let source = r#"syntax = "proto3";

message Bare {
  string id = 1;
}

enum Flag {
  UNSET = 0;
}

service BareService {
  rpc Do(Bare) returns (Bare);
}
"#;
    let forest = vec![parse("all.proto", source)?];

    let combined = Runner::new(RuleRegistry::with_builtin_rules()).run(Path::new("."), &forest);

    let all_ids: Vec<protodoc::RuleId> = RuleRegistry::with_builtin_rules()
        .iter_rules()
        .map(|rule| rule.id().clone())
        .collect();

    // Run each rule in its own registry and concatenate the results.
    let mut separate = Vec::new();
    for id in &all_ids {
        let mut solo = RuleRegistry::with_builtin_rules();
        let mut config = protodoc::config::RulesConfig::default();
        for other in &all_ids {
            if other != id {
                config.set_enabled(other.clone(), false);
            }
        }
        solo.filter_by_config(&config);
        assert_eq!(solo.len(), 1);
        separate.extend(Runner::new(solo).run(Path::new("."), &forest).failures);
    }

    separate.sort_by(|a, b| a.position.cmp(&b.position).then(a.rule_id.cmp(&b.rule_id)));
    assert_eq!(combined.failures, separate);
    Ok(())
}
