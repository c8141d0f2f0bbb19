#![forbid(unsafe_code)]

//! Built-in documentation rules
//!
//! Every rule in this family enforces the same convention on a different
//! declaration kind: the declaration needs a leading comment whose first
//! line is a complete sentence. Each rule owns one visitor configuration and
//! shares the sentence predicate from [`crate::text::sentence`].

use crate::ast::nodes::{Comment, EnumField, FileNode, Message, Method, Service};
use crate::ast::visit::{walk_file, Visitor};
use crate::error::RuleError;
use crate::rules::rule::{Failure, FailureSink, Rule};
use crate::text::is_complete_sentence;
use crate::types::{Position, RuleId};
use std::path::Path;

/// Returns one boxed instance of every built-in rule
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(EnumFieldsHaveSentenceComments::new()),
        Box::new(MessagesHaveSentenceComments::new()),
        Box::new(ServicesHaveSentenceComments::new()),
        Box::new(RpcsHaveSentenceComments::new()),
    ]
}

/// Reports a failure unless `comment` opens with a complete sentence
///
/// Covers both violation shapes with one diagnostic: a missing comment and a
/// malformed one read the same to a consumer of the schema.
fn check_sentence_comment(
    sink: &mut dyn FailureSink,
    rule_id: &RuleId,
    kind: &str,
    name: &str,
    position: &Position,
    comment: Option<&Comment>,
) {
    let has_sentence = comment
        .map(|c| is_complete_sentence(&c.lines.join("\n")))
        .unwrap_or(false);
    if !has_sentence {
        sink.report(Failure::new(
            rule_id.clone(),
            position.clone(),
            format!(
                "{kind} \"{name}\" needs a comment with a complete sentence \
                 that starts on the first line of the comment."
            ),
        ));
    }
}

/// Walks a forest with the given visitor, one tree at a time
fn run_visitor<V: Visitor>(visitor: &mut V, files: &[FileNode]) -> Result<(), RuleError> {
    for file in files {
        walk_file(file, visitor);
    }
    Ok(())
}

/// Checks that every enum field has a comment opening with a complete sentence
///
/// Enums nested inside messages, at any depth, are covered by the same
/// traversal as top-level enums.
pub struct EnumFieldsHaveSentenceComments {
    id: RuleId,
}

impl EnumFieldsHaveSentenceComments {
    pub fn new() -> Self {
        Self {
            id: RuleId::new("enum-fields-have-sentence-comments")
                .expect("builtin rule id is valid"),
        }
    }
}

impl Default for EnumFieldsHaveSentenceComments {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for EnumFieldsHaveSentenceComments {
    fn id(&self) -> &RuleId {
        &self.id
    }

    fn description(&self) -> &str {
        "Verifies that all enum fields have a comment that contains at least one complete sentence."
    }

    fn check(
        &self,
        sink: &mut dyn FailureSink,
        _dir_path: &Path,
        files: &[FileNode],
    ) -> Result<(), RuleError> {
        struct V<'a> {
            id: &'a RuleId,
            sink: &'a mut dyn FailureSink,
        }

        impl Visitor for V<'_> {
            fn visit_enum_field(&mut self, field: &EnumField) {
                check_sentence_comment(
                    self.sink,
                    self.id,
                    "Enum field",
                    &field.name,
                    &field.position,
                    field.comment.as_ref(),
                );
            }
        }

        run_visitor(&mut V { id: &self.id, sink }, files)
    }
}

/// Checks that every message has a comment opening with a complete sentence
pub struct MessagesHaveSentenceComments {
    id: RuleId,
}

impl MessagesHaveSentenceComments {
    pub fn new() -> Self {
        Self {
            id: RuleId::new("messages-have-sentence-comments").expect("builtin rule id is valid"),
        }
    }
}

impl Default for MessagesHaveSentenceComments {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for MessagesHaveSentenceComments {
    fn id(&self) -> &RuleId {
        &self.id
    }

    fn description(&self) -> &str {
        "Verifies that all messages have a comment that contains at least one complete sentence."
    }

    fn check(
        &self,
        sink: &mut dyn FailureSink,
        _dir_path: &Path,
        files: &[FileNode],
    ) -> Result<(), RuleError> {
        struct V<'a> {
            id: &'a RuleId,
            sink: &'a mut dyn FailureSink,
        }

        impl Visitor for V<'_> {
            fn visit_message(&mut self, message: &Message) {
                check_sentence_comment(
                    self.sink,
                    self.id,
                    "Message",
                    &message.name,
                    &message.position,
                    message.comment.as_ref(),
                );
            }
        }

        run_visitor(&mut V { id: &self.id, sink }, files)
    }
}

/// Checks that every service has a comment opening with a complete sentence
pub struct ServicesHaveSentenceComments {
    id: RuleId,
}

impl ServicesHaveSentenceComments {
    pub fn new() -> Self {
        Self {
            id: RuleId::new("services-have-sentence-comments").expect("builtin rule id is valid"),
        }
    }
}

impl Default for ServicesHaveSentenceComments {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ServicesHaveSentenceComments {
    fn id(&self) -> &RuleId {
        &self.id
    }

    fn description(&self) -> &str {
        "Verifies that all services have a comment that contains at least one complete sentence."
    }

    fn check(
        &self,
        sink: &mut dyn FailureSink,
        _dir_path: &Path,
        files: &[FileNode],
    ) -> Result<(), RuleError> {
        struct V<'a> {
            id: &'a RuleId,
            sink: &'a mut dyn FailureSink,
        }

        impl Visitor for V<'_> {
            fn visit_service(&mut self, service: &Service) {
                check_sentence_comment(
                    self.sink,
                    self.id,
                    "Service",
                    &service.name,
                    &service.position,
                    service.comment.as_ref(),
                );
            }
        }

        run_visitor(&mut V { id: &self.id, sink }, files)
    }
}

/// Checks that every rpc has a comment opening with a complete sentence
pub struct RpcsHaveSentenceComments {
    id: RuleId,
}

impl RpcsHaveSentenceComments {
    pub fn new() -> Self {
        Self {
            id: RuleId::new("rpcs-have-sentence-comments").expect("builtin rule id is valid"),
        }
    }
}

impl Default for RpcsHaveSentenceComments {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for RpcsHaveSentenceComments {
    fn id(&self) -> &RuleId {
        &self.id
    }

    fn description(&self) -> &str {
        "Verifies that all rpcs have a comment that contains at least one complete sentence."
    }

    fn check(
        &self,
        sink: &mut dyn FailureSink,
        _dir_path: &Path,
        files: &[FileNode],
    ) -> Result<(), RuleError> {
        struct V<'a> {
            id: &'a RuleId,
            sink: &'a mut dyn FailureSink,
        }

        impl Visitor for V<'_> {
            fn visit_method(&mut self, method: &Method) {
                check_sentence_comment(
                    self.sink,
                    self.id,
                    "RPC",
                    &method.name,
                    &method.position,
                    method.comment.as_ref(),
                );
            }
        }

        run_visitor(&mut V { id: &self.id, sink }, files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::nodes::{Enum, Node, Oneof};
    use crate::rules::rule::FailureCollector;
    use std::path::PathBuf;

    fn pos(line: u32) -> Position {
        Position::new("test.proto", line, 3)
    }

    fn comment(line: u32, text: &str) -> Option<Comment> {
        Some(Comment::new(
            pos(line),
            text.lines().map(str::to_string).collect(),
        ))
    }

    fn enum_field(name: &str, tag: i64, line: u32, c: Option<Comment>) -> Node {
        Node::EnumField(EnumField {
            name: name.to_string(),
            tag,
            position: pos(line),
            comment: c,
        })
    }

    fn file(nodes: Vec<Node>) -> FileNode {
        FileNode {
            path: PathBuf::from("test.proto"),
            syntax: Some("proto3".to_string()),
            package: None,
            nodes,
        }
    }

    fn run(rule: &dyn Rule, files: &[FileNode]) -> Vec<Failure> {
        let mut collector = FailureCollector::new();
        rule.check(&mut collector, Path::new("."), files)
            .expect("builtin rules never return structural errors here");
        collector.into_failures()
    }

    fn status_enum(active_comment: Option<Comment>, inactive_comment: Option<Comment>) -> Node {
        Node::Enum(Enum {
            name: "Status".to_string(),
            position: pos(1),
            comment: comment(1, "Lifecycle states of a record."),
            nodes: vec![
                enum_field("ACTIVE", 0, 3, active_comment),
                enum_field("INACTIVE", 1, 5, inactive_comment),
            ],
        })
    }

    #[test]
    fn test_documented_enum_fields_pass() {
        let rule = EnumFieldsHaveSentenceComments::new();
        let files = [file(vec![status_enum(
            comment(2, "Active state."),
            comment(4, "Inactive state."),
        )])];

        assert!(run(&rule, &files).is_empty());
    }

    #[test]
    fn test_status_scenario_one_failure_for_inactive() {
        // ACTIVE has a sentence comment, INACTIVE has "inactive" (lowercase,
        // no terminal punctuation): exactly one failure, naming INACTIVE.
        let rule = EnumFieldsHaveSentenceComments::new();
        let files = [file(vec![status_enum(
            comment(2, "Active state."),
            comment(4, "inactive"),
        )])];

        let failures = run(&rule, &files);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].position, pos(5));
        assert_eq!(
            failures[0].message,
            "Enum field \"INACTIVE\" needs a comment with a complete sentence \
             that starts on the first line of the comment."
        );
    }

    #[test]
    fn test_missing_comment_is_one_failure() {
        let rule = EnumFieldsHaveSentenceComments::new();
        let files = [file(vec![status_enum(comment(2, "Active state."), None)])];

        let failures = run(&rule, &files);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.contains("\"INACTIVE\""));
    }

    #[test]
    fn test_sentence_on_later_line_still_fails() {
        let rule = EnumFieldsHaveSentenceComments::new();
        let files = [file(vec![status_enum(
            comment(2, "todo\nThis later line is a sentence."),
            comment(4, "Inactive state."),
        )])];

        let failures = run(&rule, &files);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.contains("\"ACTIVE\""));
    }

    #[test]
    fn test_nested_enum_is_checked_like_top_level() {
        let rule = EnumFieldsHaveSentenceComments::new();
        let nested = Node::Message(Message {
            name: "Outer".to_string(),
            position: pos(1),
            comment: None,
            nodes: vec![Node::Message(Message {
                name: "Inner".to_string(),
                position: pos(2),
                comment: None,
                nodes: vec![Node::Enum(Enum {
                    name: "Kind".to_string(),
                    position: pos(3),
                    comment: None,
                    nodes: vec![enum_field("UNKNOWN", 0, 4, None)],
                })],
            })],
        });

        let failures = run(&rule, &[file(vec![nested])]);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.contains("\"UNKNOWN\""));
        assert_eq!(failures[0].position, pos(4));
    }

    #[test]
    fn test_enum_inside_oneof_containing_message() {
        // Oneofs are containers too; the walk must pass through them.
        let rule = EnumFieldsHaveSentenceComments::new();
        let tree = Node::Message(Message {
            name: "Wrapper".to_string(),
            position: pos(1),
            comment: None,
            nodes: vec![Node::Oneof(Oneof {
                name: "value".to_string(),
                position: pos(2),
                comment: None,
                nodes: vec![Node::Enum(Enum {
                    name: "Tag".to_string(),
                    position: pos(3),
                    comment: None,
                    nodes: vec![enum_field("NONE", 0, 4, None)],
                })],
            })],
        });

        let failures = run(&rule, &[file(vec![tree])]);
        assert_eq!(failures.len(), 1);
    }

    #[test]
    fn test_idempotent_over_same_tree() {
        let rule = EnumFieldsHaveSentenceComments::new();
        let files = [file(vec![status_enum(None, comment(4, "todo"))])];

        let first = run(&rule, &files);
        let second = run(&rule, &files);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_messages_rule() {
        let rule = MessagesHaveSentenceComments::new();
        let files = [file(vec![
            Node::Message(Message {
                name: "Documented".to_string(),
                position: pos(1),
                comment: comment(1, "A documented message."),
                nodes: vec![],
            }),
            Node::Message(Message {
                name: "Bare".to_string(),
                position: pos(5),
                comment: None,
                nodes: vec![],
            }),
        ])];

        let failures = run(&rule, &files);
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].message,
            "Message \"Bare\" needs a comment with a complete sentence \
             that starts on the first line of the comment."
        );
    }

    #[test]
    fn test_services_and_rpcs_rules() {
        let service = Node::Service(Service {
            name: "UserService".to_string(),
            position: pos(1),
            comment: None,
            nodes: vec![Node::Method(Method {
                name: "GetUser".to_string(),
                request_type: "GetUserRequest".to_string(),
                response_type: "GetUserResponse".to_string(),
                position: pos(2),
                comment: comment(2, "Fetches one user by ID."),
            })],
        });
        let files = [file(vec![service])];

        let service_failures = run(&ServicesHaveSentenceComments::new(), &files);
        assert_eq!(service_failures.len(), 1);
        assert!(service_failures[0].message.contains("Service \"UserService\""));

        let rpc_failures = run(&RpcsHaveSentenceComments::new(), &files);
        assert!(rpc_failures.is_empty());
    }

    #[test]
    fn test_rules_are_isolated() {
        // Running two rules over the same forest equals running each alone.
        let files = [file(vec![status_enum(None, None)])];

        let enum_rule = EnumFieldsHaveSentenceComments::new();
        let message_rule = MessagesHaveSentenceComments::new();

        let alone_enum = run(&enum_rule, &files);
        let alone_message = run(&message_rule, &files);

        let mut combined = FailureCollector::new();
        enum_rule
            .check(&mut combined, Path::new("."), &files)
            .unwrap();
        message_rule
            .check(&mut combined, Path::new("."), &files)
            .unwrap();

        let combined = combined.into_failures();
        assert_eq!(combined.len(), alone_enum.len() + alone_message.len());
        assert_eq!(&combined[..alone_enum.len()], &alone_enum[..]);
        assert_eq!(&combined[alone_enum.len()..], &alone_message[..]);
    }

    #[test]
    fn test_builtin_rule_ids_are_unique() {
        let rules = builtin_rules();
        let mut ids: Vec<&str> = rules.iter().map(|r| r.id().as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
