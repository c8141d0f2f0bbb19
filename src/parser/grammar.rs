#![forbid(unsafe_code)]

//! Recursive-descent grammar over the token stream
//!
//! Covers the declaration shapes the documentation rules care about:
//! messages, enums, oneofs, services and their fields/rpcs, nested to any
//! depth. Options, imports, reserved ranges and extensions are consumed and
//! discarded. Unknown statements are a parse error rather than silently
//! skipped, so a malformed schema surfaces as a structural fault.

use crate::ast::nodes::{
    Enum, EnumField, Field, FileNode, Message, Method, Node, Oneof, Service,
};
use crate::error::ParseError;
use crate::parser::lexer::{tokenize, Token, TokenKind};
use std::path::Path;

/// Parses one `.proto` source file into a schema tree
pub fn parse_file(path: &Path, source: &str) -> Result<FileNode, ParseError> {
    let tokens = tokenize(path, source)?;
    let mut parser = Parser {
        path,
        tokens,
        pos: 0,
    };
    parser.parse_file()
}

struct Parser<'a> {
    path: &'a Path,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn parse_file(&mut self) -> Result<FileNode, ParseError> {
        let mut file = FileNode {
            path: self.path.to_path_buf(),
            syntax: None,
            package: None,
            nodes: Vec::new(),
        };

        loop {
            let token = self.peek().clone();
            match &token.kind {
                TokenKind::Eof => break,
                TokenKind::Symbol(';') => {
                    self.bump();
                }
                TokenKind::Ident => match token.text.as_str() {
                    "syntax" => {
                        self.bump();
                        self.expect_symbol('=')?;
                        file.syntax = Some(self.expect_string()?);
                        self.expect_symbol(';')?;
                    }
                    "package" => {
                        self.bump();
                        file.package = Some(self.expect_ident()?.text);
                        self.expect_symbol(';')?;
                    }
                    "import" => {
                        self.bump();
                        if matches!(self.peek().text.as_str(), "public" | "weak") {
                            self.bump();
                        }
                        self.expect_string()?;
                        self.expect_symbol(';')?;
                    }
                    "option" => self.skip_option()?,
                    "message" => {
                        let message = self.parse_message()?;
                        file.nodes.push(Node::Message(message));
                    }
                    "enum" => {
                        let enum_node = self.parse_enum()?;
                        file.nodes.push(Node::Enum(enum_node));
                    }
                    "service" => {
                        let service = self.parse_service()?;
                        file.nodes.push(Node::Service(service));
                    }
                    "extend" => self.skip_extend()?,
                    other => {
                        return Err(self.error_at(&token, format!("unexpected '{other}'")));
                    }
                },
                _ => {
                    return Err(self.error_at(&token, format!("unexpected '{}'", token.text)));
                }
            }
        }

        Ok(file)
    }

    fn parse_message(&mut self) -> Result<Message, ParseError> {
        let keyword = self.bump(); // 'message'
        let name = self.expect_ident()?;
        self.expect_symbol('{')?;
        let nodes = self.parse_message_body()?;

        Ok(Message {
            name: name.text,
            position: keyword.position(self.path),
            comment: keyword.comment,
            nodes,
        })
    }

    fn parse_message_body(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            let token = self.peek().clone();
            match &token.kind {
                TokenKind::Symbol('}') => {
                    self.bump();
                    return Ok(nodes);
                }
                TokenKind::Symbol(';') => {
                    self.bump();
                }
                TokenKind::Ident => match token.text.as_str() {
                    "message" => nodes.push(Node::Message(self.parse_message()?)),
                    "enum" => nodes.push(Node::Enum(self.parse_enum()?)),
                    "oneof" => nodes.push(Node::Oneof(self.parse_oneof()?)),
                    "option" => self.skip_option()?,
                    "reserved" | "extensions" => self.skip_statement()?,
                    "extend" => self.skip_extend()?,
                    _ => nodes.push(Node::Field(self.parse_field()?)),
                },
                TokenKind::Eof => {
                    return Err(self.error_at(&token, "unexpected end of file in message body"));
                }
                _ => {
                    return Err(self.error_at(&token, format!("unexpected '{}'", token.text)));
                }
            }
        }
    }

    /// Parses `[label] type name = tag [options];`, including map fields
    fn parse_field(&mut self) -> Result<Field, ParseError> {
        let first = self.bump();
        let mut comment = first.comment.clone();
        let position = first.position(self.path);

        let type_token = if matches!(first.text.as_str(), "repeated" | "optional" | "required") {
            let t = self.bump();
            // A comment on the label wins over one on the type token.
            comment = comment.or(t.comment.clone());
            t
        } else {
            first
        };

        let type_name = if type_token.text == "map" && self.peek_symbol('<') {
            self.parse_map_type()?
        } else {
            type_token.text
        };

        let name = self.expect_ident()?;
        self.expect_symbol('=')?;
        let tag = self.expect_integer()?;
        self.skip_field_options()?;
        self.expect_symbol(';')?;

        Ok(Field {
            name: name.text,
            type_name,
            tag,
            position,
            comment,
        })
    }

    fn parse_map_type(&mut self) -> Result<String, ParseError> {
        self.expect_symbol('<')?;
        let key = self.expect_ident()?.text;
        self.expect_symbol(',')?;
        let value = self.expect_ident()?.text;
        self.expect_symbol('>')?;
        Ok(format!("map<{key}, {value}>"))
    }

    fn parse_enum(&mut self) -> Result<Enum, ParseError> {
        let keyword = self.bump(); // 'enum'
        let name = self.expect_ident()?;
        self.expect_symbol('{')?;

        let mut nodes = Vec::new();
        loop {
            let token = self.peek().clone();
            match &token.kind {
                TokenKind::Symbol('}') => {
                    self.bump();
                    break;
                }
                TokenKind::Symbol(';') => {
                    self.bump();
                }
                TokenKind::Ident => match token.text.as_str() {
                    "option" => self.skip_option()?,
                    "reserved" => self.skip_statement()?,
                    _ => nodes.push(Node::EnumField(self.parse_enum_field()?)),
                },
                TokenKind::Eof => {
                    return Err(self.error_at(&token, "unexpected end of file in enum body"));
                }
                _ => {
                    return Err(self.error_at(&token, format!("unexpected '{}'", token.text)));
                }
            }
        }

        Ok(Enum {
            name: name.text,
            position: keyword.position(self.path),
            comment: keyword.comment,
            nodes,
        })
    }

    /// Parses `NAME = tag [options];`
    fn parse_enum_field(&mut self) -> Result<EnumField, ParseError> {
        let name = self.bump();
        self.expect_symbol('=')?;
        let tag = self.expect_integer()?;
        self.skip_field_options()?;
        self.expect_symbol(';')?;

        Ok(EnumField {
            name: name.text.clone(),
            tag,
            position: name.position(self.path),
            comment: name.comment,
        })
    }

    fn parse_oneof(&mut self) -> Result<Oneof, ParseError> {
        let keyword = self.bump(); // 'oneof'
        let name = self.expect_ident()?;
        self.expect_symbol('{')?;

        let mut nodes = Vec::new();
        loop {
            let token = self.peek().clone();
            match &token.kind {
                TokenKind::Symbol('}') => {
                    self.bump();
                    break;
                }
                TokenKind::Symbol(';') => {
                    self.bump();
                }
                TokenKind::Ident if token.text == "option" => self.skip_option()?,
                TokenKind::Ident => nodes.push(Node::Field(self.parse_field()?)),
                TokenKind::Eof => {
                    return Err(self.error_at(&token, "unexpected end of file in oneof body"));
                }
                _ => {
                    return Err(self.error_at(&token, format!("unexpected '{}'", token.text)));
                }
            }
        }

        Ok(Oneof {
            name: name.text,
            position: keyword.position(self.path),
            comment: keyword.comment,
            nodes,
        })
    }

    fn parse_service(&mut self) -> Result<Service, ParseError> {
        let keyword = self.bump(); // 'service'
        let name = self.expect_ident()?;
        self.expect_symbol('{')?;

        let mut nodes = Vec::new();
        loop {
            let token = self.peek().clone();
            match &token.kind {
                TokenKind::Symbol('}') => {
                    self.bump();
                    break;
                }
                TokenKind::Symbol(';') => {
                    self.bump();
                }
                TokenKind::Ident if token.text == "option" => self.skip_option()?,
                TokenKind::Ident if token.text == "rpc" => {
                    nodes.push(Node::Method(self.parse_method()?));
                }
                TokenKind::Eof => {
                    return Err(self.error_at(&token, "unexpected end of file in service body"));
                }
                _ => {
                    return Err(self.error_at(&token, format!("unexpected '{}'", token.text)));
                }
            }
        }

        Ok(Service {
            name: name.text,
            position: keyword.position(self.path),
            comment: keyword.comment,
            nodes,
        })
    }

    /// Parses `rpc Name (Req) returns (Resp);` with an optional options block
    fn parse_method(&mut self) -> Result<Method, ParseError> {
        let keyword = self.bump(); // 'rpc'
        let name = self.expect_ident()?;

        let request_type = self.parse_rpc_type()?;
        let returns = self.expect_ident()?;
        if returns.text != "returns" {
            return Err(self.error_at(&returns, "expected 'returns'"));
        }
        let response_type = self.parse_rpc_type()?;

        if self.peek_symbol('{') {
            self.skip_balanced_braces()?;
        } else {
            self.expect_symbol(';')?;
        }

        Ok(Method {
            name: name.text,
            request_type,
            response_type,
            position: keyword.position(self.path),
            comment: keyword.comment,
        })
    }

    fn parse_rpc_type(&mut self) -> Result<String, ParseError> {
        self.expect_symbol('(')?;
        let mut type_name = self.expect_ident()?.text;
        if type_name == "stream" {
            type_name = self.expect_ident()?.text;
        }
        self.expect_symbol(')')?;
        Ok(type_name)
    }

    /// Consumes an `option` statement, including aggregate `{ ... }` values
    fn skip_option(&mut self) -> Result<(), ParseError> {
        self.bump(); // 'option'
        loop {
            let token = self.peek().clone();
            match &token.kind {
                TokenKind::Symbol(';') => {
                    self.bump();
                    return Ok(());
                }
                TokenKind::Symbol('{') => {
                    self.skip_balanced_braces()?;
                }
                TokenKind::Eof => {
                    return Err(self.error_at(&token, "unexpected end of file in option"));
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Consumes everything up to and including the next `;`
    fn skip_statement(&mut self) -> Result<(), ParseError> {
        loop {
            let token = self.bump();
            match token.kind {
                TokenKind::Symbol(';') => return Ok(()),
                TokenKind::Eof => {
                    return Err(self.error_at(&token, "unexpected end of file in statement"));
                }
                _ => {}
            }
        }
    }

    /// Consumes `extend Name { ... }`
    fn skip_extend(&mut self) -> Result<(), ParseError> {
        self.bump(); // 'extend'
        self.expect_ident()?;
        self.skip_balanced_braces()
    }

    /// Consumes a `{ ... }` block, tracking nesting
    fn skip_balanced_braces(&mut self) -> Result<(), ParseError> {
        self.expect_symbol('{')?;
        let mut depth = 1u32;
        loop {
            let token = self.bump();
            match token.kind {
                TokenKind::Symbol('{') => depth += 1,
                TokenKind::Symbol('}') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                TokenKind::Eof => {
                    return Err(self.error_at(&token, "unexpected end of file in block"));
                }
                _ => {}
            }
        }
    }

    /// Consumes a `[...]` field-option list if present
    fn skip_field_options(&mut self) -> Result<(), ParseError> {
        if !self.peek_symbol('[') {
            return Ok(());
        }
        self.bump();
        let mut depth = 1u32;
        loop {
            let token = self.bump();
            match token.kind {
                TokenKind::Symbol('[') => depth += 1,
                TokenKind::Symbol(']') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                TokenKind::Symbol('{') => {
                    // Aggregate option value inside the list.
                    let mut braces = 1u32;
                    loop {
                        let inner = self.bump();
                        match inner.kind {
                            TokenKind::Symbol('{') => braces += 1,
                            TokenKind::Symbol('}') => {
                                braces -= 1;
                                if braces == 0 {
                                    break;
                                }
                            }
                            TokenKind::Eof => {
                                return Err(
                                    self.error_at(&inner, "unexpected end of file in options")
                                );
                            }
                            _ => {}
                        }
                    }
                }
                TokenKind::Eof => {
                    return Err(self.error_at(&token, "unexpected end of file in options"));
                }
                _ => {}
            }
        }
    }

    fn peek(&self) -> &Token {
        // The token stream always ends with Eof.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_symbol(&self, symbol: char) -> bool {
        self.peek().kind == TokenKind::Symbol(symbol)
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn expect_symbol(&mut self, symbol: char) -> Result<Token, ParseError> {
        let token = self.bump();
        if token.kind != TokenKind::Symbol(symbol) {
            return Err(self.error_at(&token, format!("expected '{symbol}'")));
        }
        Ok(token)
    }

    fn expect_ident(&mut self) -> Result<Token, ParseError> {
        let token = self.bump();
        if token.kind != TokenKind::Ident {
            return Err(self.error_at(&token, "expected identifier"));
        }
        Ok(token)
    }

    fn expect_string(&mut self) -> Result<String, ParseError> {
        let token = self.bump();
        if token.kind != TokenKind::Str {
            return Err(self.error_at(&token, "expected string literal"));
        }
        Ok(token.text)
    }

    fn expect_integer(&mut self) -> Result<i64, ParseError> {
        let token = self.bump();
        if token.kind != TokenKind::Number {
            return Err(self.error_at(&token, "expected integer"));
        }
        token
            .text
            .parse::<i64>()
            .map_err(|_| self.error_at(&token, format!("invalid integer '{}'", token.text)))
    }

    fn error_at(&self, token: &Token, message: impl Into<String>) -> ParseError {
        ParseError {
            file: self.path.to_path_buf(),
            line: token.line,
            column: token.column,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::nodes::Comment;
    use crate::types::Position;

    fn parse(source: &str) -> FileNode {
        parse_file(Path::new("test.proto"), source).unwrap()
    }

    fn first_comment_line(comment: &Option<Comment>) -> Option<&str> {
        comment.as_ref().and_then(Comment::first_line)
    }

    #[test]
    fn test_parse_empty_file() {
        let file = parse("");
        assert!(file.nodes.is_empty());
        assert!(file.syntax.is_none());
    }

    #[test]
    fn test_parse_header_statements() {
        let file = parse(
            r#"
syntax = "proto3";

package user.v1;

import "google/protobuf/empty.proto";
option java_package = "com.example.user";
"#,
        );
        assert_eq!(file.syntax.as_deref(), Some("proto3"));
        assert_eq!(file.package.as_deref(), Some("user.v1"));
        assert!(file.nodes.is_empty());
    }

    #[test]
    fn test_parse_enum_with_comments() {
        let file = parse(
            r#"
// Lifecycle states of a record.
enum Status {
  // Active state.
  ACTIVE = 0;
  // inactive
  INACTIVE = 1;
  UNKNOWN = 2;
}
"#,
        );

        let Node::Enum(status) = &file.nodes[0] else {
            panic!("expected enum");
        };
        assert_eq!(status.name, "Status");
        assert_eq!(
            first_comment_line(&status.comment),
            Some("Lifecycle states of a record.")
        );
        assert_eq!(status.nodes.len(), 3);

        let Node::EnumField(active) = &status.nodes[0] else {
            panic!("expected enum field");
        };
        assert_eq!(active.name, "ACTIVE");
        assert_eq!(active.tag, 0);
        assert_eq!(first_comment_line(&active.comment), Some("Active state."));
        assert_eq!(active.position, Position::new("test.proto", 5, 3));

        let Node::EnumField(unknown) = &status.nodes[2] else {
            panic!("expected enum field");
        };
        assert!(unknown.comment.is_none());
    }

    #[test]
    fn test_parse_message_with_fields() {
        let file = parse(
            r#"
// A user record.
message User {
  // Primary identifier.
  string id = 1;
  repeated string tags = 2;
  map<string, int64> counters = 3 [deprecated = true];
}
"#,
        );

        let Node::Message(user) = &file.nodes[0] else {
            panic!("expected message");
        };
        assert_eq!(user.name, "User");
        assert_eq!(user.nodes.len(), 3);

        let Node::Field(id) = &user.nodes[0] else {
            panic!("expected field");
        };
        assert_eq!(id.type_name, "string");
        assert_eq!(id.tag, 1);
        assert_eq!(first_comment_line(&id.comment), Some("Primary identifier."));

        let Node::Field(tags) = &user.nodes[1] else {
            panic!("expected field");
        };
        assert_eq!(tags.type_name, "string");
        assert_eq!(tags.name, "tags");

        let Node::Field(counters) = &user.nodes[2] else {
            panic!("expected field");
        };
        assert_eq!(counters.type_name, "map<string, int64>");
    }

    #[test]
    fn test_parse_deeply_nested_types() {
        let file = parse(
            r#"
message Outer {
  message Inner {
    // Nested kind.
    enum Kind {
      // Unknown by default.
      UNKNOWN = 0;
    }
    Kind kind = 1;
  }
  Inner inner = 1;
}
"#,
        );

        let Node::Message(outer) = &file.nodes[0] else {
            panic!("expected message");
        };
        let Node::Message(inner) = &outer.nodes[0] else {
            panic!("expected nested message");
        };
        let Node::Enum(kind) = &inner.nodes[0] else {
            panic!("expected nested enum");
        };
        assert_eq!(kind.name, "Kind");
        let Node::EnumField(unknown) = &kind.nodes[0] else {
            panic!("expected enum field");
        };
        assert_eq!(
            first_comment_line(&unknown.comment),
            Some("Unknown by default.")
        );
    }

    #[test]
    fn test_parse_oneof() {
        let file = parse(
            r#"
message Event {
  // Exactly one payload.
  oneof payload {
    string text = 1;
    int64 number = 2;
  }
}
"#,
        );

        let Node::Message(event) = &file.nodes[0] else {
            panic!("expected message");
        };
        let Node::Oneof(payload) = &event.nodes[0] else {
            panic!("expected oneof");
        };
        assert_eq!(payload.name, "payload");
        assert_eq!(payload.nodes.len(), 2);
        assert_eq!(
            first_comment_line(&payload.comment),
            Some("Exactly one payload.")
        );
    }

    #[test]
    fn test_parse_service() {
        let file = parse(
            r#"
// Manages users.
service UserService {
  // Fetches one user by ID.
  rpc GetUser(GetUserRequest) returns (GetUserResponse);
  rpc Watch(WatchRequest) returns (stream WatchResponse) {
    option idempotency_level = NO_SIDE_EFFECTS;
  }
}
"#,
        );

        let Node::Service(service) = &file.nodes[0] else {
            panic!("expected service");
        };
        assert_eq!(service.name, "UserService");
        assert_eq!(service.nodes.len(), 2);

        let Node::Method(get_user) = &service.nodes[0] else {
            panic!("expected method");
        };
        assert_eq!(get_user.request_type, "GetUserRequest");
        assert_eq!(get_user.response_type, "GetUserResponse");
        assert_eq!(
            first_comment_line(&get_user.comment),
            Some("Fetches one user by ID.")
        );

        let Node::Method(watch) = &service.nodes[1] else {
            panic!("expected method");
        };
        assert_eq!(watch.response_type, "WatchResponse");
        assert!(watch.comment.is_none());
    }

    #[test]
    fn test_reserved_and_extensions_are_skipped() {
        let file = parse(
            r#"
message Legacy {
  reserved 2, 15, 9 to 11;
  reserved "foo", "bar";
  extensions 100 to 199;
  string name = 1;
}
"#,
        );

        let Node::Message(legacy) = &file.nodes[0] else {
            panic!("expected message");
        };
        assert_eq!(legacy.nodes.len(), 1);
        assert_eq!(legacy.nodes[0].name(), "name");
    }

    #[test]
    fn test_negative_enum_tag() {
        let file = parse("enum E { NEGATIVE = -1; }");
        let Node::Enum(e) = &file.nodes[0] else {
            panic!("expected enum");
        };
        let Node::EnumField(f) = &e.nodes[0] else {
            panic!("expected enum field");
        };
        assert_eq!(f.tag, -1);
    }

    #[test]
    fn test_parse_error_has_position() {
        let err = parse_file(Path::new("bad.proto"), "message {").unwrap_err();
        assert_eq!(err.file, Path::new("bad.proto"));
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 9);
    }

    #[test]
    fn test_unclosed_message_is_an_error() {
        let err = parse_file(Path::new("bad.proto"), "message User {").unwrap_err();
        assert!(err.message.contains("unexpected end of file"));
    }

    #[test]
    fn test_unknown_top_level_statement_is_an_error() {
        let err = parse_file(Path::new("bad.proto"), "frobnicate User {}").unwrap_err();
        assert!(err.message.contains("unexpected 'frobnicate'"));
    }
}
