#![forbid(unsafe_code)]

//! Node types for the parsed schema tree
//!
//! The tree is a closed tagged union: one [`FileNode`] root per source file,
//! holding [`Node`] children. Container variants (message, enum, oneof,
//! service) nest to arbitrary depth. Nodes are built once by the parser and
//! treated as read-only by everything downstream.

use crate::types::Position;
use std::path::PathBuf;

/// A documentation comment attached to a declaration
///
/// Lines are stored with the `//` / `/* */` markers already stripped. The
/// position is that of the first comment marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub position: Position,
    pub lines: Vec<String>,
}

impl Comment {
    pub fn new(position: Position, lines: Vec<String>) -> Self {
        Comment { position, lines }
    }

    /// Returns the first line of the comment, if any
    pub fn first_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }
}

/// The root of one parsed schema file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// Path of the source file, as handed to the parser
    pub path: PathBuf,
    /// Value of the `syntax` statement, e.g. `proto3`
    pub syntax: Option<String>,
    /// Value of the `package` statement
    pub package: Option<String>,
    /// Top-level declarations in source order
    pub nodes: Vec<Node>,
}

/// A declaration inside a schema file
///
/// The variant set is closed: rules extend the linter, node kinds do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Message(Message),
    Enum(Enum),
    Field(Field),
    EnumField(EnumField),
    Oneof(Oneof),
    Service(Service),
    Method(Method),
}

impl Node {
    /// Returns the declared name of this node
    pub fn name(&self) -> &str {
        match self {
            Node::Message(m) => &m.name,
            Node::Enum(e) => &e.name,
            Node::Field(f) => &f.name,
            Node::EnumField(f) => &f.name,
            Node::Oneof(o) => &o.name,
            Node::Service(s) => &s.name,
            Node::Method(m) => &m.name,
        }
    }

    /// Returns the source position of this node's declaration
    pub fn position(&self) -> &Position {
        match self {
            Node::Message(m) => &m.position,
            Node::Enum(e) => &e.position,
            Node::Field(f) => &f.position,
            Node::EnumField(f) => &f.position,
            Node::Oneof(o) => &o.position,
            Node::Service(s) => &s.position,
            Node::Method(m) => &m.position,
        }
    }

    /// Returns the leading comment of this node's declaration, if any
    pub fn comment(&self) -> Option<&Comment> {
        match self {
            Node::Message(m) => m.comment.as_ref(),
            Node::Enum(e) => e.comment.as_ref(),
            Node::Field(f) => f.comment.as_ref(),
            Node::EnumField(f) => f.comment.as_ref(),
            Node::Oneof(o) => o.comment.as_ref(),
            Node::Service(s) => s.comment.as_ref(),
            Node::Method(m) => m.comment.as_ref(),
        }
    }
}

/// A `message` declaration, possibly containing nested types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub name: String,
    pub position: Position,
    pub comment: Option<Comment>,
    pub nodes: Vec<Node>,
}

/// An `enum` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    pub position: Position,
    pub comment: Option<Comment>,
    pub nodes: Vec<Node>,
}

/// A message field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// Field type as written in source, e.g. `string` or `map<string, int32>`
    pub type_name: String,
    pub tag: i64,
    pub position: Position,
    pub comment: Option<Comment>,
}

/// An enum value declaration, e.g. `ACTIVE = 0;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumField {
    pub name: String,
    pub tag: i64,
    pub position: Position,
    pub comment: Option<Comment>,
}

/// A `oneof` group inside a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oneof {
    pub name: String,
    pub position: Position,
    pub comment: Option<Comment>,
    pub nodes: Vec<Node>,
}

/// A `service` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub position: Position,
    pub comment: Option<Comment>,
    pub nodes: Vec<Node>,
}

/// An `rpc` method inside a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub request_type: String,
    pub response_type: String,
    pub position: Position,
    pub comment: Option<Comment>,
}
