#![forbid(unsafe_code)]

//! Visitor dispatch over the schema tree
//!
//! A [`Visitor`] has one no-op default method per node variant; rules
//! override only the variants they care about. The [`walk_file`] and
//! [`walk_node`] functions do the actual traversal: an exhaustive match over
//! the node union, recursing into container variants in declaration order,
//! to whatever depth the input nests. The walk itself is stateless and
//! reentrant; all side effects live in the visitor.

use crate::ast::nodes::{Enum, EnumField, Field, FileNode, Message, Method, Node, Oneof, Service};

/// Callbacks invoked by the traversal, one per node variant
#[allow(unused_variables)]
pub trait Visitor {
    fn visit_file(&mut self, file: &FileNode) {}
    fn visit_message(&mut self, message: &Message) {}
    fn visit_enum(&mut self, enum_node: &Enum) {}
    fn visit_field(&mut self, field: &Field) {}
    fn visit_enum_field(&mut self, field: &EnumField) {}
    fn visit_oneof(&mut self, oneof: &Oneof) {}
    fn visit_service(&mut self, service: &Service) {}
    fn visit_method(&mut self, method: &Method) {}
}

/// Walks one file tree, visiting the file node first and then every
/// declaration in source order
pub fn walk_file(file: &FileNode, visitor: &mut dyn Visitor) {
    visitor.visit_file(file);
    for node in &file.nodes {
        walk_node(node, visitor);
    }
}

/// Walks one node and, for container variants, all of its descendants
pub fn walk_node(node: &Node, visitor: &mut dyn Visitor) {
    match node {
        Node::Message(message) => {
            visitor.visit_message(message);
            for child in &message.nodes {
                walk_node(child, visitor);
            }
        }
        Node::Enum(enum_node) => {
            visitor.visit_enum(enum_node);
            for child in &enum_node.nodes {
                walk_node(child, visitor);
            }
        }
        Node::Oneof(oneof) => {
            visitor.visit_oneof(oneof);
            for child in &oneof.nodes {
                walk_node(child, visitor);
            }
        }
        Node::Service(service) => {
            visitor.visit_service(service);
            for child in &service.nodes {
                walk_node(child, visitor);
            }
        }
        Node::Field(field) => visitor.visit_field(field),
        Node::EnumField(field) => visitor.visit_enum_field(field),
        Node::Method(method) => visitor.visit_method(method),
    }
}
