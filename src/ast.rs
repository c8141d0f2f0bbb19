#![forbid(unsafe_code)]

//! Schema tree produced by the parser and consumed by the rules

pub mod nodes;
pub mod visit;

pub use nodes::{
    Comment, Enum, EnumField, Field, FileNode, Message, Method, Node, Oneof, Service,
};
pub use visit::{walk_file, walk_node, Visitor};
