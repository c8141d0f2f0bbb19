#![forbid(unsafe_code)]

//! A minimal `.proto` parser
//!
//! Produces the schema tree consumed by the rules: declarations, positions
//! and leading comments. Deliberately shallow everywhere else: options,
//! imports and reserved ranges are consumed but not modeled, and no
//! cross-file resolution happens here.

mod grammar;
mod lexer;

pub use grammar::parse_file;
