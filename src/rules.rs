#![forbid(unsafe_code)]

//! Rule definitions and registry

mod builtin;
mod registry;
mod rule;

pub use builtin::{
    builtin_rules, EnumFieldsHaveSentenceComments, MessagesHaveSentenceComments,
    RpcsHaveSentenceComments, ServicesHaveSentenceComments,
};
pub use registry::RuleRegistry;
pub use rule::{Failure, FailureCollector, FailureSink, Rule};
