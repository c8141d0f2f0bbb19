//! Text heuristics shared by documentation rules

pub mod sentence;

pub use sentence::is_complete_sentence;
