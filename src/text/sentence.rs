#![forbid(unsafe_code)]

//! The complete-sentence predicate used by documentation rules
//!
//! The heuristic is deliberately conservative and judges only the first line
//! of a comment:
//!
//! - inline code spans (`` `like_this` ``) are removed before judging, so
//!   punctuation inside them neither helps nor hurts;
//! - the line must start with an uppercase letter, a digit, or an opening
//!   quote (lowercase starts are rejected, non-alphanumeric starts such as
//!   `-` bullets are rejected);
//! - the line must end with `.`, `?` or `!`, optionally followed by a
//!   closing quote, parenthesis or bracket;
//! - a line whose final word is a common abbreviation (`e.g.`, `i.e.`,
//!   `etc.`, `vs.`, `cf.`) is not treated as sentence-terminated.
//!
//! A sentence appearing on a later line never compensates for a non-sentence
//! first line; the convention being enforced is "the comment opens with a
//! sentence", not "a sentence exists somewhere in the comment".

use regex::Regex;
use std::sync::LazyLock;

/// Matches inline code spans so they can be stripped before judging
static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").expect("static pattern is valid"));

/// Matches a trailing abbreviation that ends in a period but does not end a sentence
static TRAILING_ABBREVIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(e\.g|i\.e|etc|vs|cf)\.$").expect("static pattern is valid")
});

/// Characters that may close a sentence after its terminal punctuation
const CLOSERS: &[char] = &['"', '\'', ')', ']'];

/// Returns true if the first line of `text`, taken alone, reads as a
/// complete sentence
///
/// Empty or whitespace-only input returns false. This function is pure and
/// safe to call concurrently from any number of rules.
pub fn is_complete_sentence(text: &str) -> bool {
    let Some(first_line) = text.lines().next() else {
        return false;
    };
    let stripped = CODE_SPAN.replace_all(first_line, "");
    let line = stripped.trim();
    if line.is_empty() {
        return false;
    }

    starts_like_sentence(line) && ends_like_sentence(line)
}

fn starts_like_sentence(line: &str) -> bool {
    let Some(first) = line.chars().next() else {
        return false;
    };
    if first.is_alphabetic() {
        return first.is_uppercase();
    }
    first.is_numeric() || first == '"' || first == '\''
}

fn ends_like_sentence(line: &str) -> bool {
    let trimmed = line.trim_end_matches(CLOSERS);
    if !trimmed.ends_with(['.', '?', '!']) {
        return false;
    }
    !TRAILING_ABBREVIATION.is_match(trimmed)
}
