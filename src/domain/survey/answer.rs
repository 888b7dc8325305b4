//! Answer normalization.
//!
//! Free-text answers are matched case-insensitively by substring. The rules
//! live here and nowhere else so they can be swapped and tested on their own.

use serde::{Deserialize, Serialize};

/// A normalized answer to "who does this task?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    Mama,
    Papa,
    Both,
    /// Nobody does the task. Not a match, but counts toward coverage.
    Neither,
    Unknown,
}

const MAMA_TERMS: &[&str] = &["mom", "mama", "mother"];
const PAPA_TERMS: &[&str] = &["dad", "papa", "father"];
const BOTH_TERMS: &[&str] = &["both", "draw", "tie"];
const NEITHER_TERMS: &[&str] = &["neither", "nobody", "no one"];
const NOT_APPLICABLE: &[&str] = &["n/a", "na"];

/// Normalizes a raw answer string.
///
/// Empty and not-applicable answers are `Unknown`. "Nobody" terms are checked
/// first, then shared-answer terms; an answer naming both a Mama term and a
/// Papa term is also `Both`.
pub fn normalize_answer(raw: &str) -> Answer {
    let answer = raw.trim().to_lowercase();
    if answer.is_empty() || NOT_APPLICABLE.contains(&answer.as_str()) {
        return Answer::Unknown;
    }

    if NEITHER_TERMS.iter().any(|t| answer.contains(t)) {
        return Answer::Neither;
    }

    if BOTH_TERMS.iter().any(|t| answer.contains(t)) {
        return Answer::Both;
    }

    let mama = MAMA_TERMS.iter().any(|t| answer.contains(t));
    let papa = PAPA_TERMS.iter().any(|t| answer.contains(t));
    match (mama, papa) {
        (true, true) => Answer::Both,
        (true, false) => Answer::Mama,
        (false, true) => Answer::Papa,
        (false, false) => Answer::Unknown,
    }
}

impl Answer {
    /// True unless the answer is `Unknown`.
    pub fn is_known(&self) -> bool {
        !matches!(self, Answer::Unknown)
    }

    /// True when the answer names at least one parent.
    pub fn is_covered(&self) -> bool {
        matches!(self, Answer::Mama | Answer::Papa | Answer::Both)
    }
}
