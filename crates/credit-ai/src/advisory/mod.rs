//! Rule-based improvement suggestions derived from questionnaire answers.
//!
//! Rules read the raw answers rather than the computed sub-scores, so a suggestion is tied to a
//! concrete behavior the borrower reported.

mod rules;

use serde::{Deserialize, Serialize};

use crate::scoring::{AnswerSet, ScoringResult};
use rules::RULES;

/// Upper bound on suggestions returned for one answer set.
pub const MAX_SUGGESTIONS: usize = 6;

/// Expected effect of acting on a suggestion, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub impact: Impact,
}

/// Evaluate every advisory rule against `answers`, ordered by impact and capped at
/// [`MAX_SUGGESTIONS`].
///
/// `result` is accepted so callers can pass the scoring outcome alongside the answers; the
/// current rule set is answer-driven and does not consult it.
pub fn generate_suggestions(answers: &AnswerSet, _result: &ScoringResult) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = RULES
        .iter()
        .filter(|rule| (rule.triggers)(answers))
        .map(|rule| rule.suggestion())
        .collect();

    suggestions.sort_by_key(|suggestion| suggestion.impact);
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
