//! Core types for the cloze quiz engine.

use serde::{Deserialize, Serialize};

/// Placeholder substituted for the answer span in a problem's text.
pub const BLANK: &str = "_____";

/// A single answerable blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub text: String,
    pub answer: String,
}

/// One authored line with its clozes extracted.
///
/// `clozes[i]` is always the answer of `problems[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceWithClozes {
    pub original: String,
    pub display_sentence: String,
    pub clozes: Vec<String>,
    pub problems: Vec<Problem>,
}

/// Named, persisted set of raw authored lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: Option<String>,
    pub raw_problems: Vec<String>,
}

impl Collection {
    /// Create an unsaved collection.
    pub fn new(title: Option<String>, raw_problems: Vec<String>) -> Self {
        Self {
            id: None,
            title,
            raw_problems,
        }
    }

    /// Copy of this collection with blank lines removed.
    pub fn cleaned(&self) -> Self {
        Self {
            id: self.id,
            title: self.title.clone(),
            raw_problems: self
                .raw_problems
                .iter()
                .filter(|line| !line.trim().is_empty())
                .cloned()
                .collect(),
        }
    }
}

/// Word similarity metric used by the fuzzy matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    Dice,
    Levenshtein,
}

impl Default for SimilarityMetric {
    fn default() -> Self {
        Self::Dice
    }
}

impl SimilarityMetric {
    /// Get the metric name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dice => "dice",
            Self::Levenshtein => "levenshtein",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dice" => Some(Self::Dice),
            "levenshtein" => Some(Self::Levenshtein),
            _ => None,
        }
    }
}

/// Tunable parameters of the keyword matcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatcherSettings {
    /// Minimum per-word similarity for a keyword to count as present.
    pub similarity_threshold: f64,
    /// Minimum share of keywords that must be present.
    pub overall_threshold: f64,
    pub metric: SimilarityMetric,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.7,
            overall_threshold: 0.7,
            metric: SimilarityMetric::default(),
        }
    }
}
