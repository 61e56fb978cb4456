//! Keyword-based fuzzy answer matching.
//!
//! Both answers are lower-cased, dashes become spaces, and the result is split
//! on whitespace. Stopwords are removed from the expected answer only. Each
//! remaining keyword must be found somewhere in the typed answer, either by
//! exact equality for numbers or by similarity score for anything else. The
//! answer is accepted when enough keywords were found.

use crate::similarity::{self, DiceCoefficient, Similarity};
use crate::types::MatcherSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Default English stopword list.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "else", "on", "in", "with", "at", "by",
    "for", "from", "of", "to", "up", "down", "over", "under", "as", "is", "are", "was", "were",
    "be", "been", "being", "that", "this", "these", "those", "it", "its", "he", "she", "they",
    "them", "his", "her", "their", "you", "your", "yours", "we", "our", "ours", "i", "me", "my",
    "mine",
];

/// Characters treated as word separators in addition to whitespace.
const DASHES: &[char] = &['-', '\u{2010}', '\u{2011}', '\u{2013}', '\u{2014}'];

/// Set of words that carry no weight in the expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwords(HashSet<String>);

impl Stopwords {
    /// The default English list.
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS.iter().copied())
    }

    /// Empty set; every word counts.
    pub fn none() -> Self {
        Self(HashSet::new())
    }

    /// Custom list. Words are stored lower-cased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        )
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::english()
    }
}

/// How one keyword of the expected answer fared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    /// Normalized keyword from the expected answer.
    pub word: String,
    /// First typed word accepted for it, if any.
    pub matched_with: Option<String>,
}

/// Detailed outcome of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Whether the answer is considered correct.
    pub is_match: bool,
    pub matched_words: usize,
    pub total_words: usize,
    /// `matched_words / total_words`, or 0.0 without keywords.
    pub overall: f64,
    pub keywords: Vec<KeywordMatch>,
}

/// Fuzzy matcher with injectable thresholds, stopwords and similarity metric.
pub struct KeywordMatcher {
    similarity_threshold: f64,
    overall_threshold: f64,
    stopwords: Stopwords,
    similarity: Box<dyn Similarity>,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        let settings = MatcherSettings::default();
        Self {
            similarity_threshold: settings.similarity_threshold,
            overall_threshold: settings.overall_threshold,
            stopwords: Stopwords::english(),
            similarity: Box::new(DiceCoefficient),
        }
    }
}

impl fmt::Debug for KeywordMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordMatcher")
            .field("similarity_threshold", &self.similarity_threshold)
            .field("overall_threshold", &self.overall_threshold)
            .field("stopwords", &self.stopwords.len())
            .field("similarity", &self.similarity.name())
            .finish()
    }
}

impl KeywordMatcher {
    /// Matcher with the default thresholds (0.7 / 0.7), English stopwords and Dice similarity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher configured from settings, with English stopwords.
    pub fn from_settings(settings: &MatcherSettings) -> Self {
        Self {
            similarity_threshold: settings.similarity_threshold,
            overall_threshold: settings.overall_threshold,
            stopwords: Stopwords::english(),
            similarity: similarity::for_metric(settings.metric),
        }
    }

    pub fn with_thresholds(mut self, similarity_threshold: f64, overall_threshold: f64) -> Self {
        self.similarity_threshold = similarity_threshold;
        self.overall_threshold = overall_threshold;
        self
    }

    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_similarity(mut self, similarity: Box<dyn Similarity>) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    pub fn overall_threshold(&self) -> f64 {
        self.overall_threshold
    }

    /// Whether `input` is an acceptable answer for `correct`.
    pub fn is_match(&self, correct: &str, input: &str) -> bool {
        self.evaluate(correct, input).is_match
    }

    /// Compare and report per-keyword results.
    pub fn evaluate(&self, correct: &str, input: &str) -> MatchReport {
        let normalized_correct = normalize(correct);
        let normalized_input = normalize(input);

        let correct_words: Vec<&str> = normalized_correct
            .split_whitespace()
            .filter(|w| !self.stopwords.contains(w))
            .collect();
        let input_words: Vec<&str> = normalized_input.split_whitespace().collect();

        let keywords: Vec<KeywordMatch> = correct_words
            .iter()
            .map(|cw| KeywordMatch {
                word: cw.to_string(),
                matched_with: input_words
                    .iter()
                    .find(|sw| self.words_match(cw, sw))
                    .map(|sw| sw.to_string()),
            })
            .collect();

        let total_words = keywords.len();
        let matched_words = keywords.iter().filter(|k| k.matched_with.is_some()).count();

        // Nothing left to check: an empty or all-stopword answer never matches.
        if total_words == 0 {
            return MatchReport {
                is_match: false,
                matched_words: 0,
                total_words: 0,
                overall: 0.0,
                keywords,
            };
        }

        let overall = matched_words as f64 / total_words as f64;
        MatchReport {
            is_match: overall >= self.overall_threshold,
            matched_words,
            total_words,
            overall,
            keywords,
        }
    }

    fn words_match(&self, correct_word: &str, input_word: &str) -> bool {
        if is_number(correct_word) && is_number(input_word) {
            return correct_word == input_word;
        }
        self.similarity.similarity(correct_word, input_word) >= self.similarity_threshold
    }
}

/// Match with default thresholds, stopwords and metric.
pub fn keyword_fuzzy_match(correct: &str, input: &str) -> bool {
    KeywordMatcher::new().is_match(correct, input)
}

/// Lower-case, turn dashes into spaces and trim.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if DASHES.contains(&c) { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::NormalizedLevenshtein;
    use pretty_assertions::assert_eq;

    #[test]
    fn handles_empty_keyword() {
        assert!(!keyword_fuzzy_match("", "hello"));
        assert!(!keyword_fuzzy_match("", ""));
        assert!(!keyword_fuzzy_match("   ", "anything"));
    }

    #[test]
    fn handles_surrounding_whitespace() {
        assert!(keyword_fuzzy_match(" Water", "water"));
        assert!(keyword_fuzzy_match("Water ", "water"));
    }

    #[test]
    fn handles_multiple_words() {
        assert!(keyword_fuzzy_match("Meta AI", "meta ai"));
    }

    #[test]
    fn handles_simplified_answers() {
        assert!(keyword_fuzzy_match("The Lion King", "lion king"));
    }

    #[test]
    fn word_order_is_irrelevant() {
        assert!(keyword_fuzzy_match("Lion King", "King Lion"));
    }

    #[test]
    fn identical_answers_always_match() {
        for answer in [
            "Tokyo",
            "Mount Everest",
            "Spider-Man",
            "206",
            "Au",
            "x",
            "Natural Disaster Survival",
        ] {
            assert!(keyword_fuzzy_match(answer, answer), "{answer}");
            assert!(keyword_fuzzy_match(answer, &answer.to_uppercase()), "{answer}");
        }
    }

    #[test]
    fn numbers_require_exact_equality() {
        assert!(!keyword_fuzzy_match("19", "90"));
        assert!(!keyword_fuzzy_match("206", "207"));
        assert!(keyword_fuzzy_match("206", "206"));
        assert!(keyword_fuzzy_match("0", "0"));
        assert!(!keyword_fuzzy_match("0", "32"));
    }

    #[test]
    fn dashes_split_words() {
        assert!(keyword_fuzzy_match("Spider-Man", "spider man"));
        assert!(keyword_fuzzy_match("Spider Man", "spider\u{2014}man"));
        assert_eq!(normalize("  Spider\u{2013}Man "), "spider man");
    }

    #[test]
    fn tolerates_small_typos() {
        assert!(keyword_fuzzy_match("photosynthesis", "photosynthesys"));
        assert!(!keyword_fuzzy_match("Jupiter", "Saturn"));
    }

    #[test]
    fn all_stopword_answer_never_matches() {
        assert!(!keyword_fuzzy_match("The", "the"));
        assert!(!keyword_fuzzy_match("it is", "it is"));
    }

    #[test]
    fn input_stopwords_are_kept() {
        // "the" is a stopword only on the expected side, so it can still be matched against.
        let report = KeywordMatcher::new().evaluate("the mitochondria", "the mitochondria");
        assert_eq!(report.total_words, 1);
        assert_eq!(report.matched_words, 1);
    }

    #[test]
    fn overall_threshold_allows_missing_minority() {
        let matcher = KeywordMatcher::new();
        // 3 of 4 keywords present: 0.75 >= 0.7
        assert!(matcher.is_match("red green blue yellow", "red green blue"));
        // 2 of 4: 0.5 < 0.7
        assert!(!matcher.is_match("red green blue yellow", "red green"));
    }

    #[test]
    fn report_lists_first_matching_word() {
        let report = KeywordMatcher::new().evaluate("Harry Potter", "potter harry harry");
        assert_eq!(
            report.keywords,
            vec![
                KeywordMatch {
                    word: "harry".to_string(),
                    matched_with: Some("harry".to_string()),
                },
                KeywordMatch {
                    word: "potter".to_string(),
                    matched_with: Some("potter".to_string()),
                },
            ]
        );
        assert_eq!(report.overall, 1.0);
        assert!(report.is_match);
    }

    #[test]
    fn empty_report_for_stopword_answer() {
        let report = KeywordMatcher::new().evaluate("the", "the");
        assert!(!report.is_match);
        assert_eq!(report.total_words, 0);
        assert_eq!(report.overall, 0.0);
    }

    #[test]
    fn custom_thresholds() {
        let strict = KeywordMatcher::new().with_thresholds(1.0, 1.0);
        assert!(!strict.is_match("photosynthesis", "photosynthesys"));
        assert!(strict.is_match("Photosynthesis", "photosynthesis"));

        let lenient = KeywordMatcher::new().with_thresholds(0.7, 0.5);
        assert!(lenient.is_match("red green blue yellow", "red green"));
    }

    #[test]
    fn custom_stopwords() {
        let matcher = KeywordMatcher::new().with_stopwords(Stopwords::from_words(["der", "die", "das"]));
        assert!(matcher.is_match("Das Boot", "boot"));
        // English articles now count as keywords
        assert!(!matcher.is_match("The Lion King", "lion"));

        let none = KeywordMatcher::new().with_stopwords(Stopwords::none());
        assert!(none.is_match("The", "the"));
    }

    #[test]
    fn custom_similarity() {
        let matcher = KeywordMatcher::new().with_similarity(Box::new(NormalizedLevenshtein));
        // kitten/sitting: 1 - 3/7 < 0.7
        assert!(!matcher.is_match("kitten", "sitting"));
        // mars/mers: 1 - 1/4 = 0.75
        assert!(matcher.is_match("Mars", "mers"));
    }

    #[test]
    fn from_settings_uses_metric() {
        let settings = MatcherSettings {
            metric: crate::types::SimilarityMetric::Levenshtein,
            ..MatcherSettings::default()
        };
        let matcher = KeywordMatcher::from_settings(&settings);
        assert!(format!("{matcher:?}").contains("levenshtein"));
        assert_eq!(matcher.similarity_threshold(), 0.7);
        assert_eq!(matcher.overall_threshold(), 0.7);
    }
}
