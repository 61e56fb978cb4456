//! Cloze quiz engine shared by front ends.
//!
//! Provides:
//! - Cloze parser for bracket-annotated text (`The capital of Japan is [Tokyo].`)
//! - Keyword fuzzy matcher for typed answers (Dice or Levenshtein word similarity)
//! - Quiz session state with an explicit cursor over the problem queue
//! - Collection storage boundary and an in-memory store
//! - Conversion of index-annotated remote decks into cloze text

pub mod deck;
pub mod error;
pub mod matching;
pub mod parser;
pub mod samples;
pub mod session;
pub mod similarity;
pub mod store;
pub mod types;

pub use deck::{DeckCard, DeckDocument, TestableSegment};
pub use error::{Result, SessionError};
pub use matching::{keyword_fuzzy_match, KeywordMatch, KeywordMatcher, MatchReport, Stopwords};
pub use parser::parse;
pub use session::{QuizSession, SessionPhase, SessionState};
pub use similarity::{DiceCoefficient, NormalizedLevenshtein, Similarity};
pub use store::{CollectionStore, MemoryStore};
pub use types::{
    Collection, MatcherSettings, Problem, SentenceWithClozes, SimilarityMetric, BLANK,
};
