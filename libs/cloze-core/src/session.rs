//! Quiz progression state.
//!
//! [`SessionState`] is a plain value: every transition returns a new state and
//! never touches the old one. [`QuizSession`] wraps it together with the
//! matcher and the cached collection list for front ends that want a single
//! mutable handle.
//!
//! Checking an answer never moves the cursor. Callers advance explicitly with
//! [`SessionState::advanced`] / [`QuizSession::advance`] once they have shown
//! the verdict.

use crate::error::{Result, SessionError};
use crate::matching::{KeywordMatcher, MatchReport};
use crate::parser;
use crate::store::CollectionStore;
use crate::types::{Collection, Problem, SentenceWithClozes};
use serde::{Deserialize, Serialize};

/// Top-level phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No question set loaded.
    Unloaded,
    /// Loaded, with a current problem.
    InProgress,
    /// Loaded, cursor at the end of the queue.
    Exhausted,
}

/// Loaded questions, the flattened problem queue and the cursor into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    questions: Vec<SentenceWithClozes>,
    problem_queue: Vec<Problem>,
    current_problem_index: usize,
}

impl SessionState {
    /// Empty, unloaded state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from free text. Surrounding whitespace is trimmed before parsing.
    pub fn from_text(raw: &str) -> Self {
        Self::from_questions(parser::parse(raw.trim()))
    }

    /// Load from a stored collection.
    pub fn from_collection(collection: &Collection) -> Self {
        Self::from_questions(parser::parse_collection(collection))
    }

    /// Load already parsed questions, building the queue in source order.
    pub fn from_questions(questions: Vec<SentenceWithClozes>) -> Self {
        let problem_queue = build_queue(&questions);
        Self {
            questions,
            problem_queue,
            current_problem_index: 0,
        }
    }

    pub fn has_loaded(&self) -> bool {
        !self.questions.is_empty()
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.has_loaded() {
            SessionPhase::Unloaded
        } else if self.is_exhausted() {
            SessionPhase::Exhausted
        } else {
            SessionPhase::InProgress
        }
    }

    /// Rebuilt queue with the cursor back at the start. Fails if nothing is loaded.
    pub fn reloaded(&self) -> Result<Self> {
        if !self.has_loaded() {
            return Err(SessionError::NoQuestions);
        }
        Ok(Self::from_questions(self.questions.clone()))
    }

    /// Cursor moved to the next problem, stopping at the queue length.
    pub fn advanced(mut self) -> Self {
        if self.current_problem_index < self.problem_queue.len() {
            self.current_problem_index += 1;
        }
        self
    }

    pub fn current_problem(&self) -> Option<&Problem> {
        self.problem_queue.get(self.current_problem_index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_problem_index >= self.problem_queue.len()
    }

    /// Judge `input` against the current problem.
    ///
    /// Returns `Ok(None)` for blank input, which is not a wrong answer.
    pub fn check_answer(&self, input: &str, matcher: &KeywordMatcher) -> Result<Option<bool>> {
        Ok(self
            .evaluate_answer(input, matcher)?
            .map(|report| report.is_match))
    }

    /// Like [`check_answer`](Self::check_answer) but with per-keyword detail.
    pub fn evaluate_answer(
        &self,
        input: &str,
        matcher: &KeywordMatcher,
    ) -> Result<Option<MatchReport>> {
        let problem = self.current_problem().ok_or(SessionError::QueueExhausted)?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        Ok(Some(matcher.evaluate(&problem.answer, input)))
    }

    pub fn questions(&self) -> &[SentenceWithClozes] {
        &self.questions
    }

    pub fn problem_queue(&self) -> &[Problem] {
        &self.problem_queue
    }

    pub fn current_problem_index(&self) -> usize {
        self.current_problem_index
    }

    /// `(answered, total)` for display.
    pub fn progress(&self) -> (usize, usize) {
        (self.current_problem_index, self.problem_queue.len())
    }
}

fn build_queue(questions: &[SentenceWithClozes]) -> Vec<Problem> {
    questions
        .iter()
        .flat_map(|q| q.problems.iter().cloned())
        .collect()
}

/// Mutable session handle: state, matcher and cached collections.
#[derive(Debug, Default)]
pub struct QuizSession {
    state: SessionState,
    matcher: KeywordMatcher,
    quiz_collections: Vec<Collection>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matcher(matcher: KeywordMatcher) -> Self {
        Self {
            matcher,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    pub fn has_loaded(&self) -> bool {
        self.state.has_loaded()
    }

    pub fn load_from_text(&mut self, raw: &str) {
        self.state = SessionState::from_text(raw);
        tracing::debug!(
            questions = self.state.questions().len(),
            problems = self.state.problem_queue().len(),
            "loaded quiz from text"
        );
    }

    pub fn load_from_collection(&mut self, collection: &Collection) {
        self.state = SessionState::from_collection(collection);
        tracing::debug!(
            collection_id = ?collection.id,
            questions = self.state.questions().len(),
            problems = self.state.problem_queue().len(),
            "loaded quiz from collection"
        );
    }

    /// Restart from the first problem. State is untouched on error.
    pub fn reload(&mut self) -> Result<()> {
        match self.state.reloaded() {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("cannot reload quiz: {}", e);
                Err(e)
            }
        }
    }

    pub fn check_answer(&self, input: &str) -> Result<Option<bool>> {
        self.state.check_answer(input, &self.matcher)
    }

    pub fn evaluate_answer(&self, input: &str) -> Result<Option<MatchReport>> {
        self.state.evaluate_answer(input, &self.matcher)
    }

    pub fn advance(&mut self) {
        self.state = std::mem::take(&mut self.state).advanced();
    }

    pub fn current_problem(&self) -> Option<&Problem> {
        self.state.current_problem()
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.is_exhausted()
    }

    /// Collections cached by the last [`load_all_collections`](Self::load_all_collections).
    pub fn collections(&self) -> &[Collection] {
        &self.quiz_collections
    }

    pub fn load_all_collections<S: CollectionStore>(
        &mut self,
        store: &S,
    ) -> std::result::Result<(), S::Error> {
        self.quiz_collections = store.get_all()?;
        Ok(())
    }

    /// Save with blank lines removed. Returns the stored id.
    pub fn save_collection<S: CollectionStore>(
        &self,
        store: &mut S,
        collection: &Collection,
    ) -> std::result::Result<i64, S::Error> {
        let id = store.set(&collection.cleaned())?;
        tracing::info!(id, "saved collection");
        Ok(id)
    }

    pub fn delete_collection<S: CollectionStore>(
        &self,
        store: &mut S,
        id: i64,
    ) -> std::result::Result<(), S::Error> {
        store.delete(id)?;
        tracing::info!(id, "deleted collection");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    const SCIENCE: &str = "Water freezes at [0] degrees Celsius.\nThe chemical symbol for gold is [Au].\nThe human body has [206] bones.";

    #[test]
    fn new_state_is_unloaded() {
        let state = SessionState::new();
        assert!(!state.has_loaded());
        assert_eq!(state.phase(), SessionPhase::Unloaded);
        assert!(state.current_problem().is_none());
    }

    #[test]
    fn load_from_text_builds_queue() {
        let state = SessionState::from_text("  A [a] and [b].\n\nB [c].  ");
        assert!(state.has_loaded());
        assert_eq!(state.phase(), SessionPhase::InProgress);
        assert_eq!(state.questions().len(), 2);
        assert_eq!(state.problem_queue().len(), 3);
        assert_eq!(state.current_problem_index(), 0);
        assert_eq!(state.current_problem().map(|p| p.answer.as_str()), Some("a"));
    }

    #[test]
    fn queue_length_matches_problem_count() {
        let state = SessionState::from_text(SCIENCE);
        let expected: usize = state.questions().iter().map(|q| q.problems.len()).sum();
        assert_eq!(state.problem_queue().len(), expected);

        let reloaded = state.advanced().reloaded().unwrap();
        assert_eq!(reloaded.problem_queue().len(), expected);
    }

    #[test]
    fn end_to_end_freezing_point() {
        let state = SessionState::from_text("Water freezes at [0] degrees Celsius.");
        let matcher = KeywordMatcher::new();
        assert_eq!(state.check_answer("0", &matcher), Ok(Some(true)));
        assert_eq!(state.check_answer("32", &matcher), Ok(Some(false)));
    }

    #[test]
    fn check_answer_does_not_advance() {
        let state = SessionState::from_text(SCIENCE);
        let matcher = KeywordMatcher::new();
        state.check_answer("0", &matcher).unwrap();
        assert_eq!(state.current_problem_index(), 0);
    }

    #[test]
    fn blank_input_gives_no_verdict() {
        let state = SessionState::from_text(SCIENCE);
        let matcher = KeywordMatcher::new();
        assert_eq!(state.check_answer("   ", &matcher), Ok(None));
        assert_eq!(state.check_answer("", &matcher), Ok(None));
    }

    #[test]
    fn exhausted_queue_is_reported() {
        let matcher = KeywordMatcher::new();
        let state = SessionState::from_text("One is [1].");
        let state = state.advanced();

        assert!(state.is_exhausted());
        assert_eq!(state.phase(), SessionPhase::Exhausted);
        assert_eq!(state.check_answer("1", &matcher), Err(SessionError::QueueExhausted));
        // Exhaustion wins over blank input.
        assert_eq!(state.check_answer("", &matcher), Err(SessionError::QueueExhausted));
    }

    #[test]
    fn unloaded_check_is_exhausted() {
        let state = SessionState::new();
        let matcher = KeywordMatcher::new();
        assert_eq!(state.check_answer("x", &matcher), Err(SessionError::QueueExhausted));
    }

    #[test]
    fn advance_saturates_at_queue_length() {
        let state = SessionState::from_text("[a] [b]");
        let state = state.advanced().advanced().advanced();
        assert_eq!(state.current_problem_index(), 2);
        assert_eq!(state.progress(), (2, 2));
    }

    #[test]
    fn reload_unloaded_fails_without_change() {
        let state = SessionState::new();
        assert_eq!(state.reloaded(), Err(SessionError::NoQuestions));

        let mut session = QuizSession::new();
        assert_eq!(session.reload(), Err(SessionError::NoQuestions));
        assert_eq!(session.state(), &SessionState::new());
    }

    #[test]
    fn reload_resets_cursor_in_original_order() {
        let state = SessionState::from_text(SCIENCE);
        let original: Vec<Problem> = state.problem_queue().to_vec();

        let finished = state.advanced().advanced().advanced();
        assert!(finished.is_exhausted());

        let reloaded = finished.reloaded().unwrap();
        assert_eq!(reloaded.current_problem_index(), 0);
        assert_eq!(reloaded.problem_queue(), original.as_slice());
    }

    #[test]
    fn text_without_clozes_is_loaded_but_exhausted() {
        let state = SessionState::from_text("No blanks here.");
        assert!(state.has_loaded());
        assert_eq!(state.phase(), SessionPhase::Exhausted);
    }

    #[test]
    fn loading_replaces_previous_state() {
        let mut session = QuizSession::new();
        session.load_from_text(SCIENCE);
        session.advance();
        session.load_from_text("Only [one].");

        assert_eq!(session.state().problem_queue().len(), 1);
        assert_eq!(session.state().current_problem_index(), 0);
    }

    #[test]
    fn session_walks_through_quiz() {
        let mut session = QuizSession::new();
        session.load_from_text(SCIENCE);

        assert_eq!(session.check_answer("0"), Ok(Some(true)));
        session.advance();
        assert_eq!(session.check_answer("au"), Ok(Some(true)));
        session.advance();
        assert_eq!(session.check_answer("207"), Ok(Some(false)));
        session.advance();

        assert!(session.is_exhausted());
        assert_eq!(session.check_answer("anything"), Err(SessionError::QueueExhausted));

        session.reload().unwrap();
        assert_eq!(session.current_problem().map(|p| p.answer.as_str()), Some("0"));
    }

    #[test]
    fn session_uses_injected_matcher() {
        let strict = KeywordMatcher::new().with_thresholds(1.0, 1.0);
        let mut session = QuizSession::with_matcher(strict);
        session.load_from_text("The process is called [photosynthesis].");
        assert_eq!(session.check_answer("photosynthesys"), Ok(Some(false)));
        assert_eq!(session.check_answer("Photosynthesis"), Ok(Some(true)));
    }

    #[test]
    fn load_from_collection() {
        let collection = Collection::new(
            Some("Geo".to_string()),
            vec!["Capital of Japan is [Tokyo].".to_string(), "".to_string()],
        );
        let mut session = QuizSession::new();
        session.load_from_collection(&collection);

        assert_eq!(session.state().questions().len(), 1);
        assert_eq!(
            session.current_problem(),
            Some(&Problem {
                text: "Capital of Japan is _____.".to_string(),
                answer: "Tokyo".to_string(),
            })
        );
    }

    #[test]
    fn collections_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let mut session = QuizSession::new();

        let id = session
            .save_collection(
                &mut store,
                &Collection::new(
                    Some("Colors".to_string()),
                    vec!["Sky is [blue].".to_string(), "  ".to_string()],
                ),
            )
            .unwrap();

        session.load_all_collections(&store).unwrap();
        assert_eq!(session.collections().len(), 1);
        assert_eq!(session.collections()[0].id, Some(id));
        assert_eq!(session.collections()[0].raw_problems, vec!["Sky is [blue]."]);

        session.delete_collection(&mut store, id).unwrap();
        session.load_all_collections(&store).unwrap();
        assert!(session.collections().is_empty());
    }

    #[test]
    fn saving_existing_collection_keeps_id() {
        let mut store = MemoryStore::new();
        let session = QuizSession::new();

        let id = session
            .save_collection(&mut store, &Collection::new(None, vec!["[a]".to_string()]))
            .unwrap();
        let updated = Collection {
            id: Some(id),
            title: Some("Renamed".to_string()),
            raw_problems: vec!["[b]".to_string()],
        };
        assert_eq!(session.save_collection(&mut store, &updated).unwrap(), id);
        assert_eq!(store.get_all().unwrap().len(), 1);
        assert_eq!(store.get(id).unwrap(), Some(updated));
    }

    #[test]
    fn saving_with_largest_id_is_not_fatal() {
        let mut store = MemoryStore::new();
        let session = QuizSession::new();
        let pinned = Collection {
            id: Some(i64::MAX),
            title: None,
            raw_problems: vec!["[x]".to_string()],
        };

        assert_eq!(session.save_collection(&mut store, &pinned).unwrap(), i64::MAX);
        let next = session
            .save_collection(&mut store, &Collection::new(None, vec!["[y]".to_string()]))
            .unwrap();
        assert_ne!(next, i64::MAX);
        assert_eq!(store.get_all().unwrap().len(), 2);
    }
}
