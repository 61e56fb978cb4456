//! Error types for cloze-core.

use thiserror::Error;

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Conditions reported by the quiz session. None of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no questions loaded")]
    NoQuestions,

    #[error("no current problem; reload to retry")]
    QueueExhausted,
}
