//! Error types shared by the interview core.

use uuid::Uuid;

/// A single completion attempt against one model tier failed.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("provider rejected the request: {0}")]
    Api(String),
    #[error("provider returned no message content")]
    EmptyResponse,
    #[error("could not build completion request: {0}")]
    InvalidRequest(String),
}

/// The model's feedback reply could not be turned into a `FeedbackResponse`.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackParseError {
    #[error("reply is not a valid feedback object: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("{field} must be between 0 and 100, got {value}")]
    ScoreOutOfRange { field: &'static str, value: i64 },
}

/// Errors surfaced by sessions and the session store.
#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    #[error("completion unavailable on both tiers (primary: {primary}; fallback: {fallback})")]
    CompletionUnavailable {
        primary: CompletionError,
        fallback: CompletionError,
    },
    #[error(transparent)]
    FeedbackParse(#[from] FeedbackParseError),
    #[error("invalid interview configuration: {0}")]
    InvalidConfig(String),
    #[error("session '{0}' not found")]
    SessionNotFound(Uuid),
    #[error("session '{0}' is already processing a request")]
    SessionBusy(Uuid),
    #[error("session '{0}' already exists")]
    SessionExists(Uuid),
    #[error("prompt template error: {0}")]
    Prompt(String),
}

pub type Result<T, E = InterviewError> = std::result::Result<T, E>;
