//! Interview Core
//!
//! Session state machine and prompt orchestration for simulated job
//! interviews. The crate is transport-agnostic: it talks to a language model
//! through the [`llm_client::ChatCompletion`] trait and keeps live sessions in
//! an explicit [`store::SessionStore`].

pub mod error;
pub mod llm_client;
pub mod profiles;
pub mod prompts;
pub mod session;
pub mod store;
pub mod types;

pub use error::{CompletionError, FeedbackParseError, InterviewError};
pub use session::{FinalizeOutcome, InterviewSession};
pub use store::SessionStore;
pub use types::{FeedbackResponse, InterviewConfig, Message, Role};
