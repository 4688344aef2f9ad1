//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the session store
//! and all shared, clonable service clients.

use crate::{config::Config, speech::SpeechClient};
use interview_core::{SessionStore, llm_client::ChatCompletion, prompts::PromptTemplates};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub llm: Arc<dyn ChatCompletion>,
    pub prompts: Arc<PromptTemplates>,
    pub speech: Arc<SpeechClient>,
    pub config: Arc<Config>,
}
