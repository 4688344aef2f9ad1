//! Interview Session
//!
//! The state machine for a single mock interview. A session owns its
//! transcript, its interviewer persona and a count of substantive candidate
//! turns. It can be advanced one user turn at a time and evaluated once at
//! the end.

use crate::{
    error::Result,
    llm_client::{ChatCompletion, CompletionOptions, complete_with_fallback},
    profiles::InterviewerProfile,
    prompts::PromptTemplates,
    types::{FeedbackResponse, InterviewConfig, Message},
};
use std::sync::Arc;
use tracing::{debug, info};

/// The synthetic first turn that elicits the persona's self-introduction.
pub const OPENING_MESSAGE: &str = "Hello, I'm ready for the interview.";

/// Sessions with fewer substantive turns than this are not sent for evaluation.
pub const MIN_SUBSTANTIVE_TURNS: u32 = 2;

const GREETINGS: [&str; 3] = ["hello", "hi", "hey"];

/// Whether a user message is long and specific enough to count toward
/// feedback eligibility.
pub fn is_substantive(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.chars().count() > 10 && !GREETINGS.contains(&trimmed.to_lowercase().as_str())
}

/// Result of finalizing a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// The model evaluated the transcript.
    Evaluated(FeedbackResponse),
    /// Too little interaction; the fixed report was returned without
    /// calling the model.
    InsufficientInteraction(FeedbackResponse),
}

impl FinalizeOutcome {
    pub fn feedback(&self) -> &FeedbackResponse {
        match self {
            FinalizeOutcome::Evaluated(f) | FinalizeOutcome::InsufficientInteraction(f) => f,
        }
    }

    pub fn into_feedback(self) -> FeedbackResponse {
        match self {
            FinalizeOutcome::Evaluated(f) | FinalizeOutcome::InsufficientInteraction(f) => f,
        }
    }
}

/// One conversation between a candidate and an interviewer persona.
#[derive(Debug)]
pub struct InterviewSession {
    config: InterviewConfig,
    interviewer: InterviewerProfile,
    prompts: Arc<PromptTemplates>,
    /// `history[0]` is always the system prompt; user/assistant entries follow.
    history: Vec<Message>,
    substantive_turns: u32,
}

impl InterviewSession {
    /// Builds a session with its system prompt in place and no turns taken.
    ///
    /// No model call is made; use [`InterviewSession::start`] to also obtain
    /// the opening greeting.
    pub fn new(
        config: InterviewConfig,
        interviewer: InterviewerProfile,
        prompts: Arc<PromptTemplates>,
    ) -> Result<Self> {
        config.validate()?;
        let system_prompt = prompts.interviewer_prompt(&interviewer, &config);
        Ok(Self {
            config,
            interviewer,
            prompts,
            history: vec![Message::system(system_prompt)],
            substantive_turns: 0,
        })
    }

    /// Creates a session and immediately runs the synthetic opening turn,
    /// returning the session together with the persona's greeting.
    pub async fn start(
        config: InterviewConfig,
        interviewer: InterviewerProfile,
        prompts: Arc<PromptTemplates>,
        llm: &dyn ChatCompletion,
    ) -> Result<(Self, String)> {
        let mut session = Self::new(config, interviewer, prompts)?;
        let greeting = session.turn(llm, OPENING_MESSAGE, false).await?;
        info!(
            interviewer = %session.interviewer.name,
            role = %session.config.role,
            difficulty = %session.config.difficulty,
            "Interview session started"
        );
        Ok((session, greeting))
    }

    /// Advances the dialogue by one user turn and returns the interviewer's
    /// reply.
    ///
    /// The user message stays in the history even if both model tiers fail;
    /// the assistant reply is appended only on success.
    pub async fn advance(&mut self, llm: &dyn ChatCompletion, user_text: &str) -> Result<String> {
        self.turn(llm, user_text, true).await
    }

    /// The synthetic opening turn is sent with `classify` off so that it never
    /// counts toward feedback eligibility.
    async fn turn(
        &mut self,
        llm: &dyn ChatCompletion,
        user_text: &str,
        classify: bool,
    ) -> Result<String> {
        self.history.push(Message::user(user_text));

        if classify {
            let substantive = is_substantive(user_text);
            if substantive {
                self.substantive_turns += 1;
            }
            debug!(
                substantive,
                substantive_turns = self.substantive_turns,
                "Classified user turn"
            );
        }

        let reply = complete_with_fallback(
            llm,
            self.history.clone(),
            CompletionOptions::conversation(),
        )
        .await?;

        self.history.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    /// Evaluates the interview.
    ///
    /// Below [`MIN_SUBSTANTIVE_TURNS`] the fixed insufficient-interaction
    /// report is returned and the model is never called. Otherwise the
    /// feedback instruction is appended to a copy of the history and the reply
    /// is parsed as strict JSON. The session's own history is left untouched.
    pub async fn finalize(&self, llm: &dyn ChatCompletion) -> Result<FinalizeOutcome> {
        if self.substantive_turns < MIN_SUBSTANTIVE_TURNS {
            info!(
                substantive_turns = self.substantive_turns,
                "Skipping evaluation: insufficient interaction"
            );
            return Ok(FinalizeOutcome::InsufficientInteraction(
                FeedbackResponse::insufficient_interaction(),
            ));
        }

        let mut messages = self.history.clone();
        messages.push(Message::user(self.prompts.feedback.clone()));

        let reply = complete_with_fallback(llm, messages, CompletionOptions::feedback()).await?;
        let feedback = FeedbackResponse::from_model_reply(&reply)?;

        info!(
            technical_score = feedback.technical_score,
            communication_score = feedback.communication_score,
            "Interview evaluated"
        );
        Ok(FinalizeOutcome::Evaluated(feedback))
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn interviewer(&self) -> &InterviewerProfile {
        &self.interviewer
    }

    pub fn config(&self) -> &InterviewConfig {
        &self.config
    }

    pub fn substantive_turns(&self) -> u32 {
        self.substantive_turns
    }
}
