use crate::{
    error::{CompletionError, InterviewError, Result},
    types::{Message, Role},
};
use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse, ResponseFormat,
    },
};
use async_trait::async_trait;
use tracing::{error, warn};

/// One of the two configured model backends, tried in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Primary,
    Fallback,
}

/// Sampling parameters for a single completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub top_p: f32,
    /// Response-length ceiling. `None` leaves it to the provider.
    pub max_tokens: Option<u32>,
    /// Ask the provider to constrain the reply to a JSON object.
    pub json_mode: bool,
    pub tier: ModelTier,
}

impl CompletionOptions {
    /// Settings for an interview turn.
    pub fn conversation() -> Self {
        Self {
            temperature: 0.7,
            top_p: 1.0,
            max_tokens: Some(500),
            json_mode: false,
            tier: ModelTier::Primary,
        }
    }

    /// Settings for the end-of-interview evaluation.
    pub fn feedback() -> Self {
        Self {
            temperature: 0.5,
            top_p: 1.0,
            max_tokens: None,
            json_mode: true,
            tier: ModelTier::Primary,
        }
    }

    pub fn with_tier(self, tier: ModelTier) -> Self {
        Self { tier, ..self }
    }
}

/// A text-generation capability: given role-tagged messages, return a reply.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Makes a single, non-streaming completion call against `options.tier`.
    async fn complete(
        &self,
        messages: Vec<Message>,
        options: CompletionOptions,
    ) -> std::result::Result<String, CompletionError>;
}

/// Runs a completion on the primary tier, retrying once on the fallback tier.
///
/// The fallback receives the identical message list and options. If it also
/// fails, both errors are returned together; there is no further retry.
pub async fn complete_with_fallback(
    llm: &dyn ChatCompletion,
    messages: Vec<Message>,
    options: CompletionOptions,
) -> Result<String> {
    let primary = match llm
        .complete(messages.clone(), options.with_tier(ModelTier::Primary))
        .await
    {
        Ok(reply) => return Ok(reply),
        Err(e) => e,
    };

    warn!(error = %primary, "Primary model unavailable, falling back to secondary tier");

    llm.complete(messages, options.with_tier(ModelTier::Fallback))
        .await
        .map_err(|fallback| {
            error!(primary = %primary, fallback = %fallback, "Both model tiers failed");
            InterviewError::CompletionUnavailable { primary, fallback }
        })
}

/// An implementation of `ChatCompletion` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    primary_model: String,
    fallback_model: String,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - API key and base URL of the provider.
    /// * `primary_model` - Model identifier for the high-capability tier.
    /// * `fallback_model` - Model identifier tried when the primary fails.
    pub fn new(config: OpenAIConfig, primary_model: String, fallback_model: String) -> Self {
        Self {
            client: Client::with_config(config),
            primary_model,
            fallback_model,
        }
    }

    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Primary => &self.primary_model,
            ModelTier::Fallback => &self.fallback_model,
        }
    }
}

fn to_request_message(
    message: Message,
) -> std::result::Result<ChatCompletionRequestMessage, OpenAIError> {
    Ok(match message.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content)
            .build()?
            .into(),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content)
            .build()?
            .into(),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(message.content)
            .build()?
            .into(),
    })
}

impl From<OpenAIError> for CompletionError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::ApiError(api) => CompletionError::Api(api.message),
            OpenAIError::InvalidArgument(msg) => CompletionError::InvalidRequest(msg),
            other => CompletionError::Transport(other.to_string()),
        }
    }
}

#[async_trait]
impl ChatCompletion for OpenAICompatibleClient {
    async fn complete(
        &self,
        messages: Vec<Message>,
        options: CompletionOptions,
    ) -> std::result::Result<String, CompletionError> {
        let messages = messages
            .into_iter()
            .map(to_request_message)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model_for(options.tier))
            .messages(messages)
            .temperature(options.temperature)
            .top_p(options.top_p)
            .stream(false);
        if let Some(max_tokens) = options.max_tokens {
            args.max_completion_tokens(max_tokens);
        }
        if options.json_mode {
            args.response_format(ResponseFormat::JsonObject);
        }
        let request = args.build()?;

        let response: CreateChatCompletionResponse = self.client.chat().create(request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }
}
