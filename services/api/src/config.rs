use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Defines the supported OpenAI-compatible model providers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provider {
    Groq,
    OpenAI,
}

impl Provider {
    fn api_key_var(&self) -> &'static str {
        match self {
            Provider::Groq => "GROQ_API_KEY",
            Provider::OpenAI => "OPENAI_API_KEY",
        }
    }

    fn default_api_base(&self) -> &'static str {
        match self {
            Provider::Groq => "https://api.groq.com/openai/v1",
            Provider::OpenAI => "https://api.openai.com/v1",
        }
    }

    fn default_models(&self) -> (&'static str, &'static str) {
        match self {
            Provider::Groq => (
                "meta-llama/llama-4-maverick-17b-128e-instruct",
                "llama-3.3-70b-versatile",
            ),
            Provider::OpenAI => ("gpt-4o", "gpt-4o-mini"),
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub provider: Provider,
    pub api_key: String,
    pub api_base: String,
    pub primary_model: String,
    pub fallback_model: String,
    pub transcription_model: String,
    pub tts_model: String,
    pub request_timeout: Duration,
    pub log_level: Level,
    pub prompts_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let provider_str = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "groq".to_string());
        let provider = match provider_str.to_lowercase().as_str() {
            "groq" => Provider::Groq,
            "openai" => Provider::OpenAI,
            other => {
                return Err(ConfigError::InvalidValue(
                    "LLM_PROVIDER".to_string(),
                    format!("'{}' is not one of 'groq', 'openai'", other),
                ));
            }
        };

        let api_key = std::env::var(provider.api_key_var()).map_err(|_| {
            ConfigError::MissingVar(format!(
                "{} must be set for '{}' provider",
                provider.api_key_var(),
                provider_str.to_lowercase()
            ))
        })?;

        let api_base = std::env::var("LLM_API_BASE")
            .unwrap_or_else(|_| provider.default_api_base().to_string());

        let (default_primary, default_fallback) = provider.default_models();
        let primary_model =
            std::env::var("PRIMARY_MODEL").unwrap_or_else(|_| default_primary.to_string());
        let fallback_model =
            std::env::var("FALLBACK_MODEL").unwrap_or_else(|_| default_fallback.to_string());

        let transcription_model = std::env::var("TRANSCRIPTION_MODEL")
            .unwrap_or_else(|_| "whisper-large-v3".to_string());
        let tts_model = std::env::var("TTS_MODEL").unwrap_or_else(|_| "playai-tts".to_string());

        let timeout_str =
            std::env::var("REQUEST_TIMEOUT_SECS").unwrap_or_else(|_| "90".to_string());
        let request_timeout = timeout_str
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "REQUEST_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a positive number of seconds", timeout_str),
                )
            })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let prompts_path = std::env::var("PROMPTS_PATH").ok().map(PathBuf::from);

        Ok(Self {
            bind_address,
            provider,
            api_key,
            api_base,
            primary_model,
            fallback_model,
            transcription_model,
            tts_model,
            request_timeout,
            log_level,
            prompts_path,
        })
    }
}
