//! Main Entrypoint for the Interview API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Loading the prompt templates.
//! 3. Initializing the language model and speech clients.
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use interview_api::{config::Config, router::create_router, speech::SpeechClient, state::AppState};
use interview_core::{
    SessionStore,
    llm_client::{ChatCompletion, OpenAICompatibleClient},
    prompts::PromptTemplates,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal. Shutting down gracefully..."),
        Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Load Prompts ---
    let prompts = match &config.prompts_path {
        Some(path) => {
            PromptTemplates::from_dir(path).context("Failed to load prompt templates")?
        }
        None => PromptTemplates::default(),
    };

    // --- 4. Initialize Shared Services ---
    info!(provider = ?config.provider, api_base = %config.api_base, "Using model provider.");
    let openai_config = OpenAIConfig::new()
        .with_api_key(&config.api_key)
        .with_api_base(&config.api_base);
    let llm: Arc<dyn ChatCompletion> = Arc::new(OpenAICompatibleClient::new(
        openai_config,
        config.primary_model.clone(),
        config.fallback_model.clone(),
    ));

    let app_state = Arc::new(AppState {
        sessions: Arc::new(SessionStore::new()),
        llm,
        prompts: Arc::new(prompts),
        speech: Arc::new(SpeechClient::new(&config)),
        config: Arc::new(config.clone()),
    });

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 6. Start Server ---
    info!(
        primary_model = %config.primary_model,
        fallback_model = %config.fallback_model,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
