//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the interview REST API, the speech passthrough, and OpenAPI
//! documentation.

use crate::{
    handlers,
    models::{
        ChatRequest, ChatResponse, ErrorResponse, FeedbackRequest, StartInterviewResponse,
        TranscribeUpload, TranscriptionResponse, TtsRequest,
    },
    state::AppState,
};

use axum::{Router, routing::post};
use interview_core::{FeedbackResponse, InterviewConfig, profiles::Gender};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::start_interview,
        handlers::chat,
        handlers::feedback_result,
        handlers::transcribe,
        handlers::text_to_speech,
    ),
    components(
        schemas(
            InterviewConfig, StartInterviewResponse, ChatRequest, ChatResponse,
            FeedbackRequest, FeedbackResponse, TranscribeUpload, TranscriptionResponse,
            TtsRequest, Gender, ErrorResponse
        )
    ),
    tags(
        (name = "Interview API", description = "Mock interview sessions with an AI interviewer")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/start_interview", post(handlers::start_interview))
        .route("/chat", post(handlers::chat))
        .route("/feedback_result", post(handlers::feedback_result))
        .route("/transcribe", post(handlers::transcribe))
        .route("/tts", post(handlers::text_to_speech))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
