//! Axum Handlers for the REST API
//!
//! This module maps the interview routes onto the core session store and the
//! speech passthrough. It uses `utoipa` doc comments to generate OpenAPI
//! documentation.

use axum::{
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use interview_core::{
    FeedbackResponse, FinalizeOutcome, InterviewConfig, InterviewError, InterviewSession,
    profiles,
};
use std::{future::Future, sync::Arc};
use tracing::{error, info, warn};

use crate::{
    models::{
        ChatRequest, ChatResponse, ErrorResponse, FeedbackRequest, StartInterviewResponse,
        TranscribeUpload, TranscriptionResponse, TtsRequest,
    },
    speech::resolve_voice,
    state::AppState,
};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
    GatewayTimeout,
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message),
            ApiError::GatewayTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "The interviewer took too long to respond. Please try again.".to_string(),
            ),
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<InterviewError> for ApiError {
    fn from(err: InterviewError) -> Self {
        match err {
            InterviewError::InvalidConfig(message) => ApiError::BadRequest(message),
            InterviewError::SessionNotFound(_) => ApiError::NotFound("Session not found".into()),
            InterviewError::SessionBusy(_) => ApiError::Conflict(
                "This session is still processing a previous message.".into(),
            ),
            err @ InterviewError::CompletionUnavailable { .. } => {
                error!(error = %err, "Language model unavailable");
                ApiError::BadGateway("Unable to generate response. Please try again.".into())
            }
            err @ InterviewError::FeedbackParse(_) => {
                error!(error = %err, "Feedback reply rejected");
                ApiError::BadGateway("Unable to generate feedback. Please try again.".into())
            }
            other => ApiError::InternalServerError(other.into()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalServerError(err)
    }
}

/// Bounds a whole core operation, fallback attempt included.
async fn with_timeout<T>(
    state: &AppState,
    operation: impl Future<Output = Result<T, InterviewError>>,
) -> Result<T, ApiError> {
    match tokio::time::timeout(state.config.request_timeout, operation).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(_) => {
            warn!(timeout = ?state.config.request_timeout, "Model call timed out");
            Err(ApiError::GatewayTimeout)
        }
    }
}

/// Start a new mock interview and return the interviewer's greeting.
#[utoipa::path(
    post,
    path = "/start_interview",
    request_body = InterviewConfig,
    responses(
        (status = 201, description = "Interview started", body = StartInterviewResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 502, description = "Language model unavailable", body = ErrorResponse),
        (status = 504, description = "Language model timed out", body = ErrorResponse)
    )
)]
pub async fn start_interview(
    State(state): State<Arc<AppState>>,
    Json(config): Json<InterviewConfig>,
) -> Result<impl IntoResponse, ApiError> {
    let interviewer = profiles::select_random(&mut rand::rng());

    let (session, greeting) = with_timeout(
        &state,
        InterviewSession::start(
            config,
            interviewer,
            state.prompts.clone(),
            state.llm.as_ref(),
        ),
    )
    .await?;

    let session_id = state.sessions.insert(session).await;
    info!(%session_id, interviewer = interviewer.name, "Interview started");

    Ok((
        StatusCode::CREATED,
        Json(StartInterviewResponse {
            session_id,
            greeting,
            interviewer_name: interviewer.name.to_string(),
            interviewer_voice: interviewer.voice.to_string(),
        }),
    ))
}

/// Send the candidate's next message and receive the interviewer's reply.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Interviewer reply", body = ChatResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "Session busy", body = ErrorResponse),
        (status = 502, description = "Language model unavailable", body = ErrorResponse),
        (status = 504, description = "Language model timed out", body = ErrorResponse)
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = with_timeout(
        &state,
        state
            .sessions
            .advance(payload.session_id, state.llm.as_ref(), &payload.message),
    )
    .await?;
    Ok(Json(ChatResponse { response }))
}

/// End the interview and return the structured evaluation. The session is
/// discarded.
#[utoipa::path(
    post,
    path = "/feedback_result",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Interview feedback", body = FeedbackResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "Session busy", body = ErrorResponse),
        (status = 502, description = "Language model unavailable or reply unusable", body = ErrorResponse),
        (status = 504, description = "Language model timed out", body = ErrorResponse)
    )
)]
pub async fn feedback_result(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let outcome = with_timeout(
        &state,
        state
            .sessions
            .finalize(payload.session_id, state.llm.as_ref()),
    )
    .await?;

    if let FinalizeOutcome::InsufficientInteraction(_) = outcome {
        info!(session_id = %payload.session_id, "Returned insufficient-interaction feedback");
    }
    Ok(Json(outcome.into_feedback()))
}

/// Transcribe a recorded answer to text.
#[utoipa::path(
    post,
    path = "/transcribe",
    request_body(content = TranscribeUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Transcript", body = TranscriptionResponse),
        (status = 400, description = "Missing audio", body = ErrorResponse),
        (status = 500, description = "Transcription failed", body = ErrorResponse)
    )
)]
pub async fn transcribe(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("audio") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("audio.webm").to_string();
        let audio = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        if audio.is_empty() {
            return Err(ApiError::BadRequest("Audio file is empty".into()));
        }

        let transcript = state.speech.transcribe(file_name, audio).await?;
        return Ok(Json(TranscriptionResponse { transcript }));
    }

    Err(ApiError::BadRequest("An 'audio' file field is required".into()))
}

/// Convert interviewer text to speech.
#[utoipa::path(
    post,
    path = "/tts",
    request_body = TtsRequest,
    responses(
        (status = 200, description = "MP3 audio", body = Vec<u8>, content_type = "audio/mpeg"),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Synthesis failed", body = ErrorResponse)
    )
)]
pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TtsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text is required".into()));
    }
    let voice = resolve_voice(payload.voice.as_deref(), payload.gender, &mut rand::rng());

    let audio = state.speech.synthesize(&payload.text, &voice).await?;
    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio))
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_core::{CompletionError, FeedbackParseError};
    use uuid::Uuid;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_interview_error_status_mapping() {
        let id = Uuid::new_v4();
        assert_eq!(
            status_of(InterviewError::InvalidConfig("role must not be empty".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(InterviewError::SessionNotFound(id)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(InterviewError::SessionBusy(id)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(InterviewError::CompletionUnavailable {
                primary: CompletionError::EmptyResponse,
                fallback: CompletionError::EmptyResponse,
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(InterviewError::FeedbackParse(
                FeedbackParseError::ScoreOutOfRange {
                    field: "technical_score",
                    value: 300,
                }
            )),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(InterviewError::SessionExists(id)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_timeout_and_internal_errors() {
        assert_eq!(
            ApiError::GatewayTimeout.into_response().status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_of(anyhow::anyhow!("disk on fire")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
