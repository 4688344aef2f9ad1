//! API Models
//!
//! Request and response bodies for the HTTP surface, annotated for OpenAPI
//! documentation with `utoipa`.

use interview_core::profiles::Gender;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct StartInterviewResponse {
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
    pub greeting: String,
    #[schema(example = "Priya Sharma")]
    pub interviewer_name: String,
    #[schema(example = "Aaliyah-PlayAI")]
    pub interviewer_voice: String,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct ChatRequest {
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
    #[schema(example = "I would put a read-through cache in front of the database.")]
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct FeedbackRequest {
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct TtsRequest {
    pub text: String,
    /// Voice identifier; usually the one returned by `/start_interview`.
    #[serde(default)]
    pub voice: Option<String>,
    /// Used to pick a voice when none is given.
    #[serde(default)]
    pub gender: Option<Gender>,
}

/// Multipart upload accepted by `/transcribe`. Documentation only.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct TranscribeUpload {
    #[schema(value_type = String, format = Binary)]
    pub audio: Vec<u8>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct TranscriptionResponse {
    pub transcript: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_interview_response_field_names() {
        let response = StartInterviewResponse {
            session_id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
            greeting: "Hi, I'm Noah.".to_string(),
            interviewer_name: "Noah Bennett".to_string(),
            interviewer_voice: "Briggs-PlayAI".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["session_id"], "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(json["greeting"], "Hi, I'm Noah.");
        assert_eq!(json["interviewer_name"], "Noah Bennett");
        assert_eq!(json["interviewer_voice"], "Briggs-PlayAI");
    }

    #[test]
    fn test_chat_request_deserialization() {
        let json = r#"{"session_id": "550e8400-e29b-41d4-a716-446655440000", "message": "Hello"}"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.message, "Hello");
        assert_eq!(
            request.session_id.to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_chat_request_rejects_bad_session_id() {
        let json = r#"{"session_id": "not-a-uuid", "message": "Hello"}"#;
        let result: Result<ChatRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_feedback_request_missing_field() {
        let result: Result<FeedbackRequest, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_tts_request_optional_fields() {
        let request: TtsRequest = serde_json::from_str(r#"{"text": "Welcome"}"#).unwrap();
        assert_eq!(request.text, "Welcome");
        assert!(request.voice.is_none());
        assert!(request.gender.is_none());

        let request: TtsRequest =
            serde_json::from_str(r#"{"text": "Welcome", "gender": "male"}"#).unwrap();
        assert_eq!(request.gender, Some(Gender::Male));
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse {
            message: "Session not found".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"message":"Session not found"}"#);
    }
}
