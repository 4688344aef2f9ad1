use crate::error::{FeedbackParseError, InterviewError};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One role-tagged entry of the interview transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Parameters supplied once when an interview starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InterviewConfig {
    #[schema(example = "Backend Engineer")]
    pub role: String,
    #[schema(example = "Medium")]
    pub difficulty: String,
    #[serde(default)]
    pub resume_text: Option<String>,
}

impl InterviewConfig {
    pub fn new(role: impl Into<String>, difficulty: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            difficulty: difficulty.into(),
            resume_text: None,
        }
    }

    pub fn with_resume(mut self, resume_text: impl Into<String>) -> Self {
        self.resume_text = Some(resume_text.into());
        self
    }

    /// Rejects blank required fields.
    pub fn validate(&self) -> Result<(), InterviewError> {
        if self.role.trim().is_empty() {
            return Err(InterviewError::InvalidConfig("role must not be empty".into()));
        }
        if self.difficulty.trim().is_empty() {
            return Err(InterviewError::InvalidConfig(
                "difficulty must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// The resume text, if one was supplied and it is not blank.
    pub fn resume(&self) -> Option<&str> {
        self.resume_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// The structured evaluation produced once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackResponse {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    #[schema(minimum = 0, maximum = 100)]
    pub technical_score: u8,
    #[schema(minimum = 0, maximum = 100)]
    pub communication_score: u8,
    pub overall_feedback: String,
}

/// Wire shape of the model's reply, before range checks.
#[derive(Deserialize)]
struct RawFeedback {
    strengths: Vec<String>,
    improvements: Vec<String>,
    technical_score: i64,
    communication_score: i64,
    overall_feedback: String,
}

impl FeedbackResponse {
    /// The fixed report returned when a session had too little interaction
    /// to be evaluated.
    pub fn insufficient_interaction() -> Self {
        Self {
            strengths: vec!["Showed up for the interview".to_string()],
            improvements: vec![
                "Insufficient interaction to provide meaningful feedback. Please engage more fully with the interview questions.".to_string(),
                "Try to provide detailed answers to at least 2-3 questions to receive a comprehensive evaluation.".to_string(),
            ],
            technical_score: 0,
            communication_score: 0,
            overall_feedback: "Unable to provide a comprehensive assessment due to insufficient interview interaction. To receive detailed feedback, please engage with multiple interview questions and provide substantive answers. This allows for a proper evaluation of your technical knowledge and communication skills.".to_string(),
        }
    }

    /// Parses and validates a model reply.
    ///
    /// The reply is untrusted: every field must be present with the right
    /// type and both scores must lie in `0..=100`. A surrounding markdown code
    /// fence is tolerated; anything else is an error.
    pub fn from_model_reply(reply: &str) -> Result<Self, FeedbackParseError> {
        let raw: RawFeedback = serde_json::from_str(strip_code_fence(reply))?;
        Ok(Self {
            strengths: raw.strengths,
            improvements: raw.improvements,
            technical_score: score("technical_score", raw.technical_score)?,
            communication_score: score("communication_score", raw.communication_score)?,
            overall_feedback: raw.overall_feedback,
        })
    }
}

fn score(field: &'static str, value: i64) -> Result<u8, FeedbackParseError> {
    match u8::try_from(value) {
        Ok(v) if v <= 100 => Ok(v),
        _ => Err(FeedbackParseError::ScoreOutOfRange { field, value }),
    }
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop an optional language tag such as `json` on the opening fence line.
    match body.split_once('\n') {
        Some((tag, inner)) if !tag.trim_start().starts_with('{') => inner.trim(),
        _ => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "strengths": ["Explained hash map lookups clearly"],
        "improvements": ["Discuss failure modes of caching"],
        "technical_score": 72,
        "communication_score": 80,
        "overall_feedback": "Solid fundamentals."
    }"#;

    #[test]
    fn test_parse_valid_feedback() {
        let feedback = FeedbackResponse::from_model_reply(VALID).unwrap();
        assert_eq!(feedback.technical_score, 72);
        assert_eq!(feedback.communication_score, 80);
        assert_eq!(feedback.strengths, vec!["Explained hash map lookups clearly"]);
        assert_eq!(feedback.overall_feedback, "Solid fundamentals.");
    }

    #[test]
    fn test_parse_tolerates_code_fence() {
        let fenced = format!("```json\n{}\n```", VALID);
        let feedback = FeedbackResponse::from_model_reply(&fenced).unwrap();
        assert_eq!(feedback.technical_score, 72);

        let bare_fence = format!("```{}```", VALID);
        assert!(FeedbackResponse::from_model_reply(&bare_fence).is_ok());
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let reply = r#"{"strengths": [], "improvements": [], "technical_score": 0,
            "communication_score": 100, "overall_feedback": "", "confidence": "high"}"#;
        let feedback = FeedbackResponse::from_model_reply(reply).unwrap();
        assert_eq!(feedback.communication_score, 100);
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let reply = r#"{"strengths": [], "improvements": [], "technical_score": 50,
            "overall_feedback": "ok"}"#;
        let err = FeedbackResponse::from_model_reply(reply).unwrap_err();
        assert!(matches!(err, FeedbackParseError::Malformed(_)));
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let reply = r#"{"strengths": "great", "improvements": [], "technical_score": 50,
            "communication_score": 50, "overall_feedback": "ok"}"#;
        assert!(matches!(
            FeedbackResponse::from_model_reply(reply),
            Err(FeedbackParseError::Malformed(_))
        ));

        let reply = r#"{"strengths": [], "improvements": [], "technical_score": "50",
            "communication_score": 50, "overall_feedback": "ok"}"#;
        assert!(matches!(
            FeedbackResponse::from_model_reply(reply),
            Err(FeedbackParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_scores_out_of_range() {
        let reply = r#"{"strengths": [], "improvements": [], "technical_score": 101,
            "communication_score": 50, "overall_feedback": "ok"}"#;
        match FeedbackResponse::from_model_reply(reply) {
            Err(FeedbackParseError::ScoreOutOfRange { field, value }) => {
                assert_eq!(field, "technical_score");
                assert_eq!(value, 101);
            }
            other => panic!("expected ScoreOutOfRange, got {:?}", other),
        }

        let reply = r#"{"strengths": [], "improvements": [], "technical_score": 10,
            "communication_score": -5, "overall_feedback": "ok"}"#;
        assert!(matches!(
            FeedbackResponse::from_model_reply(reply),
            Err(FeedbackParseError::ScoreOutOfRange {
                field: "communication_score",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = FeedbackResponse::from_model_reply("Great job overall!").unwrap_err();
        assert!(matches!(err, FeedbackParseError::Malformed(_)));
    }

    #[test]
    fn test_insufficient_interaction_report() {
        let feedback = FeedbackResponse::insufficient_interaction();
        assert_eq!(feedback.strengths, vec!["Showed up for the interview"]);
        assert_eq!(feedback.improvements.len(), 2);
        assert_eq!(feedback.technical_score, 0);
        assert_eq!(feedback.communication_score, 0);
        assert!(!feedback.overall_feedback.is_empty());
    }

    #[test]
    fn test_config_validation() {
        assert!(InterviewConfig::new("Backend Engineer", "Medium").validate().is_ok());
        assert!(matches!(
            InterviewConfig::new("  ", "Medium").validate(),
            Err(InterviewError::InvalidConfig(_))
        ));
        assert!(matches!(
            InterviewConfig::new("Backend Engineer", "").validate(),
            Err(InterviewError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_resume_ignores_blank_text() {
        let config = InterviewConfig::new("SRE", "Hard").with_resume("   ");
        assert_eq!(config.resume(), None);
        let config = InterviewConfig::new("SRE", "Hard").with_resume("Ran on-call for 3 years");
        assert_eq!(config.resume(), Some("Ran on-call for 3 years"));
    }

    #[test]
    fn test_config_deserializes_without_resume() {
        let config: InterviewConfig =
            serde_json::from_str(r#"{"role": "Backend Engineer", "difficulty": "Medium"}"#).unwrap();
        assert_eq!(config.resume_text, None);

        let missing: Result<InterviewConfig, _> = serde_json::from_str(r#"{"role": "x"}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_message_constructors_and_role_display() {
        assert_eq!(Message::system("s").role, Role::System);
        assert_eq!(Message::user("u").role, Role::User);
        assert_eq!(Message::assistant("a").role, Role::Assistant);
        assert_eq!(format!("{}", Role::Assistant), "assistant");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }
}
