//! Speech Passthrough
//!
//! Forwards audio transcription and speech synthesis to the provider's
//! OpenAI-compatible audio endpoints. Nothing here touches session state.

use crate::config::Config;
use anyhow::{Context, Result};
use bytes::Bytes;
use interview_core::profiles::{self, Gender};
use rand::Rng;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

#[derive(Deserialize)]
struct TranscriptionReply {
    text: String,
}

pub struct SpeechClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    transcription_model: String,
    tts_model: String,
}

impl SpeechClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            transcription_model: config.transcription_model.clone(),
            tts_model: config.tts_model.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path)
    }

    /// Transcribes an uploaded audio clip to text.
    pub async fn transcribe(&self, file_name: String, audio: Bytes) -> Result<String> {
        let form = Form::new()
            .part("file", Part::bytes(audio.to_vec()).file_name(file_name))
            .text("model", self.transcription_model.clone())
            .text("response_format", "json");

        let reply: TranscriptionReply = self
            .http
            .post(self.endpoint("audio/transcriptions"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .context("Transcription request failed")?
            .error_for_status()
            .context("Transcription provider returned an error")?
            .json()
            .await
            .context("Transcription reply was not valid JSON")?;

        Ok(reply.text)
    }

    /// Synthesizes `text` as MP3 audio in the given voice.
    pub async fn synthesize(&self, text: &str, voice: &str) -> Result<Bytes> {
        info!(voice, chars = text.chars().count(), "Synthesizing speech");
        let body = json!({
            "model": self.tts_model,
            "voice": voice,
            "input": text,
            "response_format": "mp3",
        });

        let audio = self
            .http
            .post(self.endpoint("audio/speech"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Speech synthesis request failed")?
            .error_for_status()
            .context("Speech provider returned an error")?
            .bytes()
            .await
            .context("Failed to read synthesized audio")?;

        Ok(audio)
    }
}

/// Picks the voice for a synthesis request: an explicit voice wins, then a
/// gender-appropriate default, then the catalogue-wide default.
pub fn resolve_voice<R: Rng + ?Sized>(
    voice: Option<&str>,
    gender: Option<Gender>,
    rng: &mut R,
) -> String {
    match (voice.map(str::trim).filter(|v| !v.is_empty()), gender) {
        (Some(voice), _) => voice.to_string(),
        (None, Some(gender)) => profiles::default_voice_for_gender(gender, rng).to_string(),
        (None, None) => profiles::DEFAULT_VOICE.to_string(),
    }
}
