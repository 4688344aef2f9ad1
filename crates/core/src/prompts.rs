//! Prompt Templates
//!
//! The interviewer's system prompt and the feedback-extraction instruction.
//! Both ship compiled into the crate and may be overridden from a directory of
//! markdown files at startup.

use crate::{
    error::{InterviewError, Result},
    profiles::InterviewerProfile,
    types::InterviewConfig,
};
use std::{fs, path::Path};
use tracing::info;

const INTERVIEWER_TEMPLATE: &str = include_str!("../prompts/interviewer.md");
const FEEDBACK_INSTRUCTION: &str = include_str!("../prompts/feedback.md");

/// The two templates that steer an interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    /// System prompt with `{name}`, `{role}`, `{difficulty}` and
    /// `{resume_section}` placeholders.
    pub interviewer: String,
    /// Appended as a final user message when the interview is evaluated.
    pub feedback: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            interviewer: INTERVIEWER_TEMPLATE.to_string(),
            feedback: FEEDBACK_INSTRUCTION.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Loads `interviewer.md` and `feedback.md` from `dir`, keeping the
    /// built-in template for any file that is absent.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(InterviewError::Prompt(format!(
                "'{}' is not a directory",
                dir.display()
            )));
        }

        let mut templates = Self::default();
        for (file, slot) in [
            ("interviewer.md", &mut templates.interviewer),
            ("feedback.md", &mut templates.feedback),
        ] {
            let path = dir.join(file);
            if !path.is_file() {
                continue;
            }
            let content = fs::read_to_string(&path).map_err(|e| {
                InterviewError::Prompt(format!("failed to read '{}': {}", path.display(), e))
            })?;
            if content.trim().is_empty() {
                return Err(InterviewError::Prompt(format!(
                    "'{}' is empty",
                    path.display()
                )));
            }
            info!(path = %path.display(), "Loaded prompt override");
            *slot = content;
        }
        Ok(templates)
    }

    /// Renders the interviewer system prompt for one session.
    pub fn interviewer_prompt(
        &self,
        interviewer: &InterviewerProfile,
        config: &InterviewConfig,
    ) -> String {
        let resume_section = config
            .resume()
            .map(|resume| format!("\nCandidate's Resume Context:\n{}\n", resume))
            .unwrap_or_default();

        render(
            &self.interviewer,
            &[
                ("name", interviewer.name),
                ("role", &config.role),
                ("difficulty", &config.difficulty),
                ("resume_section", &resume_section),
            ],
        )
    }
}

/// Substitutes `{key}` placeholders in a single pass.
///
/// Substituted values are never rescanned, and braces that do not enclose a
/// known key are copied through unchanged.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((v, close)) => {
                out.push_str(v);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
