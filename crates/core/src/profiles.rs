//! Interviewer Profile Registry
//!
//! A fixed catalogue of interviewer personas. Each persona carries a display
//! name, a perceived gender, and the speech-synthesis voice used to read its
//! replies aloud. Selection is a pure function of the supplied random source.

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Perceived gender of a persona, used for flavor and fallback voice choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// A named, voiced identity presented to the candidate as the interviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterviewerProfile {
    pub name: &'static str,
    pub gender: Gender,
    /// Opaque voice token passed through to speech synthesis.
    pub voice: &'static str,
}

const fn profile(name: &'static str, gender: Gender, voice: &'static str) -> InterviewerProfile {
    InterviewerProfile {
        name,
        gender,
        voice,
    }
}

/// The full catalogue. Never empty.
pub static INTERVIEWER_PROFILES: [InterviewerProfile; 14] = [
    // English / American
    profile("Emma Richardson", Gender::Female, "Ruby-PlayAI"),
    profile("Sarah Mitchell", Gender::Female, "Eleanor-PlayAI"),
    profile("Jennifer Hayes", Gender::Female, "Jennifer-PlayAI"),
    profile("James Anderson", Gender::Male, "Mason-PlayAI"),
    profile("Michael Chen", Gender::Male, "Calum-PlayAI"),
    profile("Robert Williams", Gender::Male, "Mitch-PlayAI"),
    // Australian
    profile("Adelaide Harper", Gender::Female, "Adelaide-PlayAI"),
    profile("Sophie Thompson", Gender::Female, "Celeste-PlayAI"),
    profile("Liam O'Connor", Gender::Male, "Cillian-PlayAI"),
    profile("Noah Bennett", Gender::Male, "Briggs-PlayAI"),
    // Indian
    profile("Priya Sharma", Gender::Female, "Aaliyah-PlayAI"),
    profile("Ananya Patel", Gender::Female, "Nia-PlayAI"),
    profile("Arjun Kumar", Gender::Male, "Mikail-PlayAI"),
    profile("Rohan Mehta", Gender::Male, "Angelo-PlayAI"),
];

const MALE_FALLBACK_VOICES: [&str; 4] = [
    "Mason-PlayAI",
    "Calum-PlayAI",
    "Mitch-PlayAI",
    "Cillian-PlayAI",
];

const FEMALE_FALLBACK_VOICES: [&str; 4] = [
    "Ruby-PlayAI",
    "Eleanor-PlayAI",
    "Jennifer-PlayAI",
    "Celeste-PlayAI",
];

/// Voice used when a synthesis request names neither a voice nor a gender.
pub const DEFAULT_VOICE: &str = "Ruby-PlayAI";

/// Picks a persona uniformly at random from the catalogue.
pub fn select_random<R: Rng + ?Sized>(rng: &mut R) -> InterviewerProfile {
    // The catalogue is a non-empty static array, so `choose` always yields.
    INTERVIEWER_PROFILES
        .choose(rng)
        .copied()
        .unwrap_or(INTERVIEWER_PROFILES[0])
}

/// Picks a voice for `gender` when a persona has no explicit voice.
pub fn default_voice_for_gender<R: Rng + ?Sized>(gender: Gender, rng: &mut R) -> &'static str {
    let voices: &[&'static str] = match gender {
        Gender::Male => &MALE_FALLBACK_VOICES,
        Gender::Female => &FEMALE_FALLBACK_VOICES,
    };
    voices.choose(rng).copied().unwrap_or(DEFAULT_VOICE)
}
