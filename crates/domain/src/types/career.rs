//! Interests, career tracks and per-track progress

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Selectable interest (`GET /api/interests/`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// Career track as served by the catalogue and recommendation endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerTrack {
    pub id: i64,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub relevant_interests: Vec<Interest>,
}

/// One user's progress on one track (`GET /api/progress/`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerProgress {
    pub id: i64,
    pub career: CareerTrack,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub days_completed: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempt: Option<DateTime<Utc>>,
}

/// `{ "skill_tags": [...] }` derived server-side from onboarding answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTags {
    #[serde(default)]
    pub skill_tags: Vec<String>,
}
