//! User profile types

use serde::{Deserialize, Serialize};

/// Authenticated user as returned by `GET /api/users/me/`
///
/// Fetched fresh for every protected view and never cached across views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub streak: u32,
    /// Interest names chosen during onboarding.
    #[serde(default)]
    pub interests: Vec<String>,
    /// Career track ids in the order the user picked them (at most four).
    #[serde(default)]
    pub selected_career_paths: Vec<i64>,
    #[serde(default)]
    pub onboarding_complete: bool,
}

impl User {
    pub fn has_selected_paths(&self) -> bool {
        !self.selected_career_paths.is_empty()
    }
}
