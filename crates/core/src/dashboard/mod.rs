//! Dashboard aggregation
//!
//! Combines the user, their track progress, their selected tracks and their
//! skill tags into one view. Only the user fetch is fatal; the other
//! fetches degrade to inline errors according to whether the user has
//! selected paths.

pub mod ports;

use std::sync::Arc;

use pathwise_domain::{CareerProgress, CareerTrack, Result, User};
use serde::Serialize;
use tracing::{instrument, warn};

pub use ports::DashboardGateway;

use crate::progress::{LevelProgress, TrackProgress};
use crate::routing::Route;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackCard {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub emoji: Option<String>,
    pub avg_salary: Option<String>,
    pub progress: TrackProgress,
    /// First learning page of the track.
    pub learning_path: String,
}

impl TrackCard {
    fn new(track: CareerTrack, progress: &[CareerProgress]) -> Self {
        let record = progress.iter().find(|p| p.career.id == track.id);
        let learning_path = Route::LearningPage { slug: track.slug.clone(), page: 1 }.path();
        Self {
            id: track.id,
            slug: track.slug,
            title: track.title,
            emoji: track.emoji,
            avg_salary: track.avg_salary,
            progress: TrackProgress::from_record(record),
            learning_path,
        }
    }
}

/// What the main panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardStatus {
    /// Onboarding not finished: call to action to start it.
    StartOnboarding,
    /// Onboarding finished but no paths chosen yet.
    ChoosePaths,
    Tracks { cards: Vec<TrackCard> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub username: String,
    pub level: LevelProgress,
    pub streak: u32,
    pub skill_tags: Vec<String>,
    pub status: DashboardStatus,
    /// Non-fatal fetch failures, as user-facing messages.
    pub errors: Vec<String>,
}

pub struct DashboardService {
    gateway: Arc<dyn DashboardGateway>,
}

impl DashboardService {
    pub fn new(gateway: Arc<dyn DashboardGateway>) -> Self {
        Self { gateway }
    }

    /// # Errors
    /// Fails when the user cannot be fetched, or when any fetch was
    /// rejected for authentication.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<DashboardView> {
        let user = self.gateway.current_user().await?;
        let has_paths = user.has_selected_paths();

        let (progress, tracks, tags) = futures::join!(
            self.gateway.progress(),
            self.selected_tracks(&user),
            self.gateway.skill_tags(),
        );

        let mut errors = Vec::new();
        let progress = tolerate(progress, has_paths, "career progress", &mut errors)?;
        let tracks = tolerate(tracks, has_paths, "selected career tracks", &mut errors)?;
        let skill_tags = tolerate(tags, !has_paths, "skill tags", &mut errors)?;

        let status = if !user.onboarding_complete {
            DashboardStatus::StartOnboarding
        } else if tracks.is_empty() {
            DashboardStatus::ChoosePaths
        } else {
            DashboardStatus::Tracks {
                cards: tracks.into_iter().map(|t| TrackCard::new(t, &progress)).collect(),
            }
        };

        Ok(DashboardView {
            username: user.username,
            level: LevelProgress::from_xp(user.xp),
            streak: user.streak,
            skill_tags,
            status,
            errors,
        })
    }

    /// Selected tracks in the user's selection order.
    async fn selected_tracks(&self, user: &User) -> Result<Vec<CareerTrack>> {
        if !user.has_selected_paths() {
            return Ok(Vec::new());
        }
        let mut fetched = self.gateway.career_tracks(&user.selected_career_paths).await?;
        Ok(user
            .selected_career_paths
            .iter()
            .filter_map(|id| {
                let pos = fetched.iter().position(|t| t.id == *id)?;
                Some(fetched.swap_remove(pos))
            })
            .collect())
    }
}

/// Turn a failed secondary fetch into an empty value plus, when `relevant`,
/// an inline error. Authentication rejections always propagate.
fn tolerate<T: Default>(
    result: Result<T>,
    relevant: bool,
    what: &str,
    errors: &mut Vec<String>,
) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.requires_login() => Err(e),
        Err(e) => {
            warn!(error = %e, what, relevant, "Dashboard fetch failed");
            if relevant {
                errors.push(format!("Failed to fetch {what}: {}", e.user_message()));
            }
            Ok(T::default())
        }
    }
}

