//! Port interfaces for the dashboard

use async_trait::async_trait;
use pathwise_domain::{CareerProgress, CareerTrack, Result, User};

#[async_trait]
pub trait DashboardGateway: Send + Sync {
    /// The signed-in user, fetched fresh
    async fn current_user(&self) -> Result<User>;

    /// Progress records for every track the user has started
    async fn progress(&self) -> Result<Vec<CareerProgress>>;

    /// Tracks with the given ids, in server order
    async fn career_tracks(&self, ids: &[i64]) -> Result<Vec<CareerTrack>>;

    /// Skill tags derived from onboarding answers
    async fn skill_tags(&self) -> Result<Vec<String>>;
}
