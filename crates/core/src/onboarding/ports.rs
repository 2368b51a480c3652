//! Port interfaces for onboarding
//!
//! Implemented by the HTTP gateway in `pathwise-infra`.

use async_trait::async_trait;
use pathwise_domain::{
    AnswerSubmission, CareerTrack, Interest, OnboardingQuestion, Preferences, Result, User,
};

#[async_trait]
pub trait OnboardingGateway: Send + Sync {
    /// Interest catalogue to choose from
    async fn list_interests(&self) -> Result<Vec<Interest>>;

    /// Replace the user's interests (by name)
    async fn update_interests(&self, names: &[String]) -> Result<User>;

    async fn list_questions(&self) -> Result<Vec<OnboardingQuestion>>;

    /// Persist one answer
    async fn submit_answer(&self, submission: &AnswerSubmission) -> Result<()>;

    async fn update_preferences(&self, preferences: &Preferences) -> Result<User>;

    /// Tracks recommended from the user's saved interests, best match first
    async fn recommendations(&self) -> Result<Vec<CareerTrack>>;

    /// Replace the user's selected career paths (1 to 4 ids, in order)
    async fn select_career_paths(&self, track_ids: &[i64]) -> Result<User>;
}
