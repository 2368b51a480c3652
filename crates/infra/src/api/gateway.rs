//! REST implementations of the core ports
//!
//! One [`ApiGateway`] serves onboarding, dashboard and learning requests;
//! every call carries the session credential attached to its client.

use async_trait::async_trait;
use pathwise_core::{DashboardGateway, LearningGateway, OnboardingGateway};
use pathwise_domain::{
    AnswerSubmission, CareerProgress, CareerTrack, Interest, LearningPage, OnboardingQuestion,
    Preferences, Result, SkillTags, User,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::endpoints;

#[derive(Serialize)]
struct InterestsBody<'a> {
    interests: &'a [String],
}

#[derive(Serialize)]
struct PreferencesBody<'a> {
    preferences: &'a Preferences,
}

#[derive(Serialize)]
struct CareerPathsBody<'a> {
    career_track_ids: &'a [i64],
}

#[derive(Debug, Clone)]
pub struct ApiGateway {
    client: ApiClient,
}

impl ApiGateway {
    /// `client` should already carry the session's credential provider.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User> {
        Ok(self.client.get(endpoints::CURRENT_USER).await?)
    }
}

#[async_trait]
impl OnboardingGateway for ApiGateway {
    #[instrument(skip(self))]
    async fn list_interests(&self) -> Result<Vec<Interest>> {
        Ok(self.client.get(endpoints::INTERESTS).await?)
    }

    #[instrument(skip(self))]
    async fn update_interests(&self, names: &[String]) -> Result<User> {
        Ok(self.client.patch(endpoints::UPDATE_INTERESTS, &InterestsBody { interests: names }).await?)
    }

    #[instrument(skip(self))]
    async fn list_questions(&self) -> Result<Vec<OnboardingQuestion>> {
        Ok(self.client.get(endpoints::ONBOARDING_QUESTIONS).await?)
    }

    #[instrument(skip(self), fields(question = submission.question))]
    async fn submit_answer(&self, submission: &AnswerSubmission) -> Result<()> {
        let _saved: Value = self.client.post(endpoints::ONBOARDING_ANSWERS, submission).await?;
        debug!(question = submission.question, "Answer saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_preferences(&self, preferences: &Preferences) -> Result<User> {
        Ok(self
            .client
            .patch(endpoints::UPDATE_PREFERENCES, &PreferencesBody { preferences })
            .await?)
    }

    #[instrument(skip(self))]
    async fn recommendations(&self) -> Result<Vec<CareerTrack>> {
        Ok(self.client.get(endpoints::RECOMMENDATIONS).await?)
    }

    #[instrument(skip(self))]
    async fn select_career_paths(&self, track_ids: &[i64]) -> Result<User> {
        Ok(self
            .client
            .post(endpoints::SELECT_CAREER_PATHS, &CareerPathsBody { career_track_ids: track_ids })
            .await?)
    }
}

#[async_trait]
impl DashboardGateway for ApiGateway {
    async fn current_user(&self) -> Result<User> {
        ApiGateway::current_user(self).await
    }

    #[instrument(skip(self))]
    async fn progress(&self) -> Result<Vec<CareerProgress>> {
        Ok(self.client.get(endpoints::PROGRESS).await?)
    }

    #[instrument(skip(self))]
    async fn career_tracks(&self, ids: &[i64]) -> Result<Vec<CareerTrack>> {
        let query: Vec<(&'static str, String)> = ids.iter().map(|id| ("id", id.to_string())).collect();
        Ok(self.client.get_with_query(endpoints::CAREER_TRACKS, &query).await?)
    }

    #[instrument(skip(self))]
    async fn skill_tags(&self) -> Result<Vec<String>> {
        let tags: SkillTags = self.client.get(endpoints::SKILL_TAGS).await?;
        Ok(tags.skill_tags)
    }
}

#[async_trait]
impl LearningGateway for ApiGateway {
    #[instrument(skip(self))]
    async fn learning_page(&self, slug: &str, page_number: u32) -> Result<LearningPage> {
        let query = [("page", page_number.to_string())];
        Ok(self.client.get_with_query(&endpoints::learning_page(slug), &query).await?)
    }
}
