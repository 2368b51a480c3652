//! In-memory gateway mocks
//!
//! Each mock serves canned data and can be told to fail specific calls.
//! Interior state uses `parking_lot::Mutex` so the mocks stay `Sync`.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use pathwise_core::{DashboardGateway, LearningGateway, OnboardingGateway};
use pathwise_domain::{
    AnswerSubmission, CareerProgress, CareerTrack, Interest, LearningPage, OnboardingQuestion,
    PathwiseError, Preferences, Result as DomainResult, User,
};

fn transport(what: &str) -> PathwiseError {
    PathwiseError::Transport(format!("{what} unavailable"))
}

/// Mock for `OnboardingGateway`.
#[derive(Default)]
pub struct MockOnboardingGateway {
    pub interests: Vec<Interest>,
    pub questions: Vec<OnboardingQuestion>,
    pub recommendations: Vec<CareerTrack>,
    /// Questions whose answer submission fails with a transport error.
    failing_answers: Mutex<HashSet<i64>>,
    reject_answers: Mutex<bool>,
    fail_preferences: Mutex<bool>,
    fail_selection: Mutex<bool>,
    pub saved_interests: Mutex<Vec<Vec<String>>>,
    pub saved_answers: Mutex<Vec<AnswerSubmission>>,
    pub saved_preferences: Mutex<Option<Preferences>>,
    pub saved_selection: Mutex<Vec<Vec<i64>>>,
}

impl MockOnboardingGateway {
    pub fn new(
        interests: Vec<Interest>,
        questions: Vec<OnboardingQuestion>,
        recommendations: Vec<CareerTrack>,
    ) -> Self {
        Self { interests, questions, recommendations, ..Default::default() }
    }

    pub fn fail_answers_for(&self, ids: &[i64]) {
        *self.failing_answers.lock() = ids.iter().copied().collect();
    }

    pub fn reject_answers(&self) {
        *self.reject_answers.lock() = true;
    }

    pub fn fail_preferences(&self, fail: bool) {
        *self.fail_preferences.lock() = fail;
    }

    pub fn fail_selection(&self, fail: bool) {
        *self.fail_selection.lock() = fail;
    }

    pub fn selection_calls(&self) -> usize {
        self.saved_selection.lock().len()
    }

    fn user_snapshot(&self) -> User {
        User {
            id: 1,
            username: "explorer".into(),
            email: None,
            xp: 0,
            streak: 0,
            interests: self.saved_interests.lock().last().cloned().unwrap_or_default(),
            selected_career_paths: self.saved_selection.lock().last().cloned().unwrap_or_default(),
            onboarding_complete: true,
        }
    }
}

#[async_trait]
impl OnboardingGateway for MockOnboardingGateway {
    async fn list_interests(&self) -> DomainResult<Vec<Interest>> {
        Ok(self.interests.clone())
    }

    async fn update_interests(&self, names: &[String]) -> DomainResult<User> {
        self.saved_interests.lock().push(names.to_vec());
        Ok(self.user_snapshot())
    }

    async fn list_questions(&self) -> DomainResult<Vec<OnboardingQuestion>> {
        Ok(self.questions.clone())
    }

    async fn submit_answer(&self, submission: &AnswerSubmission) -> DomainResult<()> {
        if *self.reject_answers.lock() {
            return Err(PathwiseError::AuthRejected("Invalid token.".into()));
        }
        if self.failing_answers.lock().contains(&submission.question) {
            return Err(transport("answers"));
        }
        self.saved_answers.lock().push(submission.clone());
        Ok(())
    }

    async fn update_preferences(&self, preferences: &Preferences) -> DomainResult<User> {
        if *self.fail_preferences.lock() {
            return Err(transport("preferences"));
        }
        *self.saved_preferences.lock() = Some(*preferences);
        Ok(self.user_snapshot())
    }

    async fn recommendations(&self) -> DomainResult<Vec<CareerTrack>> {
        Ok(self.recommendations.clone())
    }

    async fn select_career_paths(&self, track_ids: &[i64]) -> DomainResult<User> {
        if *self.fail_selection.lock() {
            return Err(PathwiseError::ValidationFailed(
                "You can select up to 4 career paths.".into(),
            ));
        }
        self.saved_selection.lock().push(track_ids.to_vec());
        Ok(self.user_snapshot())
    }
}

/// Mock for `DashboardGateway`.
pub struct MockDashboardGateway {
    pub user: Mutex<DomainResult<User>>,
    pub progress: Mutex<DomainResult<Vec<CareerProgress>>>,
    pub tracks: Mutex<DomainResult<Vec<CareerTrack>>>,
    pub skill_tags: Mutex<DomainResult<Vec<String>>>,
    pub requested_tracks: Mutex<Vec<Vec<i64>>>,
}

impl MockDashboardGateway {
    pub fn new(user: User) -> Self {
        Self {
            user: Mutex::new(Ok(user)),
            progress: Mutex::new(Ok(Vec::new())),
            tracks: Mutex::new(Ok(Vec::new())),
            skill_tags: Mutex::new(Ok(Vec::new())),
            requested_tracks: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DashboardGateway for MockDashboardGateway {
    async fn current_user(&self) -> DomainResult<User> {
        self.user.lock().clone()
    }

    async fn progress(&self) -> DomainResult<Vec<CareerProgress>> {
        self.progress.lock().clone()
    }

    async fn career_tracks(&self, ids: &[i64]) -> DomainResult<Vec<CareerTrack>> {
        self.requested_tracks.lock().push(ids.to_vec());
        self.tracks.lock().clone()
    }

    async fn skill_tags(&self) -> DomainResult<Vec<String>> {
        self.skill_tags.lock().clone()
    }
}

/// Mock for `LearningGateway` keyed by `(slug, page)`.
#[derive(Default)]
pub struct MockLearningGateway {
    pages: HashMap<(String, u32), LearningPage>,
    pub requests: Mutex<Vec<(String, u32)>>,
}

impl MockLearningGateway {
    pub fn with_page(mut self, slug: &str, page: LearningPage) -> Self {
        self.pages.insert((slug.to_string(), page.page_number), page);
        self
    }
}

#[async_trait]
impl LearningGateway for MockLearningGateway {
    async fn learning_page(&self, slug: &str, page_number: u32) -> DomainResult<LearningPage> {
        self.requests.lock().push((slug.to_string(), page_number));
        self.pages
            .get(&(slug.to_string(), page_number))
            .cloned()
            .ok_or_else(|| PathwiseError::NotFound("Not found.".into()))
    }
}
