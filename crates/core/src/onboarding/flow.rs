//! Onboarding flow controller
//!
//! Linear sequencer over the onboarding stages:
//!
//! ```text
//! Interests ──► Questions ──► Preferences ──► Recommendation ──► Complete
//! ```
//!
//! Each stage is persisted when the user advances past it. A failed
//! persistence keeps the current stage and records an inline error;
//! stages persisted earlier are not rolled back.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use pathwise_domain::constants::{MAX_CAREER_PATHS, MAX_INTERESTS};
use pathwise_domain::{
    AnswerSubmission, AnswerValue, CareerTrack, Interest, PathwiseError, Result,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::ports::OnboardingGateway;
use super::preferences::{PreferenceAxis, PreferenceForm};
use super::questions::{QuestionFlow, QuestionStep};
use super::selection::{validate_career_selection, BoundedSelection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStage {
    Interests,
    Questions,
    Preferences,
    Recommendation,
    Complete,
}

pathwise_domain::impl_wire_name_conversions!(OnboardingStage {
    Interests => "interests",
    Questions => "questions",
    Preferences => "preferences",
    Recommendation => "recommendation",
    Complete => "complete",
});

/// One answer that could not be saved
#[derive(Debug, Clone, PartialEq)]
pub struct FailedAnswer {
    pub submission: AnswerSubmission,
    pub error: PathwiseError,
}

/// Per-item result of submitting a batch of answers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerBatchReport {
    pub saved: Vec<i64>,
    pub failed: Vec<FailedAnswer>,
}

impl AnswerBatchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_question_ids(&self) -> Vec<i64> {
        self.failed.iter().map(|f| f.submission.question).collect()
    }

    fn rejection(&self) -> Option<&PathwiseError> {
        self.failed.iter().map(|f| &f.error).find(|e| e.requires_login())
    }
}

pub struct OnboardingFlow {
    gateway: Arc<dyn OnboardingGateway>,
    stage: OnboardingStage,
    interests: Vec<Interest>,
    interest_selection: BoundedSelection<i64>,
    questions: QuestionFlow,
    pending_answers: Vec<AnswerSubmission>,
    preferences: PreferenceForm,
    recommendations: Vec<CareerTrack>,
    track_selection: BoundedSelection<i64>,
    last_error: Option<PathwiseError>,
}

impl OnboardingFlow {
    pub fn new(gateway: Arc<dyn OnboardingGateway>) -> Self {
        Self {
            gateway,
            stage: OnboardingStage::Interests,
            interests: Vec::new(),
            interest_selection: BoundedSelection::new(MAX_INTERESTS),
            questions: QuestionFlow::default(),
            pending_answers: Vec::new(),
            preferences: PreferenceForm::default(),
            recommendations: Vec::new(),
            track_selection: BoundedSelection::new(MAX_CAREER_PATHS),
            last_error: None,
        }
    }

    pub fn stage(&self) -> OnboardingStage {
        self.stage
    }

    /// Inline error from the last failed step, cleared by the next success.
    pub fn last_error(&self) -> Option<&PathwiseError> {
        self.last_error.as_ref()
    }

    /// Re-enter the flow at `stage`, e.g. when its page is opened directly.
    pub fn resume_at(&mut self, stage: OnboardingStage) {
        debug!(from = %self.stage, to = %stage, "Resuming onboarding");
        self.stage = stage;
        self.last_error = None;
    }

    // ------------------------------------------------------------------
    // Interests
    // ------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn load_interests(&mut self) -> Result<&[Interest]> {
        let result = self.gateway.list_interests().await;
        let interests = self.record(result)?;
        self.interests = interests;
        Ok(&self.interests)
    }

    pub fn interests(&self) -> &[Interest] {
        &self.interests
    }

    pub fn interest_selection(&self) -> &BoundedSelection<i64> {
        &self.interest_selection
    }

    /// Toggle an interest. Selecting an eighth interest is a no-op.
    pub fn toggle_interest(&mut self, interest_id: i64) -> bool {
        self.interest_selection.toggle(interest_id)
    }

    /// Persist the chosen interests and move to the questions.
    #[instrument(skip(self), fields(selected = self.interest_selection.len()))]
    pub async fn submit_interests(&mut self) -> Result<OnboardingStage> {
        self.expect_stage(OnboardingStage::Interests)?;
        if !self.interest_selection.can_continue() {
            return self.fail(PathwiseError::InvalidInput(
                "Please select at least one interest.".into(),
            ));
        }

        let names: Vec<String> = self
            .interest_selection
            .items()
            .iter()
            .filter_map(|id| self.interests.iter().find(|i| i.id == *id))
            .map(|interest| interest.name.clone())
            .collect();

        let result = self.gateway.update_interests(&names).await;
        self.record(result)?;
        Ok(self.enter(OnboardingStage::Questions))
    }

    // ------------------------------------------------------------------
    // Questions
    // ------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn load_questions(&mut self) -> Result<&QuestionFlow> {
        let result = self.gateway.list_questions().await;
        let questions = self.record(result)?;
        self.questions = QuestionFlow::new(questions);
        self.pending_answers.clear();
        Ok(&self.questions)
    }

    pub fn questions(&self) -> &QuestionFlow {
        &self.questions
    }

    pub fn answer_current(&mut self, value: AnswerValue) -> Result<()> {
        self.questions.answer(value)
    }

    pub fn next_question(&mut self) -> Result<QuestionStep> {
        self.questions.advance()
    }

    pub fn previous_question(&mut self) -> bool {
        self.questions.go_back()
    }

    /// Submit every answer concurrently, one request per answer.
    ///
    /// Returns the per-item report. When some answers fail the stage stays
    /// on Questions and only the failed ones are kept for
    /// [`OnboardingFlow::retry_failed_answers`].
    ///
    /// # Errors
    /// Returns `InvalidInput` before the last question is answered and
    /// `AuthRejected` when any request was rejected for authentication.
    #[instrument(skip(self))]
    pub async fn submit_answers(&mut self) -> Result<AnswerBatchReport> {
        self.expect_stage(OnboardingStage::Questions)?;
        if !self.questions.is_finished() {
            return self.fail(PathwiseError::InvalidInput(
                "Please answer every question before continuing.".into(),
            ));
        }
        let submissions = self.questions.submissions();
        self.submit_batch(submissions).await
    }

    /// Re-send only the questions that failed in the previous batch.
    ///
    /// The values sent are the current answers, so an answer edited after
    /// the failure is sent as edited.
    ///
    /// # Errors
    /// Returns `InvalidInput` when nothing is pending or the question set
    /// is not finished.
    #[instrument(skip(self), fields(pending = self.pending_answers.len()))]
    pub async fn retry_failed_answers(&mut self) -> Result<AnswerBatchReport> {
        self.expect_stage(OnboardingStage::Questions)?;
        if self.pending_answers.is_empty() {
            return self.fail(PathwiseError::InvalidInput("There are no answers to retry.".into()));
        }
        if !self.questions.is_finished() {
            return self.fail(PathwiseError::InvalidInput(
                "Please answer every question before continuing.".into(),
            ));
        }

        let failed: HashSet<i64> = self.pending_answers.iter().map(|s| s.question).collect();
        let batch: Vec<AnswerSubmission> = self
            .questions
            .submissions()
            .into_iter()
            .filter(|submission| failed.contains(&submission.question))
            .collect();
        debug!(retrying = batch.len(), "Retrying failed onboarding answers");
        self.submit_batch(batch).await
    }

    pub fn pending_answers(&self) -> &[AnswerSubmission] {
        &self.pending_answers
    }

    async fn submit_batch(&mut self, batch: Vec<AnswerSubmission>) -> Result<AnswerBatchReport> {
        let gateway = Arc::clone(&self.gateway);
        let results = join_all(batch.iter().map(|submission| {
            let gateway = Arc::clone(&gateway);
            async move { gateway.submit_answer(submission).await }
        }))
        .await;

        let mut report = AnswerBatchReport::default();
        for (submission, result) in batch.into_iter().zip(results) {
            match result {
                Ok(()) => report.saved.push(submission.question),
                Err(error) => report.failed.push(FailedAnswer { submission, error }),
            }
        }

        self.pending_answers = report.failed.iter().map(|f| f.submission.clone()).collect();

        if let Some(rejection) = report.rejection() {
            let rejection = rejection.clone();
            return self.fail(rejection);
        }

        if report.is_complete() {
            info!(saved = report.saved.len(), "All onboarding answers saved");
            self.enter(OnboardingStage::Preferences);
        } else {
            warn!(
                saved = report.saved.len(),
                failed = report.failed.len(),
                "Some onboarding answers were not saved"
            );
            let total = report.saved.len() + report.failed.len();
            self.last_error = Some(PathwiseError::Transport(format!(
                "{} of {} answers could not be saved",
                report.failed.len(),
                total
            )));
        }
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------

    pub fn preferences(&self) -> &PreferenceForm {
        &self.preferences
    }

    pub fn set_preference(&mut self, axis: PreferenceAxis, value: &str) -> Result<()> {
        self.preferences.set(axis, value)
    }

    #[instrument(skip(self))]
    pub async fn submit_preferences(&mut self) -> Result<OnboardingStage> {
        self.expect_stage(OnboardingStage::Preferences)?;
        let Some(preferences) = self.preferences.complete() else {
            return self.fail(PathwiseError::InvalidInput(
                "Please choose one option for every preference.".into(),
            ));
        };

        let result = self.gateway.update_preferences(&preferences).await;
        self.record(result)?;
        Ok(self.enter(OnboardingStage::Recommendation))
    }

    // ------------------------------------------------------------------
    // Recommendation
    // ------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn load_recommendations(&mut self) -> Result<&[CareerTrack]> {
        let result = self.gateway.recommendations().await;
        let tracks = self.record(result)?;
        self.recommendations = tracks;
        Ok(&self.recommendations)
    }

    pub fn recommendations(&self) -> &[CareerTrack] {
        &self.recommendations
    }

    pub fn track_selection(&self) -> &BoundedSelection<i64> {
        &self.track_selection
    }

    /// Toggle a recommended track. Selecting a fifth track is a no-op.
    pub fn toggle_track(&mut self, track_id: i64) -> bool {
        self.track_selection.toggle(track_id)
    }

    /// Persist the selected tracks and complete onboarding.
    ///
    /// # Errors
    /// Returns `InvalidInput` without any request when zero or more than
    /// four tracks are selected.
    #[instrument(skip(self), fields(selected = self.track_selection.len()))]
    pub async fn submit_selection(&mut self) -> Result<OnboardingStage> {
        self.expect_stage(OnboardingStage::Recommendation)?;
        let ids = self.track_selection.items().to_vec();
        if let Err(e) = validate_career_selection(&ids) {
            return self.fail(e);
        }

        let result = self.gateway.select_career_paths(&ids).await;
        self.record(result)?;
        Ok(self.enter(OnboardingStage::Complete))
    }

    // ------------------------------------------------------------------

    fn expect_stage(&self, expected: OnboardingStage) -> Result<()> {
        if self.stage != expected {
            return Err(PathwiseError::InvalidInput(format!(
                "Onboarding is at the {} step, not {}.",
                self.stage, expected
            )));
        }
        Ok(())
    }

    fn enter(&mut self, stage: OnboardingStage) -> OnboardingStage {
        info!(from = %self.stage, to = %stage, "Onboarding advanced");
        self.stage = stage;
        self.last_error = None;
        stage
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail<T>(&mut self, error: PathwiseError) -> Result<T> {
        warn!(error = %error, stage = %self.stage, "Onboarding step failed");
        self.last_error = Some(error.clone());
        Err(error)
    }
}
