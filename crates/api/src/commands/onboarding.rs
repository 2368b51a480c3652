//! Onboarding views: interests, questions, preferences, recommendation
//!
//! Each page's "open" command re-enters the flow at that page's stage, so
//! pages can be opened directly as well as reached by continuing.

use pathwise_core::onboarding::{AnswerBatchReport, PreferenceAxis, QuestionStep};
use pathwise_core::{OnboardingFlow, OnboardingStage, Route};
use pathwise_domain::{AnswerValue, PathwiseError, QuestionType, Result as DomainResult};
use serde::Serialize;
use tokio::sync::MutexGuard;

use super::CommandResult;
use crate::context::AppContext;
use crate::utils::{execute_guarded, execute_local};

fn stage_route(stage: OnboardingStage) -> Route {
    match stage {
        OnboardingStage::Interests => Route::OnboardingInterests,
        OnboardingStage::Questions => Route::OnboardingQuestions,
        OnboardingStage::Preferences => Route::OnboardingPreferences,
        OnboardingStage::Recommendation => Route::OnboardingRecommendation,
        OnboardingStage::Complete => Route::Dashboard,
    }
}

/// Where the flow went after a successful "Continue"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageOutcome {
    pub stage: OnboardingStage,
    pub redirect: String,
}

impl From<OnboardingStage> for StageOutcome {
    fn from(stage: OnboardingStage) -> Self {
        Self { stage, redirect: stage_route(stage).path() }
    }
}

/// A selectable chip (interest or track)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub id: i64,
    pub label: String,
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub selected: bool,
    /// Unselected while the cap is reached.
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    pub choices: Vec<Choice>,
    /// e.g. "3/7 selected".
    pub counter: String,
    pub can_continue: bool,
    pub error: Option<String>,
}

fn inline_error(flow: &OnboardingFlow) -> Option<String> {
    flow.last_error().map(PathwiseError::user_message)
}

fn interests_view(flow: &OnboardingFlow) -> SelectionView {
    let selection = flow.interest_selection();
    SelectionView {
        choices: flow
            .interests()
            .iter()
            .map(|interest| {
                let selected = selection.is_selected(&interest.id);
                Choice {
                    id: interest.id,
                    label: interest.name.clone(),
                    emoji: interest.emoji.clone(),
                    detail: None,
                    selected,
                    disabled: !selected && selection.is_full(),
                }
            })
            .collect(),
        counter: format!("{}/{} selected", selection.len(), selection.cap()),
        can_continue: selection.can_continue(),
        error: inline_error(flow),
    }
}

fn recommendations_view(flow: &OnboardingFlow) -> SelectionView {
    let selection = flow.track_selection();
    SelectionView {
        choices: flow
            .recommendations()
            .iter()
            .map(|track| {
                let selected = selection.is_selected(&track.id);
                Choice {
                    id: track.id,
                    label: track.title.clone(),
                    emoji: track.emoji.clone(),
                    detail: track.avg_salary.clone(),
                    selected,
                    disabled: !selected && selection.is_full(),
                }
            })
            .collect(),
        counter: format!("{}/{} selected", selection.len(), selection.cap()),
        can_continue: selection.can_continue(),
        error: inline_error(flow),
    }
}

async fn enter_stage(ctx: &AppContext, stage: OnboardingStage) -> MutexGuard<'_, OnboardingFlow> {
    let mut flow = ctx.onboarding.lock().await;
    if flow.stage() != stage {
        flow.resume_at(stage);
    }
    flow
}

/// Run a local step against the onboarding flow behind the stage's guard.
async fn with_flow<T>(
    ctx: &AppContext,
    stage: OnboardingStage,
    command_name: &str,
    step: impl FnOnce(&mut OnboardingFlow) -> DomainResult<T>,
) -> CommandResult<T> {
    let mut flow = ctx.onboarding.lock().await;
    execute_local(ctx, &stage_route(stage), command_name, || step(&mut *flow))
}

// ============================================================================
// Interests
// ============================================================================

pub async fn open_interests(ctx: &AppContext) -> CommandResult<SelectionView> {
    let route = stage_route(OnboardingStage::Interests);
    execute_guarded(ctx, &route, "onboarding::open_interests", || async move {
        let mut flow = enter_stage(ctx, OnboardingStage::Interests).await;
        flow.load_interests().await?;
        Ok(interests_view(&flow))
    })
    .await
}

/// Toggle an interest; an eighth selection is ignored.
pub async fn toggle_interest(ctx: &AppContext, interest_id: i64) -> CommandResult<SelectionView> {
    with_flow(ctx, OnboardingStage::Interests, "onboarding::toggle_interest", |flow| {
        flow.toggle_interest(interest_id);
        Ok(interests_view(flow))
    })
    .await
}

pub async fn submit_interests(ctx: &AppContext) -> CommandResult<StageOutcome> {
    let route = stage_route(OnboardingStage::Interests);
    execute_guarded(ctx, &route, "onboarding::submit_interests", || async move {
        ctx.onboarding.lock().await.submit_interests().await.map(StageOutcome::from)
    })
    .await
}

// ============================================================================
// Questions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// e.g. "Question 2 of 9".
    pub counter: String,
    pub id: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub answer: Option<AnswerValue>,
    /// Value a scale control shows, 3 until answered.
    pub scale_value: i64,
    pub can_go_back: bool,
    pub can_advance: bool,
    /// "Next", or "Finish" on the last question.
    pub button: &'static str,
    pub error: Option<String>,
}

fn question_view(flow: &OnboardingFlow) -> DomainResult<QuestionView> {
    let questions = flow.questions();
    let question = questions
        .current()
        .ok_or_else(|| PathwiseError::NotFound("There are no onboarding questions.".into()))?;
    Ok(QuestionView {
        counter: format!("Question {} of {}", questions.index() + 1, questions.total()),
        id: question.id,
        text: question.text.clone(),
        question_type: question.question_type,
        options: question.options().to_vec(),
        answer: questions.current_answer().cloned(),
        scale_value: questions.scale_display_value(),
        can_go_back: questions.index() > 0,
        can_advance: questions.can_advance(),
        button: if questions.is_last() { "Finish" } else { "Next" },
        error: inline_error(flow),
    })
}

/// Result of pressing "Next"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum QuestionProgress {
    Question { view: QuestionView },
    /// Every question answered; submit to save the answers.
    ReadyToSubmit { answered: usize },
}

pub async fn open_questions(ctx: &AppContext) -> CommandResult<QuestionView> {
    let route = stage_route(OnboardingStage::Questions);
    execute_guarded(ctx, &route, "onboarding::open_questions", || async move {
        let mut flow = enter_stage(ctx, OnboardingStage::Questions).await;
        flow.load_questions().await?;
        question_view(&flow)
    })
    .await
}

/// Answer the current question (bool, 1-5 or one of its options).
pub async fn answer_question(ctx: &AppContext, value: AnswerValue) -> CommandResult<QuestionView> {
    with_flow(ctx, OnboardingStage::Questions, "onboarding::answer_question", |flow| {
        flow.answer_current(value)?;
        question_view(flow)
    })
    .await
}

pub async fn next_question(ctx: &AppContext) -> CommandResult<QuestionProgress> {
    with_flow(ctx, OnboardingStage::Questions, "onboarding::next_question", |flow| {
        match flow.next_question()? {
            QuestionStep::Moved(_) => Ok(QuestionProgress::Question { view: question_view(flow)? }),
            QuestionStep::Finished => Ok(QuestionProgress::ReadyToSubmit {
                answered: flow.questions().submissions().len(),
            }),
        }
    })
    .await
}

pub async fn previous_question(ctx: &AppContext) -> CommandResult<QuestionView> {
    with_flow(ctx, OnboardingStage::Questions, "onboarding::previous_question", |flow| {
        flow.previous_question();
        question_view(flow)
    })
    .await
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedAnswerView {
    pub question: i64,
    pub message: String,
}

/// Per-answer outcome of saving the answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerBatchView {
    pub saved: Vec<i64>,
    pub failed: Vec<FailedAnswerView>,
    /// Next page once every answer is saved.
    pub redirect: Option<String>,
    pub error: Option<String>,
}

impl AnswerBatchView {
    fn new(report: AnswerBatchReport, flow: &OnboardingFlow) -> Self {
        let redirect = report.is_complete().then(|| stage_route(flow.stage()).path());
        Self {
            saved: report.saved,
            failed: report
                .failed
                .into_iter()
                .map(|f| FailedAnswerView {
                    question: f.submission.question,
                    message: f.error.user_message(),
                })
                .collect(),
            redirect,
            error: inline_error(flow),
        }
    }
}

/// Save every answer, one concurrent request per answer.
pub async fn submit_answers(ctx: &AppContext) -> CommandResult<AnswerBatchView> {
    let route = stage_route(OnboardingStage::Questions);
    execute_guarded(ctx, &route, "onboarding::submit_answers", || async move {
        let mut flow = ctx.onboarding.lock().await;
        let report = flow.submit_answers().await?;
        Ok(AnswerBatchView::new(report, &flow))
    })
    .await
}

/// Re-send only the answers that failed last time.
pub async fn retry_failed_answers(ctx: &AppContext) -> CommandResult<AnswerBatchView> {
    let route = stage_route(OnboardingStage::Questions);
    execute_guarded(ctx, &route, "onboarding::retry_failed_answers", || async move {
        let mut flow = ctx.onboarding.lock().await;
        let report = flow.retry_failed_answers().await?;
        Ok(AnswerBatchView::new(report, &flow))
    })
    .await
}

// ============================================================================
// Preferences
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceAxisView {
    pub axis: &'static str,
    pub label: &'static str,
    pub options: Vec<PreferenceOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferencesView {
    pub axes: Vec<PreferenceAxisView>,
    pub can_continue: bool,
    pub error: Option<String>,
}

fn preferences_view(flow: &OnboardingFlow) -> PreferencesView {
    let form = flow.preferences();
    PreferencesView {
        axes: PreferenceAxis::ALL
            .iter()
            .map(|axis| {
                let chosen = form.value(*axis);
                PreferenceAxisView {
                    axis: axis.as_str(),
                    label: axis.label(),
                    options: axis
                        .options()
                        .into_iter()
                        .map(|(value, label)| PreferenceOption {
                            value,
                            label,
                            selected: chosen == Some(value),
                        })
                        .collect(),
                }
            })
            .collect(),
        can_continue: form.is_complete(),
        error: inline_error(flow),
    }
}

pub async fn open_preferences(ctx: &AppContext) -> CommandResult<PreferencesView> {
    let route = stage_route(OnboardingStage::Preferences);
    execute_guarded(ctx, &route, "onboarding::open_preferences", || async move {
        let flow = enter_stage(ctx, OnboardingStage::Preferences).await;
        Ok(preferences_view(&flow))
    })
    .await
}

/// Set one axis, e.g. `("coding", "non-code")`.
pub async fn set_preference(
    ctx: &AppContext,
    axis: &str,
    value: &str,
) -> CommandResult<PreferencesView> {
    with_flow(ctx, OnboardingStage::Preferences, "onboarding::set_preference", |flow| {
        let axis: PreferenceAxis = axis.parse().map_err(|_| {
            PathwiseError::InvalidInput(format!("'{axis}' is not a preference."))
        })?;
        flow.set_preference(axis, value)?;
        Ok(preferences_view(flow))
    })
    .await
}

pub async fn submit_preferences(ctx: &AppContext) -> CommandResult<StageOutcome> {
    let route = stage_route(OnboardingStage::Preferences);
    execute_guarded(ctx, &route, "onboarding::submit_preferences", || async move {
        ctx.onboarding.lock().await.submit_preferences().await.map(StageOutcome::from)
    })
    .await
}

// ============================================================================
// Recommendation
// ============================================================================

pub async fn open_recommendations(ctx: &AppContext) -> CommandResult<SelectionView> {
    let route = stage_route(OnboardingStage::Recommendation);
    execute_guarded(ctx, &route, "onboarding::open_recommendations", || async move {
        let mut flow = enter_stage(ctx, OnboardingStage::Recommendation).await;
        flow.load_recommendations().await?;
        Ok(recommendations_view(&flow))
    })
    .await
}

/// Toggle a recommended track; a fifth selection is ignored.
pub async fn toggle_track(ctx: &AppContext, track_id: i64) -> CommandResult<SelectionView> {
    with_flow(ctx, OnboardingStage::Recommendation, "onboarding::toggle_track", |flow| {
        flow.toggle_track(track_id);
        Ok(recommendations_view(flow))
    })
    .await
}

/// Save the chosen tracks and finish onboarding.
pub async fn submit_selection(ctx: &AppContext) -> CommandResult<StageOutcome> {
    let route = stage_route(OnboardingStage::Recommendation);
    execute_guarded(ctx, &route, "onboarding::submit_selection", || async move {
        ctx.onboarding.lock().await.submit_selection().await.map(StageOutcome::from)
    })
    .await
}
