//! Daily challenge quiz, its completion page and the final match

use pathwise_core::quiz::QuizStep;
use pathwise_core::{DashboardGateway, QuizFlow, QuizOutcome, Route};
use pathwise_domain::{PathwiseError, Result as DomainResult};
use serde::Serialize;

use super::{CommandResult, ViewError};
use crate::context::{ActiveChallenge, AppContext};
use crate::utils::{execute_guarded, execute_local};

impl ActiveChallenge {
    fn new(track_id: &str, day: u32) -> Self {
        Self { track_id: track_id.to_string(), day, flow: QuizFlow::default() }
    }

    fn route(&self) -> Route {
        Route::Challenge { track_id: self.track_id.clone(), day: self.day }
    }

    fn completed_route(&self) -> Route {
        Route::ChallengeCompleted { career_id: self.track_id.clone(), day: self.day }
    }
}

/// One quiz question as rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizView {
    pub track_id: String,
    pub day: u32,
    /// e.g. "Question 2 / 7".
    pub counter: String,
    pub progress_percent: u8,
    pub question: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub can_advance: bool,
    /// "Next", or "Submit" on the last question.
    pub button: &'static str,
}

impl QuizView {
    fn render(challenge: &ActiveChallenge) -> DomainResult<Self> {
        let flow = &challenge.flow;
        let question = flow.current().ok_or_else(|| {
            PathwiseError::InvalidInput("This challenge is already finished.".into())
        })?;
        let shown = flow.position() + 1;
        Ok(Self {
            track_id: challenge.track_id.clone(),
            day: challenge.day,
            counter: format!("Question {shown} / {}", flow.total()),
            progress_percent: (shown * 100 / flow.total().max(1)) as u8,
            question: question.text.clone(),
            options: question.options.clone(),
            selected: flow.selected(),
            can_advance: flow.can_advance(),
            button: if flow.is_last() { "Submit" } else { "Next" },
        })
    }
}

/// Result of pressing "Next" / "Submit"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ChallengeStep {
    Question { view: QuizView },
    Completed { outcome: QuizOutcome, redirect: String },
}

/// Completion page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeSummary {
    pub title: &'static str,
    pub outcome: QuizOutcome,
    pub percent: u8,
    /// e.g. "You answered 5 of 7 questions correctly."
    pub message: String,
    pub back_to: String,
}

/// Best-matching career shown after the challenges
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalMatchView {
    pub title: String,
    pub emoji: Option<String>,
    pub description: Option<String>,
    pub salary_range: Option<String>,
    pub back_to: String,
}

/// Open the quiz for a track and day, resuming it if it is already running.
pub async fn start_challenge(ctx: &AppContext, track_id: &str, day: u32) -> CommandResult<QuizView> {
    let route = Route::Challenge { track_id: track_id.to_string(), day };
    execute_guarded(ctx, &route, "challenge::start_challenge", || async move {
        let mut active = ctx.challenge.lock().await;
        let resumable = active.as_ref().is_some_and(|c| {
            c.track_id == track_id && c.day == day && !c.flow.is_finished()
        });
        if !resumable {
            *active = None;
        }
        let challenge = active.get_or_insert_with(|| ActiveChallenge::new(track_id, day));
        QuizView::render(challenge)
    })
    .await
}

/// Choose an option (0-based) on the current question.
pub async fn select_challenge_option(ctx: &AppContext, option: usize) -> CommandResult<QuizView> {
    let mut active = ctx.challenge.lock().await;
    let challenge = active.as_mut().ok_or_else(no_challenge)?;
    let route = challenge.route();
    execute_local(ctx, &route, "challenge::select_option", || {
        challenge.flow.select(option)?;
        QuizView::render(challenge)
    })
}

/// Record the selection and move to the next question or the completion page.
pub async fn advance_challenge(ctx: &AppContext) -> CommandResult<ChallengeStep> {
    let mut active = ctx.challenge.lock().await;
    let challenge = active.as_mut().ok_or_else(no_challenge)?;
    let route = challenge.route();
    execute_local(ctx, &route, "challenge::advance", || match challenge.flow.advance()? {
        QuizStep::Next(_) => Ok(ChallengeStep::Question { view: QuizView::render(challenge)? }),
        QuizStep::Completed(outcome) => {
            Ok(ChallengeStep::Completed { outcome, redirect: challenge.completed_route().path() })
        }
    })
}

/// Completion page for a finished challenge.
pub async fn challenge_completed(
    ctx: &AppContext,
    career_id: &str,
    day: u32,
) -> CommandResult<ChallengeSummary> {
    let route = Route::ChallengeCompleted { career_id: career_id.to_string(), day };
    let active = ctx.challenge.lock().await;
    execute_local(ctx, &route, "challenge::completed", || {
        let challenge = active
            .as_ref()
            .filter(|c| c.track_id == career_id && c.day == day && c.flow.is_finished())
            .ok_or_else(|| {
                PathwiseError::NotFound("Finish the challenge to see your results.".into())
            })?;
        let outcome = challenge.flow.outcome();
        Ok(ChallengeSummary {
            title: "Challenge Completed!",
            outcome,
            percent: outcome.percent(),
            message: format!(
                "You answered {} of {} questions correctly.",
                outcome.correct, outcome.total
            ),
            back_to: Route::Dashboard.path(),
        })
    })
}

/// The user's top career: the first of their selected paths.
pub async fn final_match(ctx: &AppContext) -> CommandResult<FinalMatchView> {
    execute_guarded(ctx, &Route::FinalMatch, "challenge::final_match", || async move {
        let user = ctx.gateway.current_user().await?;
        let Some(first) = user.selected_career_paths.first().copied() else {
            return Err(PathwiseError::NotFound(
                "Choose a career path to see your final match.".into(),
            ));
        };
        let track = ctx
            .gateway
            .career_tracks(&[first])
            .await?
            .into_iter()
            .find(|t| t.id == first)
            .ok_or_else(|| PathwiseError::NotFound("Your matched career is unavailable.".into()))?;

        Ok(FinalMatchView {
            title: track.title,
            emoji: track.emoji,
            description: track.description,
            salary_range: track.avg_salary,
            back_to: Route::Dashboard.path(),
        })
    })
    .await
}

fn no_challenge() -> ViewError {
    ViewError::from(PathwiseError::InvalidInput("Start the challenge first.".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_question_renders_counter_and_next() {
        let challenge = ActiveChallenge::new("3", 1);
        let view = QuizView::render(&challenge).unwrap();

        assert_eq!(view.counter, "Question 1 / 7");
        assert_eq!(view.progress_percent, 14);
        assert_eq!(view.button, "Next");
        assert!(!view.can_advance);
    }

    #[test]
    fn completion_route_uses_track_and_day() {
        let challenge = ActiveChallenge::new("data-science", 4);
        assert_eq!(challenge.route().path(), "/learning/data-science/4");
        assert_eq!(challenge.completed_route().path(), "/challenge-completed/data-science/4");
    }
}
