//! Integration tests for the onboarding flow
//!
//! **Coverage:**
//! - Happy path: interests → questions → preferences → selection → complete
//! - Partial answer failure keeps the stage and retries only failed answers
//! - Retries send current answers and need a finished set with failures
//! - A rejected answer surfaces as `AuthRejected`
//! - Failed stage persistence keeps the current stage
//! - Track selection bounds are enforced before any request

mod support;

use std::str::FromStr;
use std::sync::Arc;

use pathwise_core::onboarding::{PreferenceAxis, QuestionStep};
use pathwise_core::{OnboardingFlow, OnboardingStage};
use pathwise_domain::{AnswerValue, PathwiseError};
use support::gateways::MockOnboardingGateway;
use support::{interest, multi_choice, scale, track, yes_no};

fn gateway() -> Arc<MockOnboardingGateway> {
    Arc::new(MockOnboardingGateway::new(
        vec![interest(1, "Technology"), interest(2, "Art"), interest(3, "Nature")],
        vec![
            yes_no(10, "Do you enjoy solving puzzles?"),
            scale(11, "How much do you like working with people?"),
            multi_choice(12, "Pick a weekend activity", &["Hiking", "Coding", "Painting"]),
        ],
        vec![track(100, "software-engineering"), track(101, "graphic-design"), track(102, "ecology")],
    ))
}

async fn answer_all(flow: &mut OnboardingFlow) {
    flow.load_questions().await.unwrap();
    flow.answer_current(AnswerValue::Bool(true)).unwrap();
    assert_eq!(flow.next_question().unwrap(), QuestionStep::Moved(1));
    flow.answer_current(AnswerValue::Scale(4)).unwrap();
    assert_eq!(flow.next_question().unwrap(), QuestionStep::Moved(2));
    flow.answer_current(AnswerValue::Choice("Coding".into())).unwrap();
    assert_eq!(flow.next_question().unwrap(), QuestionStep::Finished);
}

async fn through_interests(flow: &mut OnboardingFlow) {
    flow.load_interests().await.unwrap();
    assert!(flow.toggle_interest(1));
    assert!(flow.toggle_interest(3));
    assert_eq!(flow.submit_interests().await.unwrap(), OnboardingStage::Questions);
}

fn choose_preferences(flow: &mut OnboardingFlow) {
    flow.set_preference(PreferenceAxis::Coding, "code").unwrap();
    flow.set_preference(PreferenceAxis::Creative, "analytical").unwrap();
    flow.set_preference(PreferenceAxis::Environment, "indoor").unwrap();
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn full_flow_persists_every_stage() {
    let gateway = gateway();
    let mut flow = OnboardingFlow::new(gateway.clone());

    through_interests(&mut flow).await;
    assert_eq!(
        gateway.saved_interests.lock().last().cloned(),
        Some(vec!["Technology".to_string(), "Nature".to_string()])
    );

    answer_all(&mut flow).await;
    let report = flow.submit_answers().await.unwrap();
    assert!(report.is_complete());
    assert_eq!(report.saved.len(), 3);
    assert_eq!(flow.stage(), OnboardingStage::Preferences);

    choose_preferences(&mut flow);
    assert_eq!(flow.submit_preferences().await.unwrap(), OnboardingStage::Recommendation);

    flow.load_recommendations().await.unwrap();
    assert!(flow.toggle_track(102));
    assert!(flow.toggle_track(100));
    assert_eq!(flow.submit_selection().await.unwrap(), OnboardingStage::Complete);
    assert_eq!(gateway.saved_selection.lock().last().cloned(), Some(vec![102, 100]));
    assert!(flow.last_error().is_none());
}

// ============================================================================
// Answers
// ============================================================================

#[tokio::test]
async fn partial_answer_failure_keeps_questions_stage() {
    let gateway = gateway();
    gateway.fail_answers_for(&[11]);
    let mut flow = OnboardingFlow::new(gateway.clone());
    through_interests(&mut flow).await;
    answer_all(&mut flow).await;

    let report = flow.submit_answers().await.unwrap();
    assert!(!report.is_complete());
    assert_eq!(report.failed_question_ids(), vec![11]);
    assert_eq!(report.saved, vec![10, 12]);
    assert_eq!(flow.stage(), OnboardingStage::Questions);
    assert_eq!(flow.pending_answers().len(), 1);
    assert!(matches!(flow.last_error(), Some(PathwiseError::Transport(_))));

    gateway.fail_answers_for(&[]);
    let retry = flow.retry_failed_answers().await.unwrap();
    assert_eq!(retry.saved, vec![11]);
    assert!(retry.is_complete());
    assert_eq!(flow.stage(), OnboardingStage::Preferences);
    // Answers saved in the first batch are not re-sent.
    assert_eq!(gateway.saved_answers.lock().len(), 3);
}

#[tokio::test]
async fn retry_with_nothing_pending_is_rejected_locally() {
    let gateway = gateway();
    let mut flow = OnboardingFlow::new(gateway.clone());
    through_interests(&mut flow).await;
    flow.load_questions().await.unwrap();

    let err = flow.retry_failed_answers().await.unwrap_err();
    assert!(matches!(err, PathwiseError::InvalidInput(_)));
    assert_eq!(flow.stage(), OnboardingStage::Questions);
    assert!(gateway.saved_answers.lock().is_empty());
}

#[tokio::test]
async fn retry_while_questions_are_unfinished_keeps_the_stage() {
    let gateway = gateway();
    gateway.fail_answers_for(&[11]);
    let mut flow = OnboardingFlow::new(gateway.clone());
    through_interests(&mut flow).await;
    answer_all(&mut flow).await;
    flow.submit_answers().await.unwrap();

    gateway.fail_answers_for(&[]);
    assert!(flow.previous_question());
    let err = flow.retry_failed_answers().await.unwrap_err();
    assert!(matches!(err, PathwiseError::InvalidInput(_)));
    assert_eq!(flow.stage(), OnboardingStage::Questions);
    assert_eq!(flow.pending_answers().len(), 1);
    assert_eq!(gateway.saved_answers.lock().len(), 2);
}

#[tokio::test]
async fn retry_sends_the_answer_as_edited_after_the_failure() {
    let gateway = gateway();
    gateway.fail_answers_for(&[11]);
    let mut flow = OnboardingFlow::new(gateway.clone());
    through_interests(&mut flow).await;
    answer_all(&mut flow).await;
    let report = flow.submit_answers().await.unwrap();
    assert_eq!(report.failed_question_ids(), vec![11]);

    // Back to question 11 and change the scale from 4 to 2.
    assert!(flow.previous_question());
    flow.answer_current(AnswerValue::Scale(2)).unwrap();
    assert_eq!(flow.next_question().unwrap(), QuestionStep::Moved(2));
    assert_eq!(flow.next_question().unwrap(), QuestionStep::Finished);

    gateway.fail_answers_for(&[]);
    let retry = flow.retry_failed_answers().await.unwrap();
    assert_eq!(retry.saved, vec![11]);
    assert_eq!(flow.stage(), OnboardingStage::Preferences);

    let saved = gateway.saved_answers.lock();
    let resent: Vec<_> = saved.iter().filter(|s| s.question == 11).collect();
    assert_eq!(resent.len(), 1);
    assert_eq!(resent[0].answer, AnswerValue::Scale(2));
}

#[tokio::test]
async fn rejected_answer_is_an_auth_error() {
    let gateway = gateway();
    gateway.reject_answers();
    let mut flow = OnboardingFlow::new(gateway.clone());
    through_interests(&mut flow).await;
    answer_all(&mut flow).await;

    let err = flow.submit_answers().await.unwrap_err();
    assert!(err.requires_login());
    assert_eq!(flow.stage(), OnboardingStage::Questions);
}

#[tokio::test]
async fn unanswered_questions_cannot_be_submitted() {
    let gateway = gateway();
    let mut flow = OnboardingFlow::new(gateway.clone());
    through_interests(&mut flow).await;
    flow.load_questions().await.unwrap();

    let err = flow.submit_answers().await.unwrap_err();
    assert!(matches!(err, PathwiseError::InvalidInput(_)));
    assert!(gateway.saved_answers.lock().is_empty());
}

// ============================================================================
// Stage persistence
// ============================================================================

#[tokio::test]
async fn failed_preferences_keep_the_stage() {
    let gateway = gateway();
    gateway.fail_preferences(true);
    let mut flow = OnboardingFlow::new(gateway.clone());
    through_interests(&mut flow).await;
    answer_all(&mut flow).await;
    flow.submit_answers().await.unwrap();
    choose_preferences(&mut flow);

    assert!(flow.submit_preferences().await.is_err());
    assert_eq!(flow.stage(), OnboardingStage::Preferences);
    assert!(flow.last_error().is_some());
    // Earlier stages stay persisted.
    assert_eq!(gateway.saved_interests.lock().len(), 1);

    gateway.fail_preferences(false);
    assert_eq!(flow.submit_preferences().await.unwrap(), OnboardingStage::Recommendation);
    assert!(flow.last_error().is_none());
}

#[tokio::test]
async fn incomplete_preferences_are_rejected_locally() {
    let gateway = gateway();
    let mut flow = OnboardingFlow::new(gateway.clone());
    flow.resume_at(OnboardingStage::Preferences);
    flow.set_preference(PreferenceAxis::Coding, "non-code").unwrap();

    assert!(matches!(
        flow.submit_preferences().await,
        Err(PathwiseError::InvalidInput(_))
    ));
    assert!(gateway.saved_preferences.lock().is_none());
}

#[test]
fn stage_and_axis_names_parse_back() {
    for stage in [
        OnboardingStage::Interests,
        OnboardingStage::Questions,
        OnboardingStage::Preferences,
        OnboardingStage::Recommendation,
        OnboardingStage::Complete,
    ] {
        assert_eq!(OnboardingStage::from_str(&stage.to_string()).unwrap(), stage);
    }
    assert_eq!(PreferenceAxis::from_str("CODING").unwrap(), PreferenceAxis::Coding);
    assert!(OnboardingStage::from_str("done").is_err());
}

#[tokio::test]
async fn stages_cannot_be_skipped() {
    let mut flow = OnboardingFlow::new(gateway());
    assert!(matches!(
        flow.submit_selection().await,
        Err(PathwiseError::InvalidInput(_))
    ));
    assert_eq!(flow.stage(), OnboardingStage::Interests);
}

#[tokio::test]
async fn no_interest_selected_blocks_continue() {
    let mut flow = OnboardingFlow::new(gateway());
    flow.load_interests().await.unwrap();
    assert!(flow.submit_interests().await.is_err());
    assert_eq!(flow.stage(), OnboardingStage::Interests);
}

// ============================================================================
// Track selection
// ============================================================================

#[tokio::test]
async fn empty_selection_is_rejected_without_request() {
    let gateway = gateway();
    let mut flow = OnboardingFlow::new(gateway.clone());
    flow.resume_at(OnboardingStage::Recommendation);
    flow.load_recommendations().await.unwrap();

    let err = flow.submit_selection().await.unwrap_err();
    assert_eq!(err, PathwiseError::InvalidInput("Please select between 1 and 4 career paths.".into()));
    assert_eq!(gateway.selection_calls(), 0);
}

#[tokio::test]
async fn fifth_track_toggle_is_ignored() {
    let gateway = gateway();
    let mut flow = OnboardingFlow::new(gateway.clone());
    flow.resume_at(OnboardingStage::Recommendation);
    for id in [1, 2, 3, 4] {
        assert!(flow.toggle_track(id));
    }
    assert!(!flow.toggle_track(5));
    assert_eq!(flow.track_selection().items(), &[1, 2, 3, 4]);

    assert_eq!(flow.submit_selection().await.unwrap(), OnboardingStage::Complete);
    assert_eq!(gateway.saved_selection.lock().last().cloned(), Some(vec![1, 2, 3, 4]));
}

#[tokio::test]
async fn server_rejected_selection_keeps_recommendation_stage() {
    let gateway = gateway();
    gateway.fail_selection(true);
    let mut flow = OnboardingFlow::new(gateway.clone());
    flow.resume_at(OnboardingStage::Recommendation);
    flow.toggle_track(100);

    let err = flow.submit_selection().await.unwrap_err();
    assert!(matches!(err, PathwiseError::ValidationFailed(_)));
    assert_eq!(flow.stage(), OnboardingStage::Recommendation);
}
