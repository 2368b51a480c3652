//! Onboarding: interests, questions, preferences and track selection

pub mod flow;
pub mod ports;
pub mod preferences;
pub mod questions;
pub mod selection;

pub use flow::{AnswerBatchReport, FailedAnswer, OnboardingFlow, OnboardingStage};
pub use ports::OnboardingGateway;
pub use preferences::{PreferenceAxis, PreferenceForm};
pub use questions::{QuestionFlow, QuestionStep};
pub use selection::{validate_career_selection, BoundedSelection};
