//! # Pathwise Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Onboarding, quiz and learning-page state machines
//! - XP level and track progress math
//! - Route table and access guard
//! - Port interfaces (traits) implemented by `pathwise-infra`
//!
//! ## Architecture Principles
//! - Depends only on `pathwise-common` and `pathwise-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod dashboard;
pub mod learning;
pub mod onboarding;
pub mod progress;
pub mod quiz;
pub mod routing;

pub use dashboard::{DashboardGateway, DashboardService, DashboardStatus, DashboardView, TrackCard};
pub use learning::ports::LearningGateway;
pub use learning::{LearningService, LearningSession, LearningTab};
pub use onboarding::{OnboardingFlow, OnboardingGateway, OnboardingStage};
pub use progress::{LevelProgress, TrackProgress, TrackStatus};
pub use quiz::{QuizFlow, QuizOutcome};
pub use routing::{guard, resolve, GuardDecision, Route};
