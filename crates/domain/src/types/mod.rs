//! Domain types and models
//!
//! Everything here mirrors the REST API's JSON shapes. Types are read-only
//! snapshots: the client never mutates server-owned values such as xp.

pub mod auth;
pub mod career;
pub mod learning;
pub mod onboarding;
pub mod user;

pub use auth::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse};
pub use career::{CareerProgress, CareerTrack, Interest, SkillTags};
pub use learning::{
    DayInLife, FunFact, LearningPage, PageSection, Reflection, Scenario, ScenarioOption,
    SectionType,
};
pub use onboarding::{
    AnswerSubmission, AnswerValue, CodingPreference, CreativePreference, EnvironmentPreference,
    OnboardingQuestion, Preferences, QuestionType,
};
pub use user::User;
