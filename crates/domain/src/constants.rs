//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Selection caps
pub const MAX_INTERESTS: usize = 7;
pub const MAX_CAREER_PATHS: usize = 4;

// Gamification
pub const XP_PER_LEVEL: u64 = 100;
pub const TRACK_LENGTH_DAYS: u32 = 14;

// Onboarding questions
pub const SCALE_MIN: u8 = 1;
pub const SCALE_MAX: u8 = 5;
pub const SCALE_DEFAULT: u8 = 3;

// Session
pub const CREDENTIAL_STORAGE_KEY: &str = "token";
pub const DEFAULT_AUTH_SCHEME: &str = "Token";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "Pathwise.session";

// Learning pages
pub const FIRST_LEARNING_PAGE: u32 = 1;
pub const LEARNING_PAGE_UNAVAILABLE: &str =
    "This learning path is not available yet. Please check back later.";
