//! REST endpoint paths, relative to the API base URL

pub const AUTH_TOKEN: &str = "/api/auth/token/";
pub const REGISTER: &str = "/api/users/register/";
pub const CURRENT_USER: &str = "/api/users/me/";
pub const UPDATE_INTERESTS: &str = "/api/users/update_interests/";
pub const UPDATE_PREFERENCES: &str = "/api/users/me/update_preferences/";
pub const RECOMMENDATIONS: &str = "/api/users/recommendations/";
pub const SELECT_CAREER_PATHS: &str = "/api/users/select_career_paths/";
pub const INTERESTS: &str = "/api/interests/";
pub const ONBOARDING_QUESTIONS: &str = "/api/onboarding-questions/";
pub const ONBOARDING_ANSWERS: &str = "/api/onboarding-answers/";
pub const SKILL_TAGS: &str = "/api/onboarding-answers/user_skill_tags/";
pub const PROGRESS: &str = "/api/progress/";
pub const CAREER_TRACKS: &str = "/api/career-tracks/";

/// `/api/career-tracks/{slug}/learning_page/`
pub fn learning_page(slug: &str) -> String {
    let mut path = String::from("/api/career-tracks/");
    path.push_str(&url::form_urlencoded::byte_serialize(slug.as_bytes()).collect::<String>());
    path.push_str("/learning_page/");
    path
}
