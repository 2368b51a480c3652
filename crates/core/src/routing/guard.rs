//! Route guard
//!
//! A two-state machine over the live session: authenticated sessions render
//! protected routes, anonymous ones are redirected to login. While the
//! stored credential is still being checked the guard answers `Loading`
//! instead of redirecting.

use std::fmt;

use pathwise_common::auth::SessionState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    Root,
    Login,
    Register,
    Dashboard,
    OnboardingInterests,
    OnboardingQuestions,
    OnboardingPreferences,
    OnboardingRecommendation,
    /// Daily challenge quiz for a track.
    Challenge { track_id: String, day: u32 },
    ChallengeCompleted { career_id: String, day: u32 },
    FinalMatch,
    LearningPage { slug: String, page: u32 },
}

impl Route {
    /// Parse a path. Unknown paths yield `None` and fall back to `/`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Self::Root,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["dashboard"] => Self::Dashboard,
            ["onboarding", "interests"] => Self::OnboardingInterests,
            ["onboarding", "questions"] => Self::OnboardingQuestions,
            ["onboarding", "preferences"] => Self::OnboardingPreferences,
            ["onboarding", "recommendation"] => Self::OnboardingRecommendation,
            ["learning", track_id, day] => {
                Self::Challenge { track_id: (*track_id).to_string(), day: day.parse().ok()? }
            }
            ["challenge-completed", career_id, day] => Self::ChallengeCompleted {
                career_id: (*career_id).to_string(),
                day: day.parse().ok()?,
            },
            ["final-match"] => Self::FinalMatch,
            ["career-paths", slug, page] => {
                let page = page.strip_prefix("page-")?.parse().ok()?;
                Self::LearningPage { slug: (*slug).to_string(), page }
            }
            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::OnboardingInterests => "/onboarding/interests".to_string(),
            Self::OnboardingQuestions => "/onboarding/questions".to_string(),
            Self::OnboardingPreferences => "/onboarding/preferences".to_string(),
            Self::OnboardingRecommendation => "/onboarding/recommendation".to_string(),
            Self::Challenge { track_id, day } => format!("/learning/{track_id}/{day}"),
            Self::ChallengeCompleted { career_id, day } => {
                format!("/challenge-completed/{career_id}/{day}")
            }
            Self::FinalMatch => "/final-match".to_string(),
            Self::LearningPage { slug, page } => format!("/career-paths/{slug}/page-{page}"),
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Self::Root | Self::Login | Self::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    Render { route: Route },
    Redirect { to: Route },
    /// Session is still being validated; show a spinner.
    Loading,
}

/// Decide what to do with `route` given the current session state.
pub fn guard(route: &Route, state: &SessionState) -> GuardDecision {
    let authenticated = match state {
        SessionState::Loading if matches!(route, Route::Login | Route::Register) => false,
        SessionState::Loading => return GuardDecision::Loading,
        SessionState::Anonymous => false,
        SessionState::Authenticated(_) => true,
    };

    match (route, authenticated) {
        (Route::Root, true) => GuardDecision::Redirect { to: Route::Dashboard },
        (Route::Root, false) => GuardDecision::Redirect { to: Route::Login },
        (Route::Login | Route::Register, true) => GuardDecision::Redirect { to: Route::Dashboard },
        (Route::Login | Route::Register, false) => GuardDecision::Render { route: route.clone() },
        (_, true) => GuardDecision::Render { route: route.clone() },
        (_, false) => GuardDecision::Redirect { to: Route::Login },
    }
}

/// Resolve a raw path to its final decision, following redirects.
///
/// Unknown paths redirect to `/` first.
pub fn resolve(path: &str, state: &SessionState) -> GuardDecision {
    let mut route = Route::parse(path).unwrap_or(Route::Root);
    // The table has no redirect chains longer than two hops.
    for _ in 0..3 {
        match guard(&route, state) {
            GuardDecision::Redirect { to } => route = to,
            decision => return decision,
        }
    }
    GuardDecision::Render { route }
}

#[cfg(test)]
mod tests {
    use pathwise_common::auth::Credential;

    use super::*;

    fn authenticated() -> SessionState {
        SessionState::Authenticated(Credential::new("t"))
    }

    #[test]
    fn parses_parameterised_routes() {
        assert_eq!(
            Route::parse("/career-paths/data-science/page-2"),
            Some(Route::LearningPage { slug: "data-science".into(), page: 2 })
        );
        assert_eq!(
            Route::parse("/learning/5/3"),
            Some(Route::Challenge { track_id: "5".into(), day: 3 })
        );
        assert_eq!(Route::parse("/career-paths/x/intro"), None);
        assert_eq!(Route::parse("/nope"), None);
        assert_eq!(Route::parse("/dashboard?tab=1"), Some(Route::Dashboard));
    }

    #[test]
    fn paths_round_trip_through_parse() {
        let route = Route::ChallengeCompleted { career_id: "4".into(), day: 1 };
        assert_eq!(Route::parse(&route.path()), Some(route));
    }

    #[test]
    fn protected_routes_redirect_without_credential() {
        let decision = guard(&Route::Dashboard, &SessionState::Anonymous);
        assert_eq!(decision, GuardDecision::Redirect { to: Route::Login });
    }

    #[test]
    fn protected_routes_render_with_credential() {
        let route = Route::LearningPage { slug: "ux".into(), page: 1 };
        assert_eq!(guard(&route, &authenticated()), GuardDecision::Render { route });
    }

    #[test]
    fn loading_session_shows_loading_for_protected_routes() {
        assert_eq!(guard(&Route::Dashboard, &SessionState::Loading), GuardDecision::Loading);
        assert_eq!(
            guard(&Route::Login, &SessionState::Loading),
            GuardDecision::Render { route: Route::Login }
        );
    }

    #[test]
    fn public_routes_send_signed_in_users_to_dashboard() {
        assert_eq!(
            guard(&Route::Register, &authenticated()),
            GuardDecision::Redirect { to: Route::Dashboard }
        );
    }

    #[test]
    fn unknown_paths_fall_back_through_root() {
        assert_eq!(
            resolve("/admin/panel", &SessionState::Anonymous),
            GuardDecision::Render { route: Route::Login }
        );
        assert_eq!(
            resolve("/whatever", &authenticated()),
            GuardDecision::Render { route: Route::Dashboard }
        );
    }
}
