//! Navigation over the route table
//!
//! The [`Navigator`] keeps the current location and re-runs the guard
//! whenever the session changes, so a logout or a rejected credential moves
//! a protected view to the login page without the view asking.

use pathwise_common::auth::SessionState;
use pathwise_core::{resolve, GuardDecision, Route};
use pathwise_domain::PathwiseError;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::watch;
use tracing::debug;

use super::{
    challenge_completed, dashboard, final_match, open_interests, open_learning_page,
    open_preferences, open_questions, open_recommendations, start_challenge, CommandResult,
    ViewError,
};
use crate::context::AppContext;

/// Resolve `path` against the current session once.
pub fn navigate(ctx: &AppContext, path: &str) -> GuardDecision {
    resolve(path, &ctx.session.state())
}

pub struct Navigator {
    session: watch::Receiver<SessionState>,
    location: Route,
}

impl Navigator {
    pub fn new(ctx: &AppContext) -> Self {
        Self { session: ctx.session.subscribe(), location: Route::Root }
    }

    pub fn location(&self) -> &Route {
        &self.location
    }

    /// Navigate to `path`; the location changes only when the result renders.
    pub fn go(&mut self, path: &str) -> GuardDecision {
        let state = self.session.borrow_and_update().clone();
        self.apply(resolve(path, &state))
    }

    /// Wait for the next session transition and re-check the location.
    ///
    /// Returns `None` once the session store is gone.
    pub async fn session_changed(&mut self) -> Option<GuardDecision> {
        self.session.changed().await.ok()?;
        let state = self.session.borrow_and_update().clone();
        let decision = resolve(&self.location.path(), &state);
        debug!(location = %self.location, ?decision, "Session changed, re-checking route");
        Some(self.apply(decision))
    }

    fn apply(&mut self, decision: GuardDecision) -> GuardDecision {
        if let GuardDecision::Render { route } = &decision {
            self.location = route.clone();
        }
        decision
    }
}

/// Open the view behind `route` and return its view model as JSON.
///
/// Login and register are plain forms and render without a request.
pub async fn open_route(ctx: &AppContext, route: &Route) -> CommandResult<Value> {
    match route {
        Route::Root => Err(ViewError::redirect(Route::Login)),
        Route::Login => Ok(json!({"form": "login", "fields": ["username", "password"]})),
        Route::Register => Ok(json!({
            "form": "register",
            "fields": ["username", "email", "password", "confirm_password"]
        })),
        Route::Dashboard => to_json(dashboard(ctx).await),
        Route::OnboardingInterests => to_json(open_interests(ctx).await),
        Route::OnboardingQuestions => to_json(open_questions(ctx).await),
        Route::OnboardingPreferences => to_json(open_preferences(ctx).await),
        Route::OnboardingRecommendation => to_json(open_recommendations(ctx).await),
        Route::Challenge { track_id, day } => to_json(start_challenge(ctx, track_id, *day).await),
        Route::ChallengeCompleted { career_id, day } => {
            to_json(challenge_completed(ctx, career_id, *day).await)
        }
        Route::FinalMatch => to_json(final_match(ctx).await),
        Route::LearningPage { slug, page } => to_json(open_learning_page(ctx, slug, *page).await),
    }
}

fn to_json<T: Serialize>(result: CommandResult<T>) -> CommandResult<Value> {
    let view = result?;
    serde_json::to_value(view).map_err(|e| {
        ViewError::from(PathwiseError::Internal(format!("Failed to render view: {e}")))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pathwise_common::auth::MemoryCredentialStore;
    use pathwise_domain::Config;

    use super::*;

    fn context() -> AppContext {
        AppContext::with_credential_store(Config::default(), Arc::new(MemoryCredentialStore::new()))
            .unwrap()
    }

    #[tokio::test]
    async fn loading_session_defers_protected_routes() {
        let ctx = context();
        assert_eq!(navigate(&ctx, "/dashboard"), GuardDecision::Loading);
        assert_eq!(navigate(&ctx, "/login"), GuardDecision::Render { route: Route::Login });
    }

    #[tokio::test]
    async fn navigator_follows_logout_to_login() {
        let ctx = context();
        ctx.session.hydrate().await;
        let mut navigator = Navigator::new(&ctx);

        assert_eq!(navigator.go("/nowhere"), GuardDecision::Render { route: Route::Login });
        assert_eq!(navigator.location(), &Route::Login);

        ctx.session.logout().await;
        let decision = navigator.session_changed().await;
        assert_eq!(decision, Some(GuardDecision::Render { route: Route::Login }));
    }

    #[tokio::test]
    async fn protected_views_redirect_anonymous_users() {
        let ctx = context();
        ctx.session.hydrate().await;

        let error = open_route(&ctx, &Route::Dashboard).await.unwrap_err();
        assert_eq!(error.redirect.as_deref(), Some("/login"));

        let form = open_route(&ctx, &Route::Login).await.unwrap();
        assert_eq!(form["form"], "login");
    }
}
