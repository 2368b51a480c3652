//! Login, registration and logout

use std::time::Instant;

use pathwise_common::auth::{AuthError, SessionState};
use pathwise_core::Route;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{CommandResult, ViewError};
use crate::context::AppContext;
use crate::utils::log_command_execution;

const LOGIN_FAILED: &str = "Failed to login. Please check your credentials and try again.";
const REGISTER_FAILED: &str = "Failed to create your account. Please try again.";

#[derive(Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Where to go after an auth action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub authenticated: bool,
    pub redirect: String,
}

impl AuthOutcome {
    fn to(authenticated: bool, route: Route) -> Self {
        Self { authenticated, redirect: route.path() }
    }
}

/// Log in and continue to the dashboard.
pub async fn login(ctx: &AppContext, form: LoginForm) -> CommandResult<AuthOutcome> {
    let command_name = "auth::login";
    let start = Instant::now();

    if form.username.trim().is_empty() || form.password.is_empty() {
        log_command_execution(command_name, start.elapsed(), Some("invalid_input"));
        return Err(invalid("Please enter your username and password."));
    }

    let result = ctx.session.login(form.username.trim(), &form.password).await;
    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(auth_label));

    result.map_err(|e| with_fallback(ViewError::from(e), LOGIN_FAILED))?;
    ctx.reset_flows().await;
    Ok(AuthOutcome::to(true, Route::Dashboard))
}

/// Create an account, log in with the issued credential and start onboarding.
pub async fn register(ctx: &AppContext, form: RegisterForm) -> CommandResult<AuthOutcome> {
    let command_name = "auth::register";
    let start = Instant::now();

    if let Err(e) = validate_registration(&form) {
        log_command_execution(command_name, start.elapsed(), Some("invalid_input"));
        return Err(e);
    }

    let result =
        ctx.session.register(form.username.trim(), form.email.trim(), &form.password).await;
    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(auth_label));

    result.map_err(|e| with_fallback(ViewError::from(e), REGISTER_FAILED))?;
    ctx.reset_flows().await;
    Ok(AuthOutcome::to(true, Route::OnboardingInterests))
}

/// Forget the credential and return to the login page.
pub async fn logout(ctx: &AppContext) -> AuthOutcome {
    let start = Instant::now();
    ctx.session.logout().await;
    ctx.reset_flows().await;
    log_command_execution("auth::logout", start.elapsed(), None);
    AuthOutcome::to(false, Route::Login)
}

/// Resolve the stored credential once at startup.
pub async fn hydrate_session(ctx: &AppContext) -> SessionState {
    let start = Instant::now();
    let state = ctx.session.hydrate().await;
    info!(authenticated = state.is_authenticated(), "Session hydrated");
    log_command_execution("auth::hydrate_session", start.elapsed(), None);
    state
}

fn validate_registration(form: &RegisterForm) -> CommandResult<()> {
    if form.username.trim().is_empty() || form.email.trim().is_empty() || form.password.is_empty()
    {
        return Err(invalid("Please fill in every field."));
    }
    if !form.email.contains('@') {
        return Err(invalid("Please enter a valid email address."));
    }
    if form.password != form.confirm_password {
        return Err(invalid("Passwords do not match."));
    }
    Ok(())
}

fn invalid(message: &str) -> ViewError {
    ViewError { kind: "invalid_input", message: message.into(), redirect: None }
}

/// Transport and storage failures show the form's own fallback message.
fn with_fallback(mut error: ViewError, fallback: &str) -> ViewError {
    if matches!(error.kind, "transport" | "storage") {
        error.message = fallback.into();
    }
    error
}

fn auth_label(error: &AuthError) -> &'static str {
    match error {
        AuthError::Rejected(_) => "auth_rejected",
        AuthError::Invalid(_) => "validation_failed",
        AuthError::Unavailable(_) => "transport",
    }
}
