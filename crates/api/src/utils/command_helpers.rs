//! Command execution helpers
//!
//! Every command goes through [`execute_command`] so timing, outcome
//! logging and the forced logout after an authentication rejection live in
//! one place.

use std::future::Future;
use std::time::Instant;

use pathwise_core::{guard, GuardDecision, Route};
use pathwise_domain::Result as DomainResult;

use crate::commands::ViewError;
use crate::context::AppContext;
use crate::utils::logging::{error_label, log_command_execution};

/// Execute a command with timing, logging and rejection handling
///
/// An `AuthRejected` failure ends the session before the error is returned,
/// so the next guarded navigation lands on the login page.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn dashboard(ctx: &AppContext) -> CommandResult<DashboardPage> {
///     execute_command(ctx, "dashboard::dashboard", || async move {
///         ctx.dashboard.load().await.map(DashboardPage::from)
///     })
///     .await
/// }
/// ```
pub async fn execute_command<F, Fut, T>(
    ctx: &AppContext,
    command_name: &str,
    command_fn: F,
) -> Result<T, ViewError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    let elapsed = start.elapsed();
    log_command_execution(command_name, elapsed, result.as_ref().err().map(error_label));

    match result {
        Ok(value) => Ok(value),
        Err(error) => {
            if error.requires_login() {
                ctx.session.handle_rejection().await;
            }
            Err(ViewError::from(error))
        }
    }
}

/// Refuse to run a protected command unless the session may render `route`
///
/// # Errors
/// Returns a `ViewError` carrying the redirect target (or `loading` while
/// the session is still being checked).
pub fn authorize(ctx: &AppContext, route: &Route) -> Result<(), ViewError> {
    match guard(route, &ctx.session.state()) {
        GuardDecision::Render { .. } => Ok(()),
        GuardDecision::Redirect { to } => Err(ViewError::redirect(to)),
        GuardDecision::Loading => Err(ViewError::loading()),
    }
}

/// Same as [`execute_command`] behind [`authorize`]
pub async fn execute_guarded<F, Fut, T>(
    ctx: &AppContext,
    route: &Route,
    command_name: &str,
    command_fn: F,
) -> Result<T, ViewError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    authorize(ctx, route)?;
    execute_command(ctx, command_name, command_fn).await
}

/// Run a synchronous, local-only step of a protected view
///
/// Local steps never reach the network, so only invalid input is expected.
pub fn execute_local<T>(
    ctx: &AppContext,
    route: &Route,
    command_name: &str,
    command_fn: impl FnOnce() -> DomainResult<T>,
) -> Result<T, ViewError> {
    authorize(ctx, route)?;
    let start = Instant::now();
    let result = command_fn();
    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(error_label));
    result.map_err(ViewError::from)
}
