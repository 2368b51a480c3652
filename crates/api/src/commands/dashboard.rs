//! Dashboard view

use pathwise_core::{DashboardStatus, DashboardView, Route};
use serde::Serialize;

use super::CommandResult;
use crate::context::AppContext;
use crate::utils::execute_guarded;

/// Level banner at the top of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardHeader {
    pub greeting: String,
    pub level_title: String,
    pub xp_label: String,
    pub next_level_label: String,
    pub progress_percent: u8,
    pub streak_label: String,
}

/// Call to action shown instead of track cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub message: &'static str,
    pub button: &'static str,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPage {
    pub header: DashboardHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<CallToAction>,
    pub view: DashboardView,
}

impl From<DashboardView> for DashboardPage {
    fn from(view: DashboardView) -> Self {
        let level = view.level;
        let header = DashboardHeader {
            greeting: format!("Welcome back, {}!", view.username),
            level_title: format!("Level {} Career Explorer", level.level),
            xp_label: format!("{} XP", level.xp),
            next_level_label: format!("{} / {} XP to next level", level.xp, level.xp_for_next_level),
            progress_percent: level.percent(),
            streak_label: format!("{} days", view.streak),
        };

        let call_to_action = match &view.status {
            DashboardStatus::StartOnboarding => Some(CallToAction {
                message: "Complete onboarding to get your personalized career paths.",
                button: "Start Onboarding",
                target: Route::OnboardingInterests.path(),
            }),
            DashboardStatus::ChoosePaths => Some(CallToAction {
                message: "You have not chosen any career paths yet.",
                button: "Choose Career Paths",
                target: Route::OnboardingRecommendation.path(),
            }),
            DashboardStatus::Tracks { .. } => None,
        };

        Self { header, call_to_action, view }
    }
}

/// Load everything the dashboard shows.
///
/// Only a failed user fetch fails the command; other failures arrive as
/// inline messages in `view.errors`.
pub async fn dashboard(ctx: &AppContext) -> CommandResult<DashboardPage> {
    execute_guarded(ctx, &Route::Dashboard, "dashboard::dashboard", || async move {
        ctx.dashboard.load().await.map(DashboardPage::from)
    })
    .await
}
