//! Learning page view

use pathwise_core::learning::{ScenarioFeedback, SectionView};
use pathwise_core::{LearningSession, LearningTab, Route};
use pathwise_domain::{FunFact, PathwiseError, Result as DomainResult, ScenarioOption};
use serde::Serialize;

use super::{CommandResult, ViewError};
use crate::context::AppContext;
use crate::utils::{execute_guarded, execute_local};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    pub time: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioCard {
    pub id: i64,
    pub question: String,
    /// `(letter, text)` for options A, B and C.
    pub options: Vec<(String, String)>,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<ScenarioFeedback>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReflectionCard {
    pub question: String,
    pub options: Vec<String>,
    pub chosen: Option<u8>,
}

/// Content of the selected tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tab", rename_all = "snake_case")]
pub enum TabContent {
    Learn { sections: Vec<SectionView>, fun_facts: Vec<FunFact> },
    FeelThePath {
        day_in_life: Vec<DayEntry>,
        scenarios: Vec<ScenarioCard>,
        reflection: Option<ReflectionCard>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningPageView {
    pub slug: String,
    pub title: String,
    pub tab_label: &'static str,
    pub content: TabContent,
    pub next_page: String,
}

impl From<&LearningSession> for LearningPageView {
    fn from(session: &LearningSession) -> Self {
        let page = session.page();
        let content = match session.tab() {
            LearningTab::Learn => {
                TabContent::Learn { sections: session.sections(), fun_facts: page.fun_facts.clone() }
            }
            LearningTab::FeelThePath => TabContent::FeelThePath {
                day_in_life: page
                    .day_in_life
                    .as_ref()
                    .map(|day| {
                        day.entries()
                            .into_iter()
                            .map(|(time, text)| DayEntry { time, text })
                            .collect()
                    })
                    .unwrap_or_default(),
                scenarios: page
                    .scenarios
                    .iter()
                    .map(|scenario| {
                        let feedback = session.scenario_feedback(scenario.id);
                        ScenarioCard {
                            id: scenario.id,
                            question: scenario.question.clone(),
                            options: ScenarioOption::ALL
                                .iter()
                                .map(|o| (o.to_string(), scenario.option_text(*o).to_string()))
                                .collect(),
                            locked: feedback.is_some(),
                            feedback,
                        }
                    })
                    .collect(),
                reflection: session.reflection().map(|reflection| ReflectionCard {
                    question: reflection.question_text.clone(),
                    options: vec![
                        reflection.option_1.clone(),
                        reflection.option_2.clone(),
                        reflection.option_3.clone(),
                    ],
                    chosen: session.reflection_choice(),
                }),
            },
        };

        Self {
            slug: session.slug().to_string(),
            title: session.title(),
            tab_label: session.tab().label(),
            content,
            next_page: next_page_path(session.slug(), page.page_number),
        }
    }
}

/// Route of the page after `page_number`, pinned at the last addressable page.
fn next_page_path(slug: &str, page_number: u32) -> String {
    Route::LearningPage { slug: slug.to_string(), page: page_number.saturating_add(1) }.path()
}

/// Open page `page` of a track on the "Learn" tab.
pub async fn open_learning_page(
    ctx: &AppContext,
    slug: &str,
    page: u32,
) -> CommandResult<LearningPageView> {
    let route = Route::LearningPage { slug: slug.to_string(), page };
    execute_guarded(ctx, &route, "learning::open_page", || async move {
        let session = ctx.learning.open(slug, page).await?;
        let view = LearningPageView::from(&session);
        *ctx.learning_page.lock().await = Some(session);
        Ok(view)
    })
    .await
}

pub async fn switch_learning_tab(
    ctx: &AppContext,
    tab: LearningTab,
) -> CommandResult<LearningPageView> {
    with_open_page(ctx, "learning::switch_tab", |session| {
        session.switch_tab(tab);
        Ok(())
    })
    .await
}

/// "Continue to Feel the Path".
pub async fn continue_to_feel_the_path(ctx: &AppContext) -> CommandResult<LearningPageView> {
    with_open_page(ctx, "learning::continue", |session| {
        session.continue_to_feel_the_path();
        Ok(())
    })
    .await
}

/// Answer a scenario with `"A"`, `"B"` or `"C"`.
pub async fn answer_scenario(
    ctx: &AppContext,
    scenario_id: i64,
    option: &str,
) -> CommandResult<LearningPageView> {
    with_open_page(ctx, "learning::answer_scenario", |session| {
        let option: ScenarioOption = option.parse().map_err(|_| {
            PathwiseError::InvalidInput(format!("'{option}' is not one of A, B or C."))
        })?;
        session.answer_scenario(scenario_id, option).map(drop)
    })
    .await
}

/// Pick reflection option 1, 2 or 3.
pub async fn choose_reflection(ctx: &AppContext, choice: u8) -> CommandResult<LearningPageView> {
    with_open_page(ctx, "learning::choose_reflection", |session| {
        session.choose_reflection(choice).map(drop)
    })
    .await
}

async fn with_open_page(
    ctx: &AppContext,
    command_name: &str,
    step: impl FnOnce(&mut LearningSession) -> DomainResult<()>,
) -> CommandResult<LearningPageView> {
    let mut guard = ctx.learning_page.lock().await;
    let session = guard.as_mut().ok_or_else(|| {
        ViewError::from(PathwiseError::InvalidInput("Open a learning page first.".into()))
    })?;
    let route =
        Route::LearningPage { slug: session.slug().to_string(), page: session.page().page_number };
    execute_local(ctx, &route, command_name, || {
        step(session)?;
        Ok(LearningPageView::from(&*session))
    })
}
