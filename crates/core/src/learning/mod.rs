//! Learning pages
//!
//! A page opens on the "Learn" tab (phase one sections). "Continue to Feel
//! the Path" switches to phase two, where each scenario and the first
//! reflection accept exactly one answer.

pub mod ports;

use std::collections::HashMap;
use std::sync::Arc;

use pathwise_domain::constants::LEARNING_PAGE_UNAVAILABLE;
use pathwise_domain::{LearningPage, PathwiseError, Reflection, Result, Scenario, ScenarioOption};
use serde::Serialize;
use tracing::{info, instrument};

pub use ports::LearningGateway;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum LearningTab {
    #[default]
    Learn,
    FeelThePath,
}

impl LearningTab {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Learn => "Learn",
            Self::FeelThePath => "Feel the Path",
        }
    }
}

/// Feedback shown under an answered scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioFeedback {
    pub chosen: ScenarioOption,
    pub correct: bool,
    pub message: &'static str,
    pub explanation: String,
}

impl ScenarioFeedback {
    fn new(scenario: &Scenario, chosen: ScenarioOption) -> Self {
        let correct = chosen == scenario.correct_option;
        Self {
            chosen,
            correct,
            message: if correct { "Correct!" } else { "Not quite right." },
            explanation: scenario.explanation.clone(),
        }
    }
}

/// Rendered phase-one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub title: String,
    pub content: String,
}

/// One open learning page and the user's interaction with it
#[derive(Debug, Clone)]
pub struct LearningSession {
    slug: String,
    page: LearningPage,
    tab: LearningTab,
    scenario_answers: HashMap<i64, ScenarioOption>,
    reflection_choice: Option<u8>,
}

impl LearningSession {
    pub fn new(slug: impl Into<String>, page: LearningPage) -> Self {
        Self {
            slug: slug.into(),
            page,
            tab: LearningTab::default(),
            scenario_answers: HashMap::new(),
            reflection_choice: None,
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn page(&self) -> &LearningPage {
        &self.page
    }

    pub fn title(&self) -> String {
        format!("Learning Path - Page {}", self.page.page_number)
    }

    pub fn tab(&self) -> LearningTab {
        self.tab
    }

    pub fn switch_tab(&mut self, tab: LearningTab) {
        self.tab = tab;
    }

    pub fn continue_to_feel_the_path(&mut self) {
        self.switch_tab(LearningTab::FeelThePath);
    }

    /// Phase-one sections in display order.
    pub fn sections(&self) -> Vec<SectionView> {
        let mut sections: Vec<_> = self.page.sections.iter().collect();
        sections.sort_by_key(|section| section.order);
        sections
            .into_iter()
            .map(|section| SectionView { title: section.title(), content: section.content.clone() })
            .collect()
    }

    /// Answer a scenario. Each scenario locks after its first answer.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an unknown scenario or a second answer.
    pub fn answer_scenario(
        &mut self,
        scenario_id: i64,
        option: ScenarioOption,
    ) -> Result<ScenarioFeedback> {
        let scenario = self.scenario(scenario_id)?;
        if self.scenario_answers.contains_key(&scenario_id) {
            return Err(PathwiseError::InvalidInput(
                "This scenario has already been answered.".into(),
            ));
        }
        let feedback = ScenarioFeedback::new(scenario, option);
        self.scenario_answers.insert(scenario_id, option);
        Ok(feedback)
    }

    pub fn scenario_feedback(&self, scenario_id: i64) -> Option<ScenarioFeedback> {
        let chosen = *self.scenario_answers.get(&scenario_id)?;
        let scenario = self.page.scenarios.iter().find(|s| s.id == scenario_id)?;
        Some(ScenarioFeedback::new(scenario, chosen))
    }

    /// Only the first reflection prompt is shown.
    pub fn reflection(&self) -> Option<&Reflection> {
        self.page.reflections.first()
    }

    /// Pick option 1, 2 or 3 of the reflection. Locks after one choice.
    ///
    /// # Errors
    /// Returns `InvalidInput` when there is no reflection, the choice is out
    /// of range, or a choice was already made.
    pub fn choose_reflection(&mut self, choice: u8) -> Result<&str> {
        if self.reflection_choice.is_some() {
            return Err(PathwiseError::InvalidInput("You have already reflected on this.".into()));
        }
        let reflection = self
            .page
            .reflections
            .first()
            .ok_or_else(|| PathwiseError::InvalidInput("This page has no reflection.".into()))?;
        let text = reflection.option_text(choice).ok_or_else(|| {
            PathwiseError::InvalidInput(format!("Reflection option {choice} does not exist."))
        })?;
        self.reflection_choice = Some(choice);
        Ok(text)
    }

    pub fn reflection_choice(&self) -> Option<u8> {
        self.reflection_choice
    }

    fn scenario(&self, scenario_id: i64) -> Result<&Scenario> {
        self.page.scenarios.iter().find(|s| s.id == scenario_id).ok_or_else(|| {
            PathwiseError::InvalidInput(format!("Scenario {scenario_id} is not on this page."))
        })
    }
}

/// Loads learning pages through the gateway
pub struct LearningService {
    gateway: Arc<dyn LearningGateway>,
}

impl LearningService {
    pub fn new(gateway: Arc<dyn LearningGateway>) -> Self {
        Self { gateway }
    }

    /// Open a page on the "Learn" tab.
    ///
    /// # Errors
    /// A missing page becomes `NotFound` carrying the "not available yet"
    /// message; other failures pass through.
    #[instrument(skip(self))]
    pub async fn open(&self, slug: &str, page_number: u32) -> Result<LearningSession> {
        match self.gateway.learning_page(slug, page_number).await {
            Ok(page) => {
                info!(slug, page_number, sections = page.sections.len(), "Learning page loaded");
                Ok(LearningSession::new(slug, page))
            }
            Err(PathwiseError::NotFound(_)) => {
                Err(PathwiseError::NotFound(LEARNING_PAGE_UNAVAILABLE.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}
