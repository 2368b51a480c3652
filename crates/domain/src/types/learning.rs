//! Learning page content
//!
//! A learning page has two phases. Phase one is a list of typed text
//! sections; phase two ("Feel the Path") carries fun facts, a day-in-the-life
//! narrative, multiple-choice scenarios and reflection prompts.

use serde::{Deserialize, Serialize};

/// `GET /api/career-tracks/{slug}/learning_page/?page=N`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPage {
    pub id: i64,
    pub page_number: u32,
    #[serde(default)]
    pub sections: Vec<PageSection>,
    #[serde(default)]
    pub fun_facts: Vec<FunFact>,
    #[serde(default)]
    pub day_in_life: Option<DayInLife>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub reflections: Vec<Reflection>,
}

/// Known phase-one section kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionType {
    Overview,
    Scope,
    Opportunities,
    Skills,
    Knowledge,
}

crate::impl_wire_name_conversions!(SectionType {
    Overview => "overview",
    Scope => "scope",
    Opportunities => "opportunities",
    Skills => "skills",
    Knowledge => "knowledge",
});

impl SectionType {
    /// Heading shown above the section.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Scope => "Scope and Impact",
            Self::Opportunities => "Opportunities",
            Self::Skills => "Skills Required",
            Self::Knowledge => "Knowledge Areas",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSection {
    pub id: i64,
    /// Raw section kind. Kinds this client does not know are still rendered.
    pub section_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub order: u32,
}

impl PageSection {
    pub fn kind(&self) -> Option<SectionType> {
        self.section_type.parse().ok()
    }

    /// Display heading; unknown kinds fall back to the raw name.
    pub fn title(&self) -> String {
        self.kind()
            .map(|kind| kind.title().to_string())
            .unwrap_or_else(|| self.section_type.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunFact {
    pub id: i64,
    pub title: String,
    pub fact_text: String,
    pub takeaway: String,
}

/// Time-of-day narrative (`{"morning": "...", "afternoon": "..."}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayInLife {
    pub id: i64,
    #[serde(default)]
    pub narrative: serde_json::Map<String, serde_json::Value>,
}

impl DayInLife {
    /// Entries in server order with the time of day capitalised.
    ///
    /// Non-string narrative values are rendered as compact JSON.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.narrative
            .iter()
            .map(|(time, text)| {
                let text = match text {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (capitalize(time), text)
            })
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One of the three answers to a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioOption {
    A,
    B,
    C,
}

crate::impl_wire_name_conversions!(ScenarioOption {
    A => "A",
    B => "B",
    C => "C",
});

impl ScenarioOption {
    pub const ALL: [ScenarioOption; 3] = [Self::A, Self::B, Self::C];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub correct_option: ScenarioOption,
    pub explanation: String,
}

impl Scenario {
    pub fn option_text(&self, option: ScenarioOption) -> &str {
        match option {
            ScenarioOption::A => &self.option_a,
            ScenarioOption::B => &self.option_b,
            ScenarioOption::C => &self.option_c,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub id: i64,
    pub question_text: String,
    pub option_1: String,
    pub option_2: String,
    pub option_3: String,
}

impl Reflection {
    /// Option text for a 1-based choice.
    pub fn option_text(&self, choice: u8) -> Option<&str> {
        match choice {
            1 => Some(&self.option_1),
            2 => Some(&self.option_2),
            3 => Some(&self.option_3),
            _ => None,
        }
    }
}
