//! Onboarding questions, answers and work-style preferences

use serde::{Deserialize, Serialize};

use crate::constants::{SCALE_MAX, SCALE_MIN};

/// How an onboarding question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "yes_no")]
    YesNo,
    #[serde(rename = "multi_choice")]
    MultiChoice,
    #[serde(rename = "scale_1_5")]
    Scale,
}

crate::impl_wire_name_conversions!(QuestionType {
    YesNo => "yes_no",
    MultiChoice => "multi_choice",
    Scale => "scale_1_5",
});

/// Question served by `GET /api/onboarding-questions/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingQuestion {
    pub id: i64,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    /// Only present for multiple-choice questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl OnboardingQuestion {
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }
}

/// Answer to one onboarding question, typed by the question's kind
///
/// Serialized untagged so the wire body carries a bare JSON bool, integer or
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Scale(i64),
    Choice(String),
}

impl AnswerValue {
    /// Whether this value is an acceptable answer to `question`.
    ///
    /// Mirrors the server's validation so invalid answers never leave the
    /// client.
    pub fn is_valid_for(&self, question: &OnboardingQuestion) -> bool {
        match (question.question_type, self) {
            (QuestionType::YesNo, Self::Bool(_)) => true,
            (QuestionType::MultiChoice, Self::Choice(choice)) => {
                question.options().iter().any(|option| option == choice)
            }
            (QuestionType::Scale, Self::Scale(value)) => {
                (i64::from(SCALE_MIN)..=i64::from(SCALE_MAX)).contains(value)
            }
            _ => false,
        }
    }
}

/// Body of `POST /api/onboarding-answers/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question: i64,
    pub answer: AnswerValue,
}

// ============================================================================
// Preferences
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodingPreference {
    Code,
    NonCode,
}

crate::impl_wire_name_conversions!(CodingPreference {
    Code => "code",
    NonCode => "non-code",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreativePreference {
    Creative,
    Analytical,
}

crate::impl_wire_name_conversions!(CreativePreference {
    Creative => "creative",
    Analytical => "analytical",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentPreference {
    Indoor,
    Outdoor,
}

crate::impl_wire_name_conversions!(EnvironmentPreference {
    Indoor => "indoor",
    Outdoor => "outdoor",
});

/// Complete set of work-style preferences, one value per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub coding: CodingPreference,
    pub creative: CreativePreference,
    pub environment: EnvironmentPreference,
}
