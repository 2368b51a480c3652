//! Question-by-question answering
//!
//! Answers are held locally until the whole set is submitted. "Next" is
//! only possible once the current question has a valid answer; "Previous"
//! is always possible except on the first question.

use std::collections::HashMap;

use pathwise_domain::constants::SCALE_DEFAULT;
use pathwise_domain::{AnswerSubmission, AnswerValue, OnboardingQuestion, PathwiseError, Result};

/// Outcome of pressing "Next"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStep {
    /// Moved to the question at this index.
    Moved(usize),
    /// The last question was answered; the set is ready to submit.
    Finished,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionFlow {
    questions: Vec<OnboardingQuestion>,
    index: usize,
    answers: HashMap<i64, AnswerValue>,
    finished: bool,
}

impl QuestionFlow {
    pub fn new(questions: Vec<OnboardingQuestion>) -> Self {
        Self { questions, index: 0, answers: HashMap::new(), finished: false }
    }

    pub fn current(&self) -> Option<&OnboardingQuestion> {
        self.questions.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Record an answer for the current question.
    ///
    /// # Errors
    /// Returns `InvalidInput` when the value does not fit the question type
    /// (e.g. a scale value outside 1..=5).
    pub fn answer(&mut self, value: AnswerValue) -> Result<()> {
        let question = self
            .current()
            .ok_or_else(|| PathwiseError::InvalidInput("There is no question to answer.".into()))?;

        if !value.is_valid_for(question) {
            return Err(PathwiseError::InvalidInput(format!(
                "That answer does not fit a {} question.",
                question.question_type
            )));
        }

        self.answers.insert(question.id, value);
        Ok(())
    }

    pub fn current_answer(&self) -> Option<&AnswerValue> {
        self.current().and_then(|question| self.answers.get(&question.id))
    }

    /// Value a scale control shows before the user touches it.
    pub fn scale_display_value(&self) -> i64 {
        match self.current_answer() {
            Some(AnswerValue::Scale(value)) => *value,
            _ => i64::from(SCALE_DEFAULT),
        }
    }

    pub fn can_advance(&self) -> bool {
        self.current_answer().is_some()
    }

    /// Press "Next".
    ///
    /// # Errors
    /// Returns `InvalidInput` when the current question is unanswered.
    pub fn advance(&mut self) -> Result<QuestionStep> {
        if self.questions.is_empty() {
            self.finished = true;
            return Ok(QuestionStep::Finished);
        }
        if !self.can_advance() {
            return Err(PathwiseError::InvalidInput(
                "Please answer the question before continuing.".into(),
            ));
        }
        if self.is_last() {
            self.finished = true;
            return Ok(QuestionStep::Finished);
        }
        self.index += 1;
        Ok(QuestionStep::Moved(self.index))
    }

    /// Press "Previous". Returns `false` on the first question.
    pub fn go_back(&mut self) -> bool {
        self.finished = false;
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// One submission per answered question, in question order.
    pub fn submissions(&self) -> Vec<AnswerSubmission> {
        self.questions
            .iter()
            .filter_map(|question| {
                self.answers
                    .get(&question.id)
                    .map(|answer| AnswerSubmission { question: question.id, answer: answer.clone() })
            })
            .collect()
    }
}
