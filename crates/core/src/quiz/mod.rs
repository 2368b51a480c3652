//! Daily challenge quiz
//!
//! A fixed, locally defined question set walked one question at a time.
//! Completion reports a score computed from the recorded selections.

use pathwise_domain::{PathwiseError, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct: usize,
}

impl QuizQuestion {
    fn new(text: &str, options: [&str; 4], correct: usize) -> Self {
        Self { text: text.to_string(), options: options.map(String::from).to_vec(), correct }
    }
}

/// The built-in challenge questions.
pub fn default_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion::new(
            "What is the main responsibility of a software developer?",
            ["Designing clothes", "Writing code", "Cooking food", "Painting"],
            1,
        ),
        QuizQuestion::new(
            "Which tool is used for version control?",
            ["Git", "Excel", "Photoshop", "Word"],
            0,
        ),
        QuizQuestion::new(
            "What does UI stand for?",
            ["User Interface", "Unique Idea", "Ultra Internet", "Unit Index"],
            0,
        ),
        QuizQuestion::new("Which is a programming language?", ["Python", "Snake", "Lion", "Tiger"], 0),
        QuizQuestion::new("What is data analysis?", ["Studying data", "Drawing", "Singing", "Dancing"], 0),
        QuizQuestion::new(
            "What is cybersecurity about?",
            ["Protecting data", "Making cakes", "Driving cars", "Flying planes"],
            0,
        ),
        QuizQuestion::new("Which is a frontend framework?", ["React", "Django", "Flask", "Laravel"], 0),
    ]
}

/// Final result of a quiz run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
    pub correct: usize,
    pub total: usize,
}

impl QuizOutcome {
    /// Score as a whole percentage, rounded down.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.correct * 100 / self.total) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Moved to the question at this index.
    Next(usize),
    Completed(QuizOutcome),
}

#[derive(Debug, Clone)]
pub struct QuizFlow {
    questions: Vec<QuizQuestion>,
    current: usize,
    selected: Option<usize>,
    answers: Vec<usize>,
}

impl Default for QuizFlow {
    fn default() -> Self {
        Self::new(default_questions())
    }
}

impl QuizFlow {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self { questions, current: 0, selected: None, answers: Vec::new() }
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    /// 0-based index of the current question.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn answers(&self) -> &[usize] {
        &self.answers
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    pub fn can_advance(&self) -> bool {
        self.selected.is_some()
    }

    /// Choose an option on the current question; a later choice replaces it.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an index past the current options.
    pub fn select(&mut self, option: usize) -> Result<()> {
        let question = self
            .current()
            .ok_or_else(|| PathwiseError::InvalidInput("The quiz is already finished.".into()))?;
        if option >= question.options.len() {
            return Err(PathwiseError::InvalidInput(format!(
                "Option {} does not exist for this question.",
                option + 1
            )));
        }
        self.selected = Some(option);
        Ok(())
    }

    /// Record the selection and move on, or finish on the last question.
    ///
    /// # Errors
    /// Returns `InvalidInput` while nothing is selected.
    pub fn advance(&mut self) -> Result<QuizStep> {
        let Some(selection) = self.selected.take() else {
            return Err(PathwiseError::InvalidInput(
                "Please choose an answer before continuing.".into(),
            ));
        };
        self.answers.push(selection);

        if self.is_last() {
            self.current = self.questions.len();
            return Ok(QuizStep::Completed(self.outcome()));
        }
        self.current += 1;
        Ok(QuizStep::Next(self.current))
    }

    /// Score over the answers recorded so far.
    pub fn outcome(&self) -> QuizOutcome {
        let correct = self
            .answers
            .iter()
            .zip(&self.questions)
            .filter(|(answer, question)| **answer == question.correct)
            .count();
        QuizOutcome { correct, total: self.questions.len() }
    }
}
