//! Shared test helpers for `pathwise-core` integration tests.
//!
//! Fixtures build wire types with sensible defaults; gateways are
//! in-memory mocks that record the calls made against them.

#![allow(dead_code)]

pub mod gateways;

use pathwise_domain::{
    CareerProgress, CareerTrack, Interest, OnboardingQuestion, QuestionType, User,
};

pub fn user(id: i64) -> User {
    User {
        id,
        username: format!("user{id}"),
        email: Some(format!("user{id}@example.com")),
        xp: 0,
        streak: 0,
        interests: Vec::new(),
        selected_career_paths: Vec::new(),
        onboarding_complete: false,
    }
}

pub fn interest(id: i64, name: &str) -> Interest {
    Interest { id, name: name.to_string(), emoji: None }
}

pub fn track(id: i64, slug: &str) -> CareerTrack {
    CareerTrack {
        id,
        slug: slug.to_string(),
        title: slug.replace('-', " "),
        emoji: None,
        avg_salary: None,
        description: None,
        relevant_interests: Vec::new(),
    }
}

pub fn progress(id: i64, career: CareerTrack, days_completed: u32) -> CareerProgress {
    CareerProgress {
        id,
        career,
        xp: u64::from(days_completed) * 10,
        streak: 0,
        days_completed,
        completed: days_completed >= 14,
        last_attempt: None,
    }
}

pub fn yes_no(id: i64, text: &str) -> OnboardingQuestion {
    OnboardingQuestion {
        id,
        question_type: QuestionType::YesNo,
        text: text.to_string(),
        options: None,
        tags: Vec::new(),
    }
}

pub fn scale(id: i64, text: &str) -> OnboardingQuestion {
    OnboardingQuestion {
        id,
        question_type: QuestionType::Scale,
        text: text.to_string(),
        options: None,
        tags: Vec::new(),
    }
}

pub fn multi_choice(id: i64, text: &str, options: &[&str]) -> OnboardingQuestion {
    OnboardingQuestion {
        id,
        question_type: QuestionType::MultiChoice,
        text: text.to_string(),
        options: Some(options.iter().map(|o| (*o).to_string()).collect()),
        tags: Vec::new(),
    }
}
