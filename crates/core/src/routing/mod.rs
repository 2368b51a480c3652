//! Route table and access guard

pub mod guard;

pub use guard::{guard, resolve, GuardDecision, Route};
