//! XP levels and per-track progress

pub mod level;

pub use level::{LevelProgress, TrackProgress, TrackStatus};
