//! Level math
//!
//! Every `XP_PER_LEVEL` points is one level. Values are derived from the
//! latest server-reported xp and never mutated locally.

use pathwise_domain::constants::{TRACK_LENGTH_DAYS, XP_PER_LEVEL};
use pathwise_domain::CareerProgress;
use serde::Serialize;

/// Level view derived from a user's total xp
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelProgress {
    pub xp: u64,
    /// 1-based level.
    pub level: u64,
    /// Total xp at which the next level starts.
    pub xp_for_next_level: u64,
    /// Share of the current level already earned, in `[0, 1)`.
    pub progress_fraction: f64,
}

impl LevelProgress {
    #[must_use]
    pub fn from_xp(xp: u64) -> Self {
        let level = xp / XP_PER_LEVEL + 1;
        let level_start = (level - 1) * XP_PER_LEVEL;
        Self {
            xp,
            level,
            xp_for_next_level: level.saturating_mul(XP_PER_LEVEL),
            progress_fraction: (xp - level_start) as f64 / XP_PER_LEVEL as f64,
        }
    }

    /// Progress bar width as a whole percentage.
    #[must_use]
    pub fn percent(&self) -> u8 {
        (self.progress_fraction * 100.0).floor() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Progress of one selected track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackProgress {
    pub status: TrackStatus,
    pub days_completed: u32,
    /// `days_completed / TRACK_LENGTH_DAYS`, clamped to `[0, 1]`.
    pub fraction: f64,
}

impl TrackProgress {
    /// Progress for a track; `None` means the user has no record for it yet.
    #[must_use]
    pub fn from_record(record: Option<&CareerProgress>) -> Self {
        let Some(record) = record else {
            return Self { status: TrackStatus::NotStarted, days_completed: 0, fraction: 0.0 };
        };

        let fraction =
            (f64::from(record.days_completed) / f64::from(TRACK_LENGTH_DAYS)).clamp(0.0, 1.0);
        let status = if record.completed || record.days_completed >= TRACK_LENGTH_DAYS {
            TrackStatus::Completed
        } else {
            TrackStatus::InProgress
        };

        Self { status, days_completed: record.days_completed, fraction }
    }

    /// Badge text shown on the track card.
    #[must_use]
    pub fn label(&self) -> String {
        match self.status {
            TrackStatus::NotStarted => "Not Started".to_string(),
            TrackStatus::InProgress | TrackStatus::Completed => {
                format!("{} Days Completed", self.days_completed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pathwise_domain::CareerTrack;

    use super::*;

    fn record(days_completed: u32, completed: bool) -> CareerProgress {
        CareerProgress {
            id: 1,
            career: CareerTrack {
                id: 2,
                slug: "ux".into(),
                title: "UX".into(),
                emoji: None,
                avg_salary: None,
                description: None,
                relevant_interests: vec![],
            },
            xp: 0,
            streak: 0,
            days_completed,
            completed,
            last_attempt: None,
        }
    }

    #[test]
    fn xp_250_is_halfway_through_level_3() {
        let progress = LevelProgress::from_xp(250);
        assert_eq!(progress.level, 3);
        assert_eq!(progress.xp_for_next_level, 300);
        assert!((progress.progress_fraction - 0.5).abs() < f64::EPSILON);
        assert_eq!(progress.percent(), 50);
    }

    #[test]
    fn fraction_resets_at_every_level_boundary() {
        for xp in [0, 100, 200, 1_000] {
            let progress = LevelProgress::from_xp(xp);
            assert_eq!(progress.progress_fraction, 0.0, "xp = {xp}");
            assert_eq!(progress.level, xp / 100 + 1);
        }
    }

    #[test]
    fn fraction_stays_below_one() {
        let progress = LevelProgress::from_xp(199);
        assert_eq!(progress.level, 2);
        assert!(progress.progress_fraction < 1.0);
        assert!(progress.progress_fraction >= 0.0);
    }

    #[test]
    fn largest_xp_saturates_the_next_level_threshold() {
        let progress = LevelProgress::from_xp(u64::MAX);
        assert_eq!(progress.level, u64::MAX / XP_PER_LEVEL + 1);
        assert_eq!(progress.xp_for_next_level, u64::MAX);
        assert!(progress.progress_fraction < 1.0);
        assert!(progress.percent() < 100);
    }

    #[test]
    fn track_without_record_is_not_started() {
        let progress = TrackProgress::from_record(None);
        assert_eq!(progress.status, TrackStatus::NotStarted);
        assert_eq!(progress.label(), "Not Started");
        assert_eq!(progress.fraction, 0.0);
    }

    #[test]
    fn track_fraction_is_days_over_fourteen_and_clamped() {
        let half = TrackProgress::from_record(Some(&record(7, false)));
        assert_eq!(half.status, TrackStatus::InProgress);
        assert!((half.fraction - 0.5).abs() < f64::EPSILON);
        assert_eq!(half.label(), "7 Days Completed");

        let over = TrackProgress::from_record(Some(&record(20, false)));
        assert_eq!(over.fraction, 1.0);
        assert_eq!(over.status, TrackStatus::Completed);
    }
}
