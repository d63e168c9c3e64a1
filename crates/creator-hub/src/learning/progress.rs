use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CHALLENGE_LENGTH_DAYS: u32 = 21;

/// A creator's completion mark for one day of the 21-day challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeDayRecord {
    pub day_number: u32,
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeProgress {
    pub completed_days: BTreeSet<u32>,
    pub total_days: u32,
}

impl ChallengeProgress {
    /// Counts each completed day once; day numbers outside the challenge are ignored.
    pub fn from_days(records: &[ChallengeDayRecord]) -> Self {
        let completed_days = records
            .iter()
            .filter(|record| record.is_completed)
            .map(|record| record.day_number)
            .filter(|day| (1..=CHALLENGE_LENGTH_DAYS).contains(day))
            .collect();

        Self {
            completed_days,
            total_days: CHALLENGE_LENGTH_DAYS,
        }
    }

    pub fn completed(&self) -> u32 {
        self.completed_days.len() as u32
    }

    pub fn percent(&self) -> u32 {
        if self.total_days == 0 {
            return 0;
        }
        self.completed() * 100 / self.total_days
    }

    /// The earliest day still open, if any.
    pub fn next_day(&self) -> Option<u32> {
        (1..=self.total_days).find(|day| !self.completed_days.contains(day))
    }

    pub fn is_finished(&self) -> bool {
        self.next_day().is_none()
    }
}

/// Watch state for a single course video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoProgressRecord {
    pub video_id: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub watched_seconds: u64,
}

/// Share of a video watched, rounded and capped at 100. Zero when the duration is unknown.
pub fn watch_percentage(watched_seconds: u64, duration_seconds: Option<u64>) -> u32 {
    match duration_seconds {
        Some(duration) if duration > 0 => {
            let rounded = (200 * watched_seconds + duration) / (2 * duration);
            rounded.min(100) as u32
        }
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CourseProgress {
    pub completed: usize,
    pub total: usize,
}

impl CourseProgress {
    /// Completed videos among `course_video_ids`; progress for other courses is ignored.
    pub fn from_videos<'a, I>(course_video_ids: I, progress: &[VideoProgressRecord]) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let course: HashSet<&str> = course_video_ids.into_iter().collect();
        let completed = progress
            .iter()
            .filter(|record| record.completed && course.contains(record.video_id.as_str()))
            .map(|record| record.video_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            completed,
            total: course.len(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}
