use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: u64 = 3600;

/// Activity and earnings snapshot evaluated against the bonus tier table.
///
/// Values arriving over the wire pass through [`RawCreatorMetrics`] so negative or
/// non-finite figures never reach the gate comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawCreatorMetrics")]
pub struct CreatorMetrics {
    pub days_streamed: u32,
    pub hours_streamed: f64,
    pub diamonds_earned: u64,
}

impl CreatorMetrics {
    pub fn new(days_streamed: u32, hours_streamed: f64, diamonds_earned: u64) -> Self {
        Self {
            days_streamed,
            hours_streamed: whole_hours(hours_streamed),
            diamonds_earned,
        }
    }

    /// Builds metrics from a live duration in seconds, flooring to whole hours.
    pub fn from_live_seconds(days_streamed: u32, live_seconds: u64, diamonds_earned: u64) -> Self {
        Self {
            days_streamed,
            hours_streamed: (live_seconds / SECONDS_PER_HOUR) as f64,
            diamonds_earned,
        }
    }

    /// Returns a copy safe for gate evaluation: hours truncated toward zero and
    /// anything negative or non-finite treated as zero.
    pub fn normalized(&self) -> Self {
        Self {
            days_streamed: self.days_streamed,
            hours_streamed: whole_hours(self.hours_streamed),
            diamonds_earned: self.diamonds_earned,
        }
    }
}

/// Unvalidated metrics as entered on the calculator screen or posted to the API.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawCreatorMetrics {
    #[serde(default)]
    pub days_streamed: i64,
    #[serde(default)]
    pub hours_streamed: f64,
    #[serde(default)]
    pub diamonds_earned: i64,
}

impl From<RawCreatorMetrics> for CreatorMetrics {
    fn from(raw: RawCreatorMetrics) -> Self {
        Self {
            days_streamed: u32::try_from(raw.days_streamed.max(0)).unwrap_or(u32::MAX),
            hours_streamed: whole_hours(raw.hours_streamed),
            diamonds_earned: u64::try_from(raw.diamonds_earned).unwrap_or(0),
        }
    }
}

fn whole_hours(hours: f64) -> f64 {
    if hours.is_finite() && hours > 0.0 {
        hours.trunc()
    } else {
        0.0
    }
}
