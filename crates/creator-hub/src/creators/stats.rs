use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::CreatorRecord;
use crate::bonus::CreatorMetrics;

const SECONDS_PER_HOUR: u64 = 3600;
const DEFAULT_STATUS: &str = "Rookie (New)";

/// Graduation milestone shown on the progress bar. Independent of the bonus tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressTarget {
    Silver,
    Gold,
}

impl fmt::Display for ProgressTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressTarget::Silver => f.write_str("Silver"),
            ProgressTarget::Gold => f.write_str("Gold"),
        }
    }
}

/// Fallback milestone amounts for records without their own targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDefaults {
    pub silver: u64,
    pub gold: u64,
}

impl Default for TargetDefaults {
    fn default() -> Self {
        Self {
            silver: 200_000,
            gold: 500_000,
        }
    }
}

/// Normalized dashboard figures for one creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorStats {
    pub monthly_diamonds: u64,
    pub total_diamonds: u64,
    pub diamonds_30d: u64,
    pub live_days: u32,
    pub live_hours: u64,
    pub streak: u32,
    /// Share of the next target reached; may exceed 100.
    pub current_progress_percent: f64,
    pub remaining: u64,
    pub next_target: ProgressTarget,
    pub target_amount: u64,
    pub current_status: String,
}

impl CreatorStats {
    /// Live days, whole live hours, and total diamonds as fed to the bonus calculator.
    pub fn metrics(&self) -> CreatorMetrics {
        CreatorMetrics::new(self.live_days, self.live_hours as f64, self.total_diamonds)
    }
}

pub fn derive_stats(record: &CreatorRecord) -> CreatorStats {
    derive_stats_with(record, &TargetDefaults::default())
}

pub fn derive_stats_with(record: &CreatorRecord, defaults: &TargetDefaults) -> CreatorStats {
    let total_diamonds = non_negative(record.total_diamonds);
    let live_days = u32::try_from(non_negative(record.live_days_30d)).unwrap_or(u32::MAX);
    let live_hours = non_negative(record.live_duration_seconds_30d) / SECONDS_PER_HOUR;

    let silver_target = target_or(record.silver_target, defaults.silver);
    let gold_target = target_or(record.gold_target, defaults.gold);

    let (next_target, target_amount) = if total_diamonds < silver_target {
        (ProgressTarget::Silver, silver_target)
    } else {
        (ProgressTarget::Gold, gold_target)
    };

    let remaining = target_amount.saturating_sub(total_diamonds);
    let current_progress_percent = if target_amount > 0 {
        total_diamonds as f64 / target_amount as f64 * 100.0
    } else {
        0.0
    };

    let current_status = record
        .graduation_status
        .as_deref()
        .map(str::trim)
        .filter(|status| !status.is_empty())
        .unwrap_or(DEFAULT_STATUS)
        .to_string();

    CreatorStats {
        monthly_diamonds: non_negative(record.diamonds_monthly),
        total_diamonds,
        diamonds_30d: non_negative(record.diamonds_30d),
        live_days,
        live_hours,
        streak: live_days,
        current_progress_percent,
        remaining,
        next_target,
        target_amount,
        current_status,
    }
}

fn non_negative(value: Option<i64>) -> u64 {
    value.and_then(|raw| u64::try_from(raw).ok()).unwrap_or(0)
}

// Zero and null both fall back to the default, matching how targets are seeded.
fn target_or(value: Option<i64>, default: u64) -> u64 {
    match non_negative(value) {
        0 => default,
        target => target,
    }
}
