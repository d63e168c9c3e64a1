use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::metrics::CreatorMetrics;
use super::tiers::{TierDefinition, TierTable};

/// Inclusive payout bracket in whole dollars. `(0, 0)` when no tier qualifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayoutRange {
    pub min: u32,
    pub max: u32,
}

impl PayoutRange {
    pub fn is_zero(&self) -> bool {
        self.min == 0 && self.max == 0
    }
}

impl fmt::Display for PayoutRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            write!(f, "$0")
        } else {
            write!(f, "${}–${}", self.min, self.max)
        }
    }
}

/// Classification output with per-gate diagnostics.
///
/// When no tier qualifies the gate flags are aggregated across the whole table: a flag
/// is `true` if that gate passed for at least one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierResult {
    pub qualified_tier: Option<String>,
    pub payout: PayoutRange,
    pub activity_gate_met: bool,
    pub diamond_gate_met: bool,
}

impl TierResult {
    pub fn unqualified(activity_gate_met: bool, diamond_gate_met: bool) -> Self {
        Self {
            qualified_tier: None,
            payout: PayoutRange::default(),
            activity_gate_met,
            diamond_gate_met,
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.qualified_tier.is_some()
    }

    pub fn summary(&self) -> String {
        match (&self.qualified_tier, self.activity_gate_met, self.diamond_gate_met) {
            (Some(tier), _, _) => format!("qualified for {tier} ({})", self.payout),
            (None, true, true) => {
                "activity and diamond gates pass only for different tiers".to_string()
            }
            (None, true, false) => "activity met; diamonds outside every tier range".to_string(),
            (None, false, true) => "diamonds in range; activity requirement not met".to_string(),
            (None, false, false) => "requirements not met".to_string(),
        }
    }
}

/// Evaluates `tiers` in order and returns the first tier whose activity and diamond
/// gates both pass.
pub fn classify(metrics: &CreatorMetrics, tiers: &[TierDefinition]) -> TierResult {
    let metrics = metrics.normalized();
    let mut any_activity = false;
    let mut any_diamond = false;

    for tier in tiers {
        let activity = tier.activity_gate(metrics.days_streamed, metrics.hours_streamed);
        let diamond = tier.diamond_gate(metrics.diamonds_earned);

        if activity && diamond {
            return TierResult {
                qualified_tier: Some(tier.name.clone()),
                payout: PayoutRange {
                    min: tier.min_payout,
                    max: tier.max_payout,
                },
                activity_gate_met: true,
                diamond_gate_met: true,
            };
        }

        any_activity |= activity;
        any_diamond |= diamond;
    }

    TierResult::unqualified(any_activity, any_diamond)
}

/// Holds the shared tier table so every caller classifies against the same schedule.
#[derive(Debug, Clone)]
pub struct BonusEngine {
    table: TierTable,
}

impl BonusEngine {
    pub fn new(table: TierTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TierTable {
        &self.table
    }

    pub fn classify(&self, metrics: &CreatorMetrics) -> TierResult {
        let result = classify(metrics, self.table.tiers());
        debug!(
            days = metrics.days_streamed,
            hours = metrics.hours_streamed,
            diamonds = metrics.diamonds_earned,
            tier = result.qualified_tier.as_deref().unwrap_or("none"),
            "bonus tier classified"
        );
        result
    }
}

impl Default for BonusEngine {
    fn default() -> Self {
        Self::new(TierTable::standard())
    }
}
