use crate::bonus::{CreatorMetrics, TierDefinition, TierTable};

pub(super) fn standard_tiers() -> TierTable {
    TierTable::standard()
}

pub(super) fn metrics(days: u32, hours: f64, diamonds: u64) -> CreatorMetrics {
    CreatorMetrics::new(days, hours, diamonds)
}

pub(super) fn tier(name: &str, days: u32, hours: f64, diamonds: (u64, u64)) -> TierDefinition {
    TierDefinition {
        name: name.to_string(),
        min_days: days,
        min_hours: hours,
        min_diamonds: diamonds.0,
        max_diamonds: diamonds.1,
        min_payout: 10,
        max_payout: 20,
    }
}
