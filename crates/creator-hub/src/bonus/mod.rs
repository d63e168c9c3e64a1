//! Bonus tier qualification.
//!
//! A creator qualifies for the first tier, highest first, whose activity gate (days and
//! hours streamed) and diamond gate (inclusive diamond range) both pass.

mod engine;
mod metrics;
mod tiers;

#[cfg(test)]
mod tests;

pub use engine::{classify, BonusEngine, PayoutRange, TierResult};
pub use metrics::{CreatorMetrics, RawCreatorMetrics};
pub use tiers::{TierDefinition, TierTable, TierTableError};
