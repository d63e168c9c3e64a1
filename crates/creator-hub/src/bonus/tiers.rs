use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A named bonus bracket with its activity requirement, diamond range, and payout range.
///
/// Both ranges are inclusive at each end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDefinition {
    pub name: String,
    pub min_days: u32,
    pub min_hours: f64,
    pub min_diamonds: u64,
    pub max_diamonds: u64,
    pub min_payout: u32,
    pub max_payout: u32,
}

impl TierDefinition {
    pub fn activity_gate(&self, days_streamed: u32, hours_streamed: f64) -> bool {
        days_streamed >= self.min_days && hours_streamed >= self.min_hours
    }

    pub fn diamond_gate(&self, diamonds_earned: u64) -> bool {
        diamonds_earned >= self.min_diamonds && diamonds_earned <= self.max_diamonds
    }
}

/// Ordered tier list, highest tier first.
///
/// Construction guarantees non-overlapping, strictly descending diamond ranges and
/// non-increasing activity requirements, so first-match evaluation always lands on the
/// best tier the diamond count allows.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct TierTable {
    tiers: Vec<TierDefinition>,
}

impl TierTable {
    pub fn new(tiers: Vec<TierDefinition>) -> Result<Self, TierTableError> {
        validate(&tiers)?;
        Ok(Self { tiers })
    }

    /// The agency's published bonus schedule.
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                TierDefinition {
                    name: "Elite".to_string(),
                    min_days: 22,
                    min_hours: 100.0,
                    min_diamonds: 1_600_000,
                    max_diamonds: 16_000_000,
                    min_payout: 650,
                    max_payout: 1_050,
                },
                TierDefinition {
                    name: "Expert".to_string(),
                    min_days: 20,
                    min_hours: 60.0,
                    min_diamonds: 500_000,
                    max_diamonds: 1_599_999,
                    min_payout: 250,
                    max_payout: 350,
                },
                TierDefinition {
                    name: "Ascensus".to_string(),
                    min_days: 15,
                    min_hours: 40.0,
                    min_diamonds: 100_000,
                    max_diamonds: 499_999,
                    min_payout: 30,
                    max_payout: 90,
                },
            ],
        }
    }

    /// Reads a CSV table with a `name,min_days,min_hours,min_diamonds,max_diamonds,
    /// min_payout,max_payout` header, rows ordered highest tier first.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TierTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut tiers = Vec::new();
        for row in csv_reader.deserialize::<TierDefinition>() {
            tiers.push(row?);
        }

        Self::new(tiers)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TierTableError> {
        let file = File::open(path.as_ref()).map_err(|source| TierTableError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_csv_reader(file)
    }

    pub fn tiers(&self) -> &[TierDefinition] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TierDefinition> {
        self.tiers.iter().find(|tier| tier.name == name)
    }
}

fn validate(tiers: &[TierDefinition]) -> Result<(), TierTableError> {
    let mut seen = HashSet::new();
    let mut previous: Option<&TierDefinition> = None;

    for tier in tiers {
        let name = tier.name.trim();
        if name.is_empty() {
            return Err(TierTableError::EmptyName);
        }
        if !seen.insert(name) {
            return Err(TierTableError::DuplicateName(name.to_string()));
        }
        if !tier.min_hours.is_finite() || tier.min_hours < 0.0 {
            return Err(TierTableError::InvalidHours(name.to_string()));
        }
        if tier.min_diamonds > tier.max_diamonds {
            return Err(TierTableError::InvertedDiamondRange(name.to_string()));
        }
        if tier.min_payout > tier.max_payout {
            return Err(TierTableError::InvertedPayoutRange(name.to_string()));
        }

        if let Some(above) = previous {
            if tier.max_diamonds >= above.min_diamonds {
                return Err(TierTableError::OverlappingRange {
                    tier: name.to_string(),
                    above: above.name.clone(),
                });
            }
            if tier.min_days > above.min_days || tier.min_hours > above.min_hours {
                return Err(TierTableError::StricterThanAbove {
                    tier: name.to_string(),
                    above: above.name.clone(),
                });
            }
        }

        previous = Some(tier);
    }

    Ok(())
}

/// Reasons a tier table is rejected.
#[derive(Debug, thiserror::Error)]
pub enum TierTableError {
    #[error("tier name must not be empty")]
    EmptyName,
    #[error("tier `{0}` is defined more than once")]
    DuplicateName(String),
    #[error("tier `{0}` has a negative or non-finite hour requirement")]
    InvalidHours(String),
    #[error("tier `{0}` has min_diamonds greater than max_diamonds")]
    InvertedDiamondRange(String),
    #[error("tier `{0}` has min_payout greater than max_payout")]
    InvertedPayoutRange(String),
    #[error("tier `{tier}` diamond range must sit strictly below tier `{above}`")]
    OverlappingRange { tier: String, above: String },
    #[error("tier `{tier}` requires more activity than the higher tier `{above}`")]
    StricterThanAbove { tier: String, above: String },
    #[error("unable to read tier table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tier table row: {0}")]
    Csv(#[from] csv::Error),
}
