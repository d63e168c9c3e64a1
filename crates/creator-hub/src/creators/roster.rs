use serde::{Deserialize, Serialize};

use super::domain::{
    is_graduated_status, is_rookie_status, CreatorHandle, CreatorRecord, GraduationStage,
    ManagerId,
};

/// Headline counts for a manager's portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RosterSummary {
    pub total_creators: usize,
    pub total_rookies: usize,
    pub total_graduated: usize,
    /// Sum of monthly diamonds across the roster.
    pub collective_diamonds: u64,
}

impl RosterSummary {
    pub fn from_creators(creators: &[CreatorRecord]) -> Self {
        creators
            .iter()
            .fold(Self::default(), |mut summary, creator| {
                summary.total_creators += 1;
                let status = creator.graduation_status.as_deref();
                // A status can count toward both totals.
                if is_rookie_status(status) {
                    summary.total_rookies += 1;
                }
                if is_graduated_status(status) {
                    summary.total_graduated += 1;
                }
                summary.collective_diamonds += monthly_diamonds(creator);
                summary
            })
    }
}

/// One row of the manager portal list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub creator_handle: CreatorHandle,
    pub display_name: String,
    pub region: Option<String>,
    pub graduation_status: Option<String>,
    pub stage: GraduationStage,
    pub monthly_diamonds: u64,
}

/// Active creators assigned to a manager, best monthly earners first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerRoster {
    pub manager_id: ManagerId,
    pub summary: RosterSummary,
    pub creators: Vec<RosterEntry>,
}

impl ManagerRoster {
    pub fn new(manager_id: ManagerId, creators: Vec<CreatorRecord>) -> Self {
        let mut assigned: Vec<CreatorRecord> = creators
            .into_iter()
            .filter(|creator| {
                creator.is_active && creator.assigned_manager_id.as_ref() == Some(&manager_id)
            })
            .collect();
        assigned.sort_by(|left, right| monthly_diamonds(right).cmp(&monthly_diamonds(left)));

        let summary = RosterSummary::from_creators(&assigned);
        let creators = assigned
            .iter()
            .map(|creator| RosterEntry {
                creator_handle: creator.creator_handle.clone(),
                display_name: creator.display_name(),
                region: creator.region.clone(),
                graduation_status: creator.graduation_status.clone(),
                stage: GraduationStage::classify(creator.graduation_status.as_deref()),
                monthly_diamonds: monthly_diamonds(creator),
            })
            .collect();

        Self {
            manager_id,
            summary,
            creators,
        }
    }
}

fn monthly_diamonds(creator: &CreatorRecord) -> u64 {
    creator
        .diamonds_monthly
        .and_then(|value| u64::try_from(value).ok())
        .unwrap_or(0)
}
