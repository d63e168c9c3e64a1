use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::domain::{CreatorHandle, ManagerId};
use super::repository::CreatorRepository;
use super::roster::ManagerRoster;
use super::stats::{derive_stats_with, CreatorStats, TargetDefaults};
use crate::bonus::{BonusEngine, CreatorMetrics, TierResult, TierTable};
use crate::repository::RepositoryError;

/// Dashboard payload: derived stats plus the tier those stats currently earn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorDashboard {
    pub creator_handle: CreatorHandle,
    pub display_name: String,
    pub stats: CreatorStats,
    pub tier: TierResult,
}

/// Service composing the creator repository, stats aggregator, and bonus engine.
pub struct CreatorInsightsService<C> {
    repository: Arc<C>,
    engine: Arc<BonusEngine>,
    targets: TargetDefaults,
}

impl<C> CreatorInsightsService<C>
where
    C: CreatorRepository + 'static,
{
    pub fn new(repository: Arc<C>, engine: BonusEngine, targets: TargetDefaults) -> Self {
        Self {
            repository,
            engine: Arc::new(engine),
            targets,
        }
    }

    /// Stats and current tier for the given creator.
    pub fn dashboard(&self, handle: &CreatorHandle) -> Result<CreatorDashboard, InsightsError> {
        let record = self
            .repository
            .fetch_by_handle(handle)?
            .filter(|record| record.is_active)
            .ok_or_else(|| InsightsError::CreatorNotFound(handle.clone()))?;

        let stats = derive_stats_with(&record, &self.targets);
        let tier = self.engine.classify(&stats.metrics());

        debug!(
            creator = %handle,
            next_target = %stats.next_target,
            tier = tier.qualified_tier.as_deref().unwrap_or("none"),
            "dashboard derived"
        );

        Ok(CreatorDashboard {
            creator_handle: record.creator_handle.clone(),
            display_name: record.display_name(),
            stats,
            tier,
        })
    }

    /// Portfolio view for a manager.
    pub fn roster(&self, manager_id: &ManagerId) -> Result<ManagerRoster, InsightsError> {
        let creators = self.repository.assigned_to(manager_id)?;
        let roster = ManagerRoster::new(manager_id.clone(), creators);

        info!(
            manager = %manager_id,
            creators = roster.summary.total_creators,
            "manager roster loaded"
        );

        Ok(roster)
    }

    /// Ad-hoc calculator evaluation against the shared tier table.
    pub fn classify(&self, metrics: &CreatorMetrics) -> TierResult {
        self.engine.classify(metrics)
    }

    pub fn tiers(&self) -> &TierTable {
        self.engine.table()
    }
}

/// Error raised by the insights service.
#[derive(Debug, thiserror::Error)]
pub enum InsightsError {
    #[error("no active creator with handle `{0}`")]
    CreatorNotFound(CreatorHandle),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
