//! Creator records, dashboard statistics, and manager rosters.

pub mod domain;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;
pub mod stats;

pub use domain::{
    is_graduated_status, is_rookie_status, CreatorHandle, CreatorId, CreatorRecord,
    GraduationStage, ManagerId,
};
pub use repository::CreatorRepository;
pub use roster::{ManagerRoster, RosterEntry, RosterSummary};
pub use router::creator_router;
pub use service::{CreatorDashboard, CreatorInsightsService, InsightsError};
pub use stats::{derive_stats, derive_stats_with, CreatorStats, ProgressTarget, TargetDefaults};
