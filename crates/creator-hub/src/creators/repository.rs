use super::domain::{CreatorHandle, CreatorRecord, ManagerId};
use crate::repository::RepositoryError;

/// Read access to creator rows so services can be exercised without the backend.
pub trait CreatorRepository: Send + Sync {
    /// Looks up an active creator by handle.
    fn fetch_by_handle(
        &self,
        handle: &CreatorHandle,
    ) -> Result<Option<CreatorRecord>, RepositoryError>;

    /// All creators whose `assigned_manager_id` matches.
    fn assigned_to(&self, manager_id: &ManagerId) -> Result<Vec<CreatorRecord>, RepositoryError>;
}
