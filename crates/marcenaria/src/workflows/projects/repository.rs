use super::domain::{Project, ProjectId, ProjectSnapshot};
use crate::workflows::budgets::ConversionHistory;
use crate::workflows::{OwnerId, RepositoryError};

/// Read access to `projetos` and the rows linked to each project.
pub trait ProjectRepository: Send + Sync {
    fn snapshot(&self, id: &ProjectId) -> Result<Option<ProjectSnapshot>, RepositoryError>;
    fn snapshots_for_owner(&self, owner: &OwnerId)
        -> Result<Vec<ProjectSnapshot>, RepositoryError>;
    fn history(&self, owner: &OwnerId) -> Result<Vec<Project>, RepositoryError>;

    /// Conversion aggregates for an owner. Stores able to group server-side
    /// should override this instead of returning every row through `history`.
    fn conversion_history(&self, owner: &OwnerId) -> Result<ConversionHistory, RepositoryError> {
        let projects = self.history(owner)?;
        Ok(ConversionHistory::from_projects(&projects))
    }
}
