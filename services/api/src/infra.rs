use marcenaria::error::AppError;
use marcenaria::snapshot::StoreSnapshot;
use marcenaria::workflows::budgets::{Budget, BudgetId, BudgetRepository, ScoreWriteBack};
use marcenaria::workflows::projects::{
    Project, ProjectId, ProjectRepository, ProjectSnapshot,
};
use marcenaria::workflows::{OwnerId, RepositoryError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the hosted database, seeded from a JSON snapshot.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStore {
    tables: Arc<Mutex<StoreSnapshot>>,
}

impl InMemoryStore {
    pub(crate) fn new(snapshot: StoreSnapshot) -> Self {
        Self {
            tables: Arc::new(Mutex::new(snapshot)),
        }
    }

    pub(crate) fn from_seed(path: &Path) -> Result<Self, marcenaria::snapshot::SnapshotError> {
        let snapshot = StoreSnapshot::from_path(path)?;
        info!(
            path = %path.display(),
            projects = snapshot.projects.len(),
            budgets = snapshot.budgets.len(),
            "seed snapshot loaded"
        );
        Ok(Self::new(snapshot))
    }

    /// Write the current tables back over the snapshot file.
    pub(crate) fn persist(&self, path: &Path) -> Result<(), AppError> {
        self.tables()?.write_to_path(path)?;
        info!(path = %path.display(), "seed snapshot saved");
        Ok(())
    }

    fn tables(&self) -> Result<MutexGuard<'_, StoreSnapshot>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }

    #[cfg(test)]
    pub(crate) fn budget(&self, id: &str) -> Option<Budget> {
        self.tables()
            .ok()?
            .budgets
            .iter()
            .find(|budget| budget.id.0 == id)
            .cloned()
    }
}

impl ProjectRepository for InMemoryStore {
    fn snapshot(&self, id: &ProjectId) -> Result<Option<ProjectSnapshot>, RepositoryError> {
        Ok(self.tables()?.project_snapshot(id))
    }

    fn snapshots_for_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<ProjectSnapshot>, RepositoryError> {
        Ok(self.tables()?.snapshots_for_owner(owner))
    }

    fn history(&self, owner: &OwnerId) -> Result<Vec<Project>, RepositoryError> {
        Ok(self.tables()?.projects_for_owner(owner))
    }
}

impl BudgetRepository for InMemoryStore {
    fn open_budgets(
        &self,
        owner: &OwnerId,
        only: Option<&BudgetId>,
    ) -> Result<Vec<Budget>, RepositoryError> {
        Ok(self.tables()?.open_budgets(owner, only))
    }

    fn record_score(
        &self,
        id: &BudgetId,
        write_back: &ScoreWriteBack,
    ) -> Result<(), RepositoryError> {
        self.tables()?.apply_score(id, write_back)
    }
}
