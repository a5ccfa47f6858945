use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::budgets::domain::{Budget, BudgetId, BudgetStatus, ScoreWriteBack};
use crate::workflows::budgets::{
    BudgetRepository, ClosureScoreService, ClosureScorer, ConversionHistory,
};
use crate::workflows::projects::{Project, ProjectId, ProjectRepository, ProjectSnapshot, ProjectStatus};
use crate::workflows::{OwnerId, RepositoryError};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn today() -> NaiveDate {
    now().date_naive()
}

pub(super) fn days_ago(days: i64) -> NaiveDate {
    today() - Duration::days(days)
}

pub(super) fn owner() -> OwnerId {
    OwnerId("owner-1".to_string())
}

pub(super) fn historical(id: &str, origin: &str, status: ProjectStatus, value: f64) -> Project {
    Project {
        id: ProjectId(id.to_string()),
        user_id: owner(),
        client_name: format!("Histórico {id}"),
        environment: Some("Cozinha".to_string()),
        lead_origin: Some(origin.to_string()),
        status,
        first_contact: Some(days_ago(200)),
        promised_delivery: None,
        sale_date: Some(days_ago(180)),
        sale_value: if status.is_converted() { Some(value) } else { None },
    }
}

/// Instagram converts 3 of 5 quotes (60%) at an average ticket of 10 000.
pub(super) fn instagram_history() -> Vec<Project> {
    vec![
        historical("h1", "instagram", ProjectStatus::Vendido, 10_000.0),
        historical("h2", "instagram", ProjectStatus::Entregue, 8_000.0),
        historical("h3", "instagram", ProjectStatus::Entregue, 12_000.0),
        historical("h4", "instagram", ProjectStatus::Orcamento, 0.0),
        historical("h5", "instagram", ProjectStatus::Cancelado, 0.0),
    ]
}

pub(super) fn history() -> ConversionHistory {
    ConversionHistory::from_projects(&instagram_history())
}

pub(super) fn budget(id: &str, value: f64, quoted_days_ago: i64, status: BudgetStatus) -> Budget {
    Budget {
        id: BudgetId(id.to_string()),
        user_id: owner(),
        client_name: format!("Cliente {id}"),
        total_value: value,
        lead_origin: Some("instagram".to_string()),
        environment: Some("Cozinha".to_string()),
        quote_date: days_ago(quoted_days_ago),
        status,
        viewed_by_client: false,
        form_filled: false,
        closure_score: None,
        suggestions: Vec::new(),
        scored_at: None,
    }
}

pub(super) fn scorer() -> ClosureScorer {
    ClosureScorer::default()
}

#[derive(Default, Clone)]
pub(super) struct MemoryHistory {
    projects: Arc<Mutex<Vec<Project>>>,
}

impl MemoryHistory {
    pub(super) fn with(projects: Vec<Project>) -> Self {
        Self {
            projects: Arc::new(Mutex::new(projects)),
        }
    }
}

impl ProjectRepository for MemoryHistory {
    fn snapshot(&self, id: &ProjectId) -> Result<Option<ProjectSnapshot>, RepositoryError> {
        let guard = self.projects.lock().expect("history mutex poisoned");
        Ok(guard
            .iter()
            .find(|project| &project.id == id)
            .cloned()
            .map(ProjectSnapshot::bare))
    }

    fn snapshots_for_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<ProjectSnapshot>, RepositoryError> {
        Ok(self
            .history(owner)?
            .into_iter()
            .map(ProjectSnapshot::bare)
            .collect())
    }

    fn history(&self, owner: &OwnerId) -> Result<Vec<Project>, RepositoryError> {
        let guard = self.projects.lock().expect("history mutex poisoned");
        Ok(guard
            .iter()
            .filter(|project| &project.user_id == owner)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryBudgets {
    pub(super) budgets: Arc<Mutex<Vec<Budget>>>,
    failing: Arc<HashSet<BudgetId>>,
}

impl MemoryBudgets {
    pub(super) fn with(budgets: Vec<Budget>) -> Self {
        Self {
            budgets: Arc::new(Mutex::new(budgets)),
            failing: Arc::new(HashSet::new()),
        }
    }

    /// Write-backs for the listed ids fail as if the store rejected them.
    pub(super) fn failing_on(budgets: Vec<Budget>, failing: &[&str]) -> Self {
        Self {
            budgets: Arc::new(Mutex::new(budgets)),
            failing: Arc::new(
                failing
                    .iter()
                    .map(|id| BudgetId(id.to_string()))
                    .collect(),
            ),
        }
    }

    pub(super) fn stored(&self, id: &str) -> Budget {
        self.budgets
            .lock()
            .expect("budget mutex poisoned")
            .iter()
            .find(|budget| budget.id.0 == id)
            .cloned()
            .expect("budget stored")
    }
}

impl BudgetRepository for MemoryBudgets {
    fn open_budgets(
        &self,
        owner: &OwnerId,
        only: Option<&BudgetId>,
    ) -> Result<Vec<Budget>, RepositoryError> {
        let guard = self.budgets.lock().expect("budget mutex poisoned");
        Ok(guard
            .iter()
            .filter(|budget| &budget.user_id == owner && budget.status.is_open())
            .filter(|budget| only.map_or(true, |id| &budget.id == id))
            .cloned()
            .collect())
    }

    fn record_score(
        &self,
        id: &BudgetId,
        write_back: &ScoreWriteBack,
    ) -> Result<(), RepositoryError> {
        if self.failing.contains(id) {
            return Err(RepositoryError::Unavailable("write rejected".to_string()));
        }
        let mut guard = self.budgets.lock().expect("budget mutex poisoned");
        let budget = guard
            .iter_mut()
            .find(|budget| &budget.id == id)
            .ok_or(RepositoryError::NotFound)?;
        budget.apply_score(write_back);
        Ok(())
    }
}

pub(super) struct OfflineBudgets;

impl BudgetRepository for OfflineBudgets {
    fn open_budgets(
        &self,
        _owner: &OwnerId,
        _only: Option<&BudgetId>,
    ) -> Result<Vec<Budget>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn record_score(
        &self,
        _id: &BudgetId,
        _write_back: &ScoreWriteBack,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service(
    budgets: Vec<Budget>,
) -> (
    ClosureScoreService<MemoryHistory, MemoryBudgets>,
    MemoryBudgets,
) {
    let store = MemoryBudgets::with(budgets);
    let service = ClosureScoreService::new(
        Arc::new(MemoryHistory::with(instagram_history())),
        Arc::new(store.clone()),
        scorer(),
    );
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
