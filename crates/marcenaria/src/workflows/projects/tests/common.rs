use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::workflows::projects::domain::{
    Assembly, AssemblyStatus, Feedback, Production, ProductionStatus, Project, ProjectId,
    ProjectSnapshot, ProjectStatus, QualityRating,
};
use crate::workflows::projects::{HealthClassifier, ProjectAlertService, ProjectRepository};
use crate::workflows::{OwnerId, RepositoryError};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

pub(super) fn days_ago(days: i64) -> NaiveDate {
    today() - Duration::days(days)
}

pub(super) fn days_ahead(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

pub(super) fn owner() -> OwnerId {
    OwnerId("owner-1".to_string())
}

/// Sold project with a comfortable delivery window and no linked rows.
pub(super) fn project(id: &str) -> Project {
    Project {
        id: ProjectId(id.to_string()),
        user_id: owner(),
        client_name: format!("Cliente {id}"),
        environment: Some("Cozinha".to_string()),
        lead_origin: Some("instagram".to_string()),
        status: ProjectStatus::Vendido,
        first_contact: Some(days_ago(40)),
        promised_delivery: Some(days_ahead(60)),
        sale_date: Some(days_ago(10)),
        sale_value: Some(15_000.0),
    }
}

pub(super) fn snapshot(project: Project) -> ProjectSnapshot {
    ProjectSnapshot::bare(project)
}

pub(super) fn production(project_id: &str, status: ProductionStatus, rate: f64) -> Production {
    Production {
        project_id: ProjectId(project_id.to_string()),
        status,
        rejection_rate: Some(rate),
        expected_finish: Some(days_ahead(20)),
    }
}

pub(super) fn assembly(project_id: &str, challenges: &str) -> Assembly {
    Assembly {
        project_id: ProjectId(project_id.to_string()),
        status: AssemblyStatus::Agendada,
        challenges: Some(challenges.to_string()),
        assembly_date: Some(days_ahead(30)),
    }
}

pub(super) fn feedback(
    project_id: &str,
    would_recommend: Option<bool>,
    assembly_rating: QualityRating,
    fabrication_rating: QualityRating,
) -> Feedback {
    Feedback {
        project_id: ProjectId(project_id.to_string()),
        would_recommend,
        assembly_rating: Some(assembly_rating),
        fabrication_rating: Some(fabrication_rating),
    }
}

pub(super) fn classifier() -> HealthClassifier {
    HealthClassifier::default()
}

#[derive(Default, Clone)]
pub(super) struct MemoryProjects {
    pub(super) snapshots: Arc<Mutex<HashMap<ProjectId, ProjectSnapshot>>>,
}

impl MemoryProjects {
    pub(super) fn with(snapshots: Vec<ProjectSnapshot>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.snapshots.lock().expect("repository mutex poisoned");
            for snapshot in snapshots {
                guard.insert(snapshot.project.id.clone(), snapshot);
            }
        }
        repository
    }
}

impl ProjectRepository for MemoryProjects {
    fn snapshot(&self, id: &ProjectId) -> Result<Option<ProjectSnapshot>, RepositoryError> {
        let guard = self.snapshots.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn snapshots_for_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<ProjectSnapshot>, RepositoryError> {
        let guard = self.snapshots.lock().expect("repository mutex poisoned");
        let mut snapshots: Vec<ProjectSnapshot> = guard
            .values()
            .filter(|snapshot| &snapshot.project.user_id == owner)
            .cloned()
            .collect();
        snapshots.sort_by(|a, b| a.project.id.cmp(&b.project.id));
        Ok(snapshots)
    }

    fn history(&self, owner: &OwnerId) -> Result<Vec<Project>, RepositoryError> {
        Ok(self
            .snapshots_for_owner(owner)?
            .into_iter()
            .map(|snapshot| snapshot.project)
            .collect())
    }
}

pub(super) struct OfflineProjects;

impl ProjectRepository for OfflineProjects {
    fn snapshot(&self, _id: &ProjectId) -> Result<Option<ProjectSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn snapshots_for_owner(
        &self,
        _owner: &OwnerId,
    ) -> Result<Vec<ProjectSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history(&self, _owner: &OwnerId) -> Result<Vec<Project>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn service_with(
    snapshots: Vec<ProjectSnapshot>,
) -> ProjectAlertService<MemoryProjects> {
    ProjectAlertService::new(Arc::new(MemoryProjects::with(snapshots)), classifier())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
