use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use super::domain::ProjectId;
use super::health::{classify_portfolio, HealthClassifier, PortfolioAlerts, ProjectAlert};
use super::repository::ProjectRepository;
use crate::workflows::{OwnerId, RepositoryError};

/// Service pairing the project repository with the health classifier.
pub struct ProjectAlertService<R> {
    repository: Arc<R>,
    classifier: HealthClassifier,
}

impl<R> ProjectAlertService<R>
where
    R: ProjectRepository + 'static,
{
    pub fn new(repository: Arc<R>, classifier: HealthClassifier) -> Self {
        Self {
            repository,
            classifier,
        }
    }

    /// Classify a single project, failing with `NotFound` when it does not exist.
    pub fn alert_for(
        &self,
        project_id: &ProjectId,
        today: NaiveDate,
    ) -> Result<ProjectAlert, RepositoryError> {
        let snapshot = self
            .repository
            .snapshot(project_id)?
            .ok_or(RepositoryError::NotFound)?;
        let alert = self.classifier.alert(&snapshot, today);
        debug!(project = %project_id.0, level = alert.level.label(), "project classified");
        Ok(alert)
    }

    pub fn portfolio(
        &self,
        owner: &OwnerId,
        today: NaiveDate,
    ) -> Result<PortfolioAlerts, RepositoryError> {
        let snapshots = self.repository.snapshots_for_owner(owner)?;
        let portfolio = classify_portfolio(&self.classifier, &snapshots, today);
        debug!(
            owner = owner.as_str(),
            red = portfolio.counts.red,
            yellow = portfolio.counts.yellow,
            green = portfolio.counts.green,
            "portfolio classified"
        );
        Ok(portfolio)
    }
}
