//! JSON snapshot of the store tables read by the alert and scoring services.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::workflows::budgets::{Budget, BudgetId, ScoreWriteBack};
use crate::workflows::projects::{
    Assembly, Feedback, Production, Project, ProjectId, ProjectSnapshot,
};
use crate::workflows::{OwnerId, RepositoryError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(rename = "projetos", default)]
    pub projects: Vec<Project>,
    #[serde(rename = "producoes", default)]
    pub productions: Vec<Production>,
    #[serde(rename = "montagens", default)]
    pub assemblies: Vec<Assembly>,
    #[serde(rename = "feedbacks", default)]
    pub feedbacks: Vec<Feedback>,
    #[serde(rename = "orcamentos", default)]
    pub budgets: Vec<Budget>,
}

impl StoreSnapshot {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SnapshotError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Overwrite the file at `path` with the current tables.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let write_error = |source| SnapshotError::Write {
            path: path.display().to_string(),
            source,
        };
        let mut writer = BufWriter::new(File::create(path).map_err(write_error)?);
        self.to_writer(&mut writer)?;
        writer.flush().map_err(write_error)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), SnapshotError> {
        serde_json::to_writer_pretty(writer, self).map_err(SnapshotError::Encode)
    }

    /// Join a project with the first production, assembly, and feedback rows that reference it.
    pub fn join(&self, project: &Project) -> ProjectSnapshot {
        let id = &project.id;
        ProjectSnapshot {
            project: project.clone(),
            production: self
                .productions
                .iter()
                .find(|row| &row.project_id == id)
                .cloned(),
            assembly: self
                .assemblies
                .iter()
                .find(|row| &row.project_id == id)
                .cloned(),
            feedback: self
                .feedbacks
                .iter()
                .find(|row| &row.project_id == id)
                .cloned(),
        }
    }

    pub fn project_snapshot(&self, id: &ProjectId) -> Option<ProjectSnapshot> {
        self.projects
            .iter()
            .find(|project| &project.id == id)
            .map(|project| self.join(project))
    }

    pub fn snapshots_for_owner(&self, owner: &OwnerId) -> Vec<ProjectSnapshot> {
        self.projects
            .iter()
            .filter(|project| &project.user_id == owner)
            .map(|project| self.join(project))
            .collect()
    }

    pub fn projects_for_owner(&self, owner: &OwnerId) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|project| &project.user_id == owner)
            .cloned()
            .collect()
    }

    /// Open budgets ordered by quote date, oldest first.
    pub fn open_budgets(&self, owner: &OwnerId, only: Option<&BudgetId>) -> Vec<Budget> {
        let mut budgets: Vec<Budget> = self
            .budgets
            .iter()
            .filter(|budget| &budget.user_id == owner && budget.status.is_open())
            .filter(|budget| only.map_or(true, |id| &budget.id == id))
            .cloned()
            .collect();
        budgets.sort_by_key(|budget| budget.quote_date);
        budgets
    }

    pub fn apply_score(
        &mut self,
        id: &BudgetId,
        write_back: &ScoreWriteBack,
    ) -> Result<(), RepositoryError> {
        let budget = self
            .budgets
            .iter_mut()
            .find(|budget| &budget.id == id)
            .ok_or(RepositoryError::NotFound)?;
        budget.apply_score(write_back);
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("unable to open snapshot {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unable to write snapshot {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}
