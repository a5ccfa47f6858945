use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{BudgetId, ScoreWriteBack};
use super::history::ConversionHistory;
use super::repository::BudgetRepository;
use super::scoring::{ClosureScorer, ScoreFactor};
use crate::workflows::projects::ProjectRepository;
use crate::workflows::{OwnerId, RepositoryError};

/// Body accepted by the scoring function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub orcamento_id: Option<String>,
}

impl ScoreRequest {
    pub fn for_owner(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            orcamento_id: None,
        }
    }

    fn owner(&self) -> Result<OwnerId, ScoringError> {
        match self.user_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(OwnerId(id.to_string())),
            _ => Err(ScoringError::MissingOwner),
        }
    }

    fn budget_filter(&self) -> Option<BudgetId> {
        self.orcamento_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| BudgetId(id.to_string()))
    }
}

/// Persistence outcome of a single budget in a scoring batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum WriteBackStatus {
    #[serde(rename = "gravado")]
    Saved,
    #[serde(rename = "falhou")]
    Failed {
        #[serde(rename = "erro")]
        error: String,
    },
}

impl WriteBackStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Per-budget entry of `resultados`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetScoreResult {
    #[serde(rename = "orcamento_id")]
    pub budget_id: BudgetId,
    #[serde(rename = "cliente_nome")]
    pub client_name: String,
    pub score: u8,
    #[serde(rename = "fatores")]
    pub factors: Vec<ScoreFactor>,
    #[serde(rename = "sugestoes")]
    pub suggestions: Vec<String>,
    #[serde(rename = "gravacao")]
    pub write_back: WriteBackStatus,
}

/// Scores of every open budget plus the history they were computed against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringReport {
    #[serde(rename = "resultados")]
    pub results: Vec<BudgetScoreResult>,
    #[serde(rename = "historico_usado")]
    pub history: ConversionHistory,
    #[serde(skip)]
    pub computed_at: DateTime<Utc>,
}

impl ScoringReport {
    pub fn failed(&self) -> impl Iterator<Item = &BudgetScoreResult> {
        self.results
            .iter()
            .filter(|result| !result.write_back.is_saved())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoringRun {
    /// The owner has no draft or sent budgets matching the request.
    NoOpenBudgets,
    Scored(ScoringReport),
}

/// Service composing the project history, budget store, and closure scorer.
pub struct ClosureScoreService<P, B> {
    projects: Arc<P>,
    budgets: Arc<B>,
    scorer: ClosureScorer,
}

impl<P, B> ClosureScoreService<P, B>
where
    P: ProjectRepository + 'static,
    B: BudgetRepository + 'static,
{
    pub fn new(projects: Arc<P>, budgets: Arc<B>, scorer: ClosureScorer) -> Self {
        Self {
            projects,
            budgets,
            scorer,
        }
    }

    /// Score the owner's open budgets and write each result back.
    ///
    /// Read failures abort the run. Write-back failures are reported on the
    /// affected result while the remaining budgets are still processed.
    /// Recency uses the calendar date of `now` in its own timezone; the
    /// stored timestamp is always UTC.
    pub fn score_open_budgets<Tz: TimeZone>(
        &self,
        request: &ScoreRequest,
        now: DateTime<Tz>,
    ) -> Result<ScoringRun, ScoringError> {
        let owner = request.owner()?;
        let only = request.budget_filter();

        let budgets = self.budgets.open_budgets(&owner, only.as_ref())?;
        if budgets.is_empty() {
            info!(owner = owner.as_str(), "no open budgets to score");
            return Ok(ScoringRun::NoOpenBudgets);
        }

        let history = self.projects.conversion_history(&owner)?;
        let today = now.date_naive();
        let now = now.with_timezone(&Utc);

        let mut results = Vec::with_capacity(budgets.len());
        for budget in &budgets {
            let outcome = self.scorer.score(budget, &history, today);
            let write_back = ScoreWriteBack {
                score: outcome.score,
                suggestions: outcome.suggestions.clone(),
                computed_at: now,
            };

            let status = match self.budgets.record_score(&budget.id, &write_back) {
                Ok(()) => WriteBackStatus::Saved,
                Err(err) => {
                    warn!(budget = %budget.id.0, error = %err, "score write-back failed");
                    WriteBackStatus::Failed {
                        error: err.to_string(),
                    }
                }
            };

            results.push(BudgetScoreResult {
                budget_id: budget.id.clone(),
                client_name: budget.client_name.clone(),
                score: outcome.score,
                factors: outcome.factors,
                suggestions: outcome.suggestions,
                write_back: status,
            });
        }

        let report = ScoringReport {
            results,
            history,
            computed_at: now,
        };
        info!(
            owner = owner.as_str(),
            scored = report.results.len(),
            failed = report.failed().count(),
            "closure scores computed"
        );
        Ok(ScoringRun::Scored(report))
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("user_id é obrigatório")]
    MissingOwner,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
