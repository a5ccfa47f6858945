use super::domain::{Budget, BudgetId, ScoreWriteBack};
use crate::workflows::{OwnerId, RepositoryError};

/// Access to `orcamentos` for the closure scorer.
pub trait BudgetRepository: Send + Sync {
    /// Open budgets (draft or sent) of an owner, optionally narrowed to one id.
    fn open_budgets(
        &self,
        owner: &OwnerId,
        only: Option<&BudgetId>,
    ) -> Result<Vec<Budget>, RepositoryError>;

    /// Overwrite the score, suggestions, and timestamp stored on a budget.
    fn record_score(&self, id: &BudgetId, write_back: &ScoreWriteBack)
        -> Result<(), RepositoryError>;
}
