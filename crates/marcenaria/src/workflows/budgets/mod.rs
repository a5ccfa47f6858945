//! Closure probability scoring for open budgets (quotes).

pub mod domain;
pub mod history;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Budget, BudgetId, BudgetStatus, ScoreWriteBack};
pub use history::{ConversionHistory, ConversionTally, DEFAULT_DAYS_TO_CLOSE, UNSPECIFIED_CATEGORY};
pub use repository::BudgetRepository;
pub use router::closure_score_router;
pub use scoring::{
    ClosureScore, ClosureScorer, FactorKind, FactorTone, ScoreFactor, ScoreSignals, ScoringConfig,
};
pub use service::{
    BudgetScoreResult, ClosureScoreService, ScoreRequest, ScoringError, ScoringReport, ScoringRun,
    WriteBackStatus,
};
