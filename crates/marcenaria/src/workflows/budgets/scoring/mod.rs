mod rules;
mod suggestions;

pub use suggestions::{
    CALL_CLIENT_SUGGESTION, CHECK_OBJECTIONS_SUGGESTION, PRIORITIZE_SUGGESTION,
};

use super::domain::Budget;
use super::history::ConversionHistory;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weights and bands used by the closure scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base_score: i32,
    /// Points awarded for an origin that converts every quote.
    pub origin_weight: f64,
    /// Value/ticket ratio band considered aligned with past sales.
    pub ticket_band: (f64, f64),
    pub high_probability: u8,
    pub low_probability: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 50,
            origin_weight: 15.0,
            ticket_band: (0.8, 1.5),
            high_probability: 70,
            low_probability: 40,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Origin,
    Ticket,
    Recency,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorTone {
    Positive,
    Caution,
}

/// Explanatory note attached to a score adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactor {
    #[serde(rename = "tipo")]
    pub kind: FactorKind,
    #[serde(rename = "tom")]
    pub tone: FactorTone,
    #[serde(rename = "pontos")]
    pub points: i32,
    #[serde(rename = "descricao")]
    pub note: String,
}

/// Intermediate measurements shared by scoring and suggestion generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSignals {
    pub origin_rate: f64,
    /// `None` when there is no historical ticket to compare against.
    pub ticket_ratio: Option<f64>,
    pub days_since_quote: i64,
}

/// Outcome for one budget: clamped score, factor trail, and suggestions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosureScore {
    pub score: u8,
    #[serde(rename = "fatores")]
    pub factors: Vec<ScoreFactor>,
    #[serde(rename = "sugestoes")]
    pub suggestions: Vec<String>,
    #[serde(skip)]
    pub signals: ScoreSignals,
}

/// Stateless scorer; the same budget, history, and date always give the same result.
#[derive(Debug, Clone, Default)]
pub struct ClosureScorer {
    config: ScoringConfig,
}

impl ClosureScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(
        &self,
        budget: &Budget,
        history: &ConversionHistory,
        today: NaiveDate,
    ) -> ClosureScore {
        let signals = ScoreSignals {
            origin_rate: history.origin_rate(budget.lead_origin.as_deref()),
            ticket_ratio: history
                .average_ticket
                .filter(|ticket| *ticket > 0.0)
                .map(|ticket| budget.total_value / ticket),
            days_since_quote: (today - budget.quote_date).num_days(),
        };

        let (raw_score, factors) = rules::score_budget(budget, &signals, &self.config);
        let score = raw_score.clamp(0, 100) as u8;
        let suggestions = suggestions::suggest(&signals, score, &self.config);

        ClosureScore {
            score,
            factors,
            suggestions,
            signals,
        }
    }
}
