mod portfolio;
mod rules;

pub use portfolio::{classify_portfolio, LevelCounts, PortfolioAlerts};

use super::domain::{ProjectId, ProjectSnapshot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const ON_TRACK_REASON: &str = "Tudo dentro do esperado";

/// Traffic-light health of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    #[serde(rename = "verde")]
    Green,
    #[serde(rename = "amarelo")]
    Yellow,
    #[serde(rename = "vermelho")]
    Red,
}

impl AlertLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "Verde",
            Self::Yellow => "Amarelo",
            Self::Red => "Vermelho",
        }
    }

    /// Sort key placing the most urgent level first.
    pub const fn urgency_rank(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Yellow => 1,
            Self::Green => 2,
        }
    }
}

/// Cut-off values applied by the classification rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthThresholds {
    /// Rejection percentage strictly above which a project turns red.
    pub critical_rejection_rate: f64,
    /// Rejection percentage strictly above which a project turns yellow.
    pub warning_rejection_rate: f64,
    /// Share of the planned delivery window (in percent) that triggers a warning.
    pub timeline_warning_pct: f64,
    /// Days a quote may wait after first contact before it needs a follow-up.
    pub quote_follow_up_days: i64,
    /// Lower-cased marker searched in the assembly challenges text.
    pub critical_challenge_marker: String,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            critical_rejection_rate: 15.0,
            warning_rejection_rate: 5.0,
            timeline_warning_pct: 70.0,
            quote_follow_up_days: 3,
            critical_challenge_marker: "critico".to_string(),
        }
    }
}

/// Stateless classifier assigning a traffic-light level to project snapshots.
#[derive(Debug, Clone, Default)]
pub struct HealthClassifier {
    thresholds: HealthThresholds,
}

impl HealthClassifier {
    pub fn new(thresholds: HealthThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &HealthThresholds {
        &self.thresholds
    }

    /// Red rules run first; yellow rules are only consulted when none of them fired.
    pub fn classify(&self, snapshot: &ProjectSnapshot, today: NaiveDate) -> HealthAssessment {
        let red = rules::red_reasons(snapshot, today, &self.thresholds);
        if !red.is_empty() {
            return HealthAssessment {
                level: AlertLevel::Red,
                reasons: red,
            };
        }

        let yellow = rules::yellow_reasons(snapshot, today, &self.thresholds);
        if !yellow.is_empty() {
            return HealthAssessment {
                level: AlertLevel::Yellow,
                reasons: yellow,
            };
        }

        HealthAssessment {
            level: AlertLevel::Green,
            reasons: vec![ON_TRACK_REASON.to_string()],
        }
    }

    pub fn alert(&self, snapshot: &ProjectSnapshot, today: NaiveDate) -> ProjectAlert {
        let assessment = self.classify(snapshot, today);
        ProjectAlert {
            project_id: snapshot.project.id.clone(),
            client_name: snapshot.project.client_name.clone(),
            environment: snapshot.project.environment.clone(),
            level: assessment.level,
            reasons: assessment.reasons,
        }
    }
}

/// Level plus the ordered, never empty, list of reasons behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthAssessment {
    #[serde(rename = "nivel")]
    pub level: AlertLevel,
    #[serde(rename = "motivos")]
    pub reasons: Vec<String>,
}

/// Assessment tagged with the project it belongs to, as shown on dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAlert {
    #[serde(rename = "projeto_id")]
    pub project_id: ProjectId,
    #[serde(rename = "cliente_nome")]
    pub client_name: String,
    #[serde(rename = "ambiente", skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(rename = "nivel")]
    pub level: AlertLevel,
    #[serde(rename = "motivos")]
    pub reasons: Vec<String>,
}
