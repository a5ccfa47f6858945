use super::super::domain::ProjectSnapshot;
use super::{AlertLevel, HealthClassifier, ProjectAlert};
use chrono::NaiveDate;
use serde::Serialize;

/// Number of projects at each level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    #[serde(rename = "vermelho")]
    pub red: usize,
    #[serde(rename = "amarelo")]
    pub yellow: usize,
    #[serde(rename = "verde")]
    pub green: usize,
}

impl LevelCounts {
    fn record(&mut self, level: AlertLevel) {
        match level {
            AlertLevel::Red => self.red += 1,
            AlertLevel::Yellow => self.yellow += 1,
            AlertLevel::Green => self.green += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.red + self.yellow + self.green
    }
}

/// Alerts for every project of an owner, most urgent first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioAlerts {
    #[serde(rename = "data_referencia")]
    pub today: NaiveDate,
    #[serde(rename = "contagem")]
    pub counts: LevelCounts,
    #[serde(rename = "alertas")]
    pub alerts: Vec<ProjectAlert>,
}

impl PortfolioAlerts {
    pub fn needing_attention(&self) -> impl Iterator<Item = &ProjectAlert> {
        self.alerts
            .iter()
            .filter(|alert| alert.level != AlertLevel::Green)
    }
}

pub fn classify_portfolio(
    classifier: &HealthClassifier,
    snapshots: &[ProjectSnapshot],
    today: NaiveDate,
) -> PortfolioAlerts {
    let mut counts = LevelCounts::default();
    let mut alerts: Vec<ProjectAlert> = snapshots
        .iter()
        .map(|snapshot| {
            let alert = classifier.alert(snapshot, today);
            counts.record(alert.level);
            alert
        })
        .collect();

    // stable: keeps store order within a level
    alerts.sort_by_key(|alert| alert.level.urgency_rank());

    PortfolioAlerts {
        today,
        counts,
        alerts,
    }
}
