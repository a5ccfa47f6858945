use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workflows::projects::Project;

/// Bucket used when a project has no origin or environment recorded.
pub const UNSPECIFIED_CATEGORY: &str = "nao_informado";

/// Days-to-close assumed when the owner has never converted a project.
pub const DEFAULT_DAYS_TO_CLOSE: f64 = 30.0;

/// Quotes seen versus quotes converted for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTally {
    pub total: u32,
    #[serde(rename = "convertidos")]
    pub converted: u32,
}

impl ConversionTally {
    /// Fraction in [0, 1]; an empty bucket converts at 0.
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.converted) / f64::from(self.total)
        }
    }

    fn record(&mut self, converted: bool) {
        self.total += 1;
        if converted {
            self.converted += 1;
        }
    }
}

/// Conversion aggregates over an owner's full project history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionHistory {
    #[serde(rename = "total_projetos")]
    pub total_projects: u32,
    #[serde(rename = "projetos_convertidos")]
    pub converted_projects: u32,
    #[serde(rename = "por_origem")]
    pub by_origin: BTreeMap<String, ConversionTally>,
    #[serde(rename = "por_ambiente")]
    pub by_environment: BTreeMap<String, ConversionTally>,
    /// Mean sale value among converted projects that recorded one.
    #[serde(rename = "ticket_medio")]
    pub average_ticket: Option<f64>,
    #[serde(rename = "tempo_medio_fechamento_dias")]
    pub average_days_to_close: f64,
}

impl Default for ConversionHistory {
    fn default() -> Self {
        Self {
            total_projects: 0,
            converted_projects: 0,
            by_origin: BTreeMap::new(),
            by_environment: BTreeMap::new(),
            average_ticket: None,
            average_days_to_close: DEFAULT_DAYS_TO_CLOSE,
        }
    }
}

impl ConversionHistory {
    pub fn from_projects(projects: &[Project]) -> Self {
        let mut history = Self::default();
        let mut ticket_sum = 0.0;
        let mut ticket_count = 0u32;
        let mut close_days_sum = 0i64;
        let mut close_count = 0u32;

        for project in projects {
            let converted = project.status.is_converted();
            history.total_projects += 1;

            history
                .by_origin
                .entry(category_key(project.lead_origin.as_deref()))
                .or_default()
                .record(converted);
            history
                .by_environment
                .entry(category_key(project.environment.as_deref()))
                .or_default()
                .record(converted);

            if !converted {
                continue;
            }
            history.converted_projects += 1;

            if let Some(value) = project.sale_value {
                ticket_sum += value;
                ticket_count += 1;
            }
            if let (Some(first_contact), Some(sale)) = (project.first_contact, project.sale_date) {
                close_days_sum += (sale - first_contact).num_days();
                close_count += 1;
            }
        }

        if ticket_count > 0 {
            history.average_ticket = Some(ticket_sum / f64::from(ticket_count));
        }
        if close_count > 0 {
            history.average_days_to_close = close_days_sum as f64 / f64::from(close_count);
        }

        history
    }

    pub fn origin_rate(&self, origin: Option<&str>) -> f64 {
        self.by_origin
            .get(category_key(origin).as_str())
            .map(ConversionTally::rate)
            .unwrap_or(0.0)
    }
}

fn category_key(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => UNSPECIFIED_CATEGORY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::projects::{ProjectId, ProjectStatus};
    use crate::workflows::OwnerId;
    use chrono::NaiveDate;

    fn project(origin: Option<&str>, status: ProjectStatus, value: Option<f64>) -> Project {
        Project {
            id: ProjectId("p".to_string()),
            user_id: OwnerId("owner".to_string()),
            client_name: "Cliente".to_string(),
            environment: Some("Cozinha".to_string()),
            lead_origin: origin.map(str::to_string),
            status,
            first_contact: NaiveDate::from_ymd_opt(2026, 1, 1),
            promised_delivery: None,
            sale_date: NaiveDate::from_ymd_opt(2026, 1, 21),
            sale_value: value,
        }
    }

    #[test]
    fn empty_history_defaults_days_to_close() {
        let history = ConversionHistory::from_projects(&[]);
        assert_eq!(history.total_projects, 0);
        assert!(history.average_ticket.is_none());
        assert_eq!(history.average_days_to_close, DEFAULT_DAYS_TO_CLOSE);
        assert_eq!(history.origin_rate(Some("instagram")), 0.0);
    }

    #[test]
    fn groups_by_origin_and_counts_sold_and_delivered() {
        let history = ConversionHistory::from_projects(&[
            project(Some("instagram"), ProjectStatus::Vendido, Some(10_000.0)),
            project(Some("instagram"), ProjectStatus::Entregue, Some(20_000.0)),
            project(Some("instagram"), ProjectStatus::Orcamento, None),
            project(Some("indicacao"), ProjectStatus::Cancelado, None),
            project(None, ProjectStatus::EmProducao, None),
        ]);

        let instagram = history.by_origin["instagram"];
        assert_eq!(instagram.total, 3);
        assert_eq!(instagram.converted, 2);
        assert!((history.origin_rate(Some("instagram")) - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(history.by_origin[UNSPECIFIED_CATEGORY].total, 1);
        assert_eq!(history.by_environment["Cozinha"].total, 5);
        assert_eq!(history.converted_projects, 2);
        assert_eq!(history.average_ticket, Some(15_000.0));
        assert_eq!(history.average_days_to_close, 20.0);
    }

    #[test]
    fn blank_origin_falls_into_unspecified_bucket() {
        let history = ConversionHistory::from_projects(&[project(
            Some("  "),
            ProjectStatus::Vendido,
            None,
        )]);
        assert_eq!(history.origin_rate(None), 1.0);
        assert!(history.average_ticket.is_none());
    }
}
