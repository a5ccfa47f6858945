//! Traffic-light health alerts for customer projects.

pub mod domain;
pub mod health;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Assembly, AssemblyStatus, Feedback, Production, ProductionStatus, Project, ProjectId,
    ProjectSnapshot, ProjectStatus, QualityRating,
};
pub use health::{
    classify_portfolio, AlertLevel, HealthAssessment, HealthClassifier, HealthThresholds,
    LevelCounts, PortfolioAlerts, ProjectAlert, ON_TRACK_REASON,
};
pub use repository::ProjectRepository;
pub use router::project_alert_router;
pub use service::ProjectAlertService;
