use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::ProjectId;
use super::repository::ProjectRepository;
use super::service::ProjectAlertService;
use crate::dates::deserialize_optional_date;
use crate::error::AppError;
use crate::workflows::{OwnerId, RepositoryError};

/// Optional reference date; the server's local date is used when absent.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlertQuery {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

impl AlertQuery {
    fn resolve_today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Router exposing single-project and per-owner alert endpoints.
pub fn project_alert_router<R>(service: Arc<ProjectAlertService<R>>) -> Router
where
    R: ProjectRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/projects/:project_id/alert",
            get(project_alert_handler::<R>),
        )
        .route(
            "/api/v1/owners/:user_id/alerts",
            get(portfolio_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn project_alert_handler<R>(
    State(service): State<Arc<ProjectAlertService<R>>>,
    Path(project_id): Path<String>,
    Query(query): Query<AlertQuery>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    let id = ProjectId(project_id);
    match service.alert_for(&id, query.resolve_today()) {
        Ok(alert) => (StatusCode::OK, axum::Json(alert)).into_response(),
        Err(RepositoryError::NotFound) => {
            let payload = json!({
                "error": format!("projeto {} não encontrado", id.0),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            warn!(project = %id.0, error = %other, "project alert lookup failed");
            AppError::from(other).into_response()
        }
    }
}

pub(crate) async fn portfolio_handler<R>(
    State(service): State<Arc<ProjectAlertService<R>>>,
    Path(user_id): Path<String>,
    Query(query): Query<AlertQuery>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    let owner = OwnerId(user_id);
    match service.portfolio(&owner, query.resolve_today()) {
        Ok(portfolio) => (StatusCode::OK, axum::Json(portfolio)).into_response(),
        Err(err) => {
            warn!(owner = owner.as_str(), error = %err, "portfolio alerts failed");
            AppError::from(err).into_response()
        }
    }
}
