use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use marcenaria::workflows::budgets::{closure_score_router, BudgetRepository, ClosureScoreService};
use marcenaria::workflows::projects::{
    project_alert_router, ProjectAlertService, ProjectRepository,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_application_routes<R>(
    alerts: Arc<ProjectAlertService<R>>,
    scores: Arc<ClosureScoreService<R, R>>,
) -> axum::Router
where
    R: ProjectRepository + BudgetRepository + 'static,
{
    project_alert_router(alerts)
        .merge(closure_score_router(scores))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
