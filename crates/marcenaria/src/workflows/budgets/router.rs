use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Local;
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::repository::BudgetRepository;
use super::service::{ClosureScoreService, ScoreRequest, ScoringReport, ScoringRun};
use crate::workflows::projects::ProjectRepository;

pub const NO_OPEN_BUDGETS_MESSAGE: &str = "Nenhum orçamento aberto para calcular";

#[derive(Debug, Serialize)]
struct ScoringResponse<'a> {
    success: bool,
    #[serde(flatten)]
    report: &'a ScoringReport,
}

/// Router exposing the closure scorer as a remotely callable function.
pub fn closure_score_router<P, B>(service: Arc<ClosureScoreService<P, B>>) -> Router
where
    P: ProjectRepository + 'static,
    B: BudgetRepository + 'static,
{
    Router::new()
        .route(
            "/functions/v1/calcular-score-fechamento",
            post(closure_score_handler::<P, B>),
        )
        .with_state(service)
}

pub(crate) async fn closure_score_handler<P, B>(
    State(service): State<Arc<ClosureScoreService<P, B>>>,
    body: Result<axum::Json<ScoreRequest>, JsonRejection>,
) -> Response
where
    P: ProjectRepository + 'static,
    B: BudgetRepository + 'static,
{
    let request = match body {
        Ok(axum::Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "closure scoring request rejected");
            let payload = json!({ "error": rejection.body_text() });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
        }
    };

    // Recency is counted in the shop's local calendar, like the project alerts.
    match service.score_open_budgets(&request, Local::now()) {
        Ok(ScoringRun::Scored(report)) => {
            let body = ScoringResponse {
                success: true,
                report: &report,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Ok(ScoringRun::NoOpenBudgets) => {
            let payload = json!({
                "success": true,
                "message": NO_OPEN_BUDGETS_MESSAGE,
                "resultados": [],
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "closure scoring failed");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
