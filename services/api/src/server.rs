use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryStore};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use marcenaria::config::AppConfig;
use marcenaria::error::AppError;
use marcenaria::telemetry;
use marcenaria::workflows::budgets::{ClosureScoreService, ClosureScorer};
use marcenaria::workflows::projects::{HealthClassifier, ProjectAlertService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(seed) = args.seed.take() {
        config.store.seed_path = Some(seed);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = match config.store.seed_path.as_deref() {
        Some(path) => InMemoryStore::from_seed(path)?,
        None => {
            warn!("no seed snapshot configured; starting with an empty store");
            InMemoryStore::default()
        }
    };
    let store = Arc::new(store);

    let alert_service = Arc::new(ProjectAlertService::new(
        store.clone(),
        HealthClassifier::default(),
    ));
    let score_service = Arc::new(ClosureScoreService::new(
        store.clone(),
        store,
        ClosureScorer::default(),
    ));

    let app = with_application_routes(alert_service, score_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "marcenaria insights api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
