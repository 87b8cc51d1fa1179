use crate::cli::ServeArgs;
use crate::infra::{build_engine, AppState, InMemoryOrganizationWeights};
use crate::routes::with_service_routes;
use ai_assessment::config::AppConfig;
use ai_assessment::error::AppError;
use ai_assessment::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let weights = Arc::new(InMemoryOrganizationWeights::default());
    let engine = Arc::new(build_engine(&config.scoring, weights.clone())?);

    let app = with_service_routes(engine, weights)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        narrative_timeout_ms = config.scoring.narrative_timeout.as_millis() as u64,
        "assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
