use crate::cli::ServeArgs;
use crate::infra::{AppState, Engines};
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use estate_desk::config::AppConfig;
use estate_desk::dashboard::performance::ScorecardEngine;
use estate_desk::dashboard::promotion::PromotionResolver;
use estate_desk::error::AppError;
use estate_desk::telemetry;
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

    let criteria = config.dashboard.performance_criteria()?;
    let catalog = config.dashboard.promotion_catalog()?;
    info!(
        criteria = criteria.len(),
        custom_catalog = config.dashboard.promotion_catalog.is_some(),
        "dashboard tables loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engines = Engines {
        scorecard: Arc::new(ScorecardEngine::new(criteria)),
        promotion: Arc::new(PromotionResolver::new(catalog)),
    };

    let app = with_dashboard_routes(engines)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "estate desk decision service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
