use crate::cli::ServeArgs;
use crate::infra::{AppState, DashboardState};
use crate::routes::dashboard_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use workforce_dashboard::config::AppConfig;
use workforce_dashboard::error::AppError;
use workforce_dashboard::{telemetry, EmployeeRoster};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(dataset) = args.source.dataset.take() {
        config.dashboard.dataset = Some(dataset);
    }

    telemetry::init(&config.telemetry)?;

    let roster = EmployeeRoster::load(config.dashboard.dataset.as_deref())?;
    let employees = roster.len();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        dashboard: DashboardState::new(roster, config.dashboard.page_size),
    };

    let app = dashboard_router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, employees, "employee dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
