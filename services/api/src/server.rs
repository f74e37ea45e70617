use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_ai::chat::ChatClient;
use credit_ai::config::AppConfig;
use credit_ai::error::AppError;
use credit_ai::portfolio::PortfolioSnapshot;
use credit_ai::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry, config.environment)?;

    let chat = ChatClient::from_config(&config.chat)?;
    match &chat {
        Some(client) => info!(endpoint = client.endpoint(), "chat assistant enabled"),
        None => warn!("CHAT_URL not set; chat assistant disabled"),
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        chat: chat.map(Arc::new),
    };

    let snapshot = Arc::new(PortfolioSnapshot::generate(config.portfolio.seed));

    let app = with_service_routes(snapshot)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, seed = config.portfolio.seed, "credit scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
