// Main entry point - dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::application::report_service::ReportService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::hive_repository::HiveStatsRepository;
use crate::infrastructure::svg_renderer::SvgChartRenderer;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_report, get_report_chart, health_check, list_games, list_metrics,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_app_config()?;

    // Create adapters (infrastructure layer)
    let repository = Arc::new(HiveStatsRepository::new(
        config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?);
    let renderer = Arc::new(SvgChartRenderer::default());

    // Create services (application layer)
    let report_service = ReportService::new(repository, renderer, config.fetch.concurrency);

    // Create application state
    let state = Arc::new(AppState { report_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/games", get(list_games))
        .route("/games/:game/metrics", get(list_metrics))
        .route("/reports/:game/:player", get(get_report))
        .route("/reports/:game/:player/chart", get(get_report_chart))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind_addr.parse()?;
    tracing::info!("starting hive-graphs service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
