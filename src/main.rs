// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::application::graph_service::GraphDataService;
use crate::application::streaming_service::StreamingGraphService;
use crate::infrastructure::config::{load_chart_config, load_nightscout_config};
use crate::infrastructure::nightscout_repository::NightscoutRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_dashboard, health_check, stream_dashboard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let nightscout_config = load_nightscout_config()?;
    let chart_config = load_chart_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(NightscoutRepository::new(
        nightscout_config.nightscout.url,
        nightscout_config.nightscout.token,
    ));

    // Create services (application layer)
    let graph_service = GraphDataService::new(repository);
    let streaming_service = StreamingGraphService::new(
        graph_service.clone(),
        Duration::from_secs(chart_config.poll_seconds),
    );

    // Create application state
    let state = Arc::new(AppState {
        graph_service,
        streaming_service,
        chart_config,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/stream", get(stream_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
    println!("Starting glucose-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
