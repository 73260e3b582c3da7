// HTTP request handlers
use crate::application::graph_service::GraphRequest;
use crate::domain::units::DisplayUnit;
use crate::infrastructure::config::ChartConfig;
use crate::infrastructure::json_mapper::graph_data_to_payload;
use crate::infrastructure::sse_stream::sse_from_receiver;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub hours: Option<i32>,
    pub unit: Option<String>,
    pub prediction: Option<bool>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// One-shot dashboard snapshot
pub async fn get_dashboard(
    Query(query): Query<DashboardQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let request = resolve_request(&query, &state.chart_config);
    let data = state.graph_service.get_graph_data(request).await;
    Json(graph_data_to_payload(data))
}

/// Periodically refreshing dashboard stream (server-sent events)
pub async fn stream_dashboard(
    Query(query): Query<DashboardQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let request = resolve_request(&query, &state.chart_config);
    let rx = state.streaming_service.stream_graph_data(request);
    sse_from_receiver(rx)
}

/// Merge query parameters over the configured chart defaults.
fn resolve_request(query: &DashboardQuery, defaults: &ChartConfig) -> GraphRequest {
    let unit = match query.unit.as_deref() {
        Some(raw) => DisplayUnit::parse(raw).unwrap_or_else(|| {
            tracing::warn!("Unrecognized unit parameter '{}', using configured default", raw);
            defaults.display_unit()
        }),
        None => defaults.display_unit(),
    };

    GraphRequest {
        hours: query.hours.unwrap_or(defaults.hours).max(1),
        unit,
        include_prediction: query.prediction.unwrap_or(defaults.prediction_enabled),
    }
}
