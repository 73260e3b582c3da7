// Server-sent-events adapter for streaming graph refreshes
use crate::domain::graph_data::GraphData;
use crate::infrastructure::json_mapper::graph_data_to_payload;
use axum::response::IntoResponse;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::StreamExt;
use tokio::sync::mpsc;

/// Turn a receiver of graph snapshots into an SSE response, one JSON event
/// per refresh tick. The stream ends when the refresh task drops its sender.
pub fn sse_from_receiver(mut rx: mpsc::Receiver<GraphData>) -> impl IntoResponse {
    let snapshots = async_stream::stream! {
        while let Some(data) = rx.recv().await {
            yield data;
        }
    };

    let events = snapshots.map(|data| {
        Event::default()
            .event("graph")
            .json_data(graph_data_to_payload(data))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
