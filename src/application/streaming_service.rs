// Streaming graph service - Periodic refresh over an mpsc channel
use crate::application::graph_service::{GraphDataService, GraphRequest};
use crate::domain::graph_data::GraphData;
use std::time::Duration;
use tokio::sync::mpsc;

/// Re-runs the graph synthesis on a fixed poll interval and pushes each
/// refreshed snapshot to the subscriber. Every tick is a full recomputation;
/// there is no incremental state to invalidate.
#[derive(Clone)]
pub struct StreamingGraphService {
    graph_service: GraphDataService,
    poll_interval: Duration,
}

impl StreamingGraphService {
    pub fn new(graph_service: GraphDataService, poll_interval: Duration) -> Self {
        Self {
            graph_service,
            poll_interval,
        }
    }

    /// Subscribe to periodic graph refreshes. The first snapshot is sent
    /// immediately; the task stops when the receiver is dropped.
    pub fn stream_graph_data(&self, request: GraphRequest) -> mpsc::Receiver<GraphData> {
        let (tx, rx) = mpsc::channel(8);
        let service = self.graph_service.clone();
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                ticker.tick().await;
                let data = service.get_graph_data(request).await;
                if tx.send(data).await.is_err() {
                    tracing::debug!("Graph stream subscriber dropped, stopping refresh task");
                    break;
                }
            }
        });

        rx
    }
}
