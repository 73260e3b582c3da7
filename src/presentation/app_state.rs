// Application state for HTTP handlers
use crate::application::graph_service::GraphDataService;
use crate::application::streaming_service::StreamingGraphService;
use crate::infrastructure::config::ChartConfig;

#[derive(Clone)]
pub struct AppState {
    pub graph_service: GraphDataService,
    pub streaming_service: StreamingGraphService,
    pub chart_config: ChartConfig,
}
