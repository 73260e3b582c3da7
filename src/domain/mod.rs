// Domain layer - Pure glucose graph models and logic
pub mod events;
pub mod graph;
pub mod graph_data;
pub mod interpolate;
pub mod severity;
pub mod units;
