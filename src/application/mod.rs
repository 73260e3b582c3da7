// Application layer - Use cases over the remote data source
pub mod graph_service;
pub mod remote_repository;
pub mod streaming_service;
