// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod json_mapper;
pub mod nightscout_repository;
pub mod sse_stream;
