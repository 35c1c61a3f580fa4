// Infrastructure layer - external dependencies and adapters
pub mod config;
pub mod hive_repository;
pub mod svg_renderer;
