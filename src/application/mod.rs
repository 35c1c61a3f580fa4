// Application layer - use cases behind trait seams
pub mod chart_renderer;
pub mod report_service;
pub mod stats_repository;
