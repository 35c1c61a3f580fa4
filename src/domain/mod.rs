// Domain layer - pure data model, no I/O
pub mod catalog;
pub mod chart;
pub mod error;
pub mod stats;
