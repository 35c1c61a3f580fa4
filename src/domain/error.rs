// Error taxonomy for report building
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReportError {
    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("metric `{metric}` is not tracked for game `{game}`")]
    InvalidMetric { game: String, metric: String },

    #[error("invalid month window: {0}")]
    InvalidWindow(String),

    #[error("no metrics requested")]
    NoMetrics,

    #[error("unsupported chart kind: {0}")]
    UnsupportedChartKind(String),

    #[error("nothing to plot: every month is missing for every requested metric")]
    EmptySeries,

    #[error("chart rendering failed: {0}")]
    Render(String),
}
