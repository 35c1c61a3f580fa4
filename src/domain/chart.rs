// Chart domain models
use crate::domain::error::ReportError;
use crate::domain::stats::AggregatedSeries;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
        }
    }
}

impl FromStr for ChartKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            other => Err(ReportError::UnsupportedChartKind(other.to_string())),
        }
    }
}

/// One render request: built once per report, consumed by the renderer.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub series: AggregatedSeries,
    pub kind: ChartKind,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
}

impl ImageFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "image/svg+xml",
        }
    }

}

/// Rendered chart bytes plus their format tag. Persistence is the caller's
/// call; `write_to` is the export hook.
#[derive(Debug, Clone)]
pub struct ChartArtifact {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl ChartArtifact {
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, &self.bytes)
    }
}
