// Renderer trait - the seam between aggregation and the drawing backend
use crate::domain::chart::{ChartArtifact, ChartSpec};
use crate::domain::error::ReportError;

pub trait ChartRenderer: Send + Sync {
    /// Render one chart. Fails with `EmptySeries` when there is nothing
    /// plottable; never mutates or consumes the spec's series.
    fn render(&self, spec: &ChartSpec) -> Result<ChartArtifact, ReportError>;
}
