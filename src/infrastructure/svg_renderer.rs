// SVG chart renderer built on plotters
use crate::application::chart_renderer::ChartRenderer;
use crate::domain::chart::{ChartArtifact, ChartKind, ChartSpec, ImageFormat};
use crate::domain::error::ReportError;
use plotters::prelude::*;

#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    width: u32,
    height: u32,
}

impl SvgChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

fn draw_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Render(e.to_string())
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<ChartArtifact, ReportError> {
        if spec.series.is_all_missing() {
            return Err(ReportError::EmptySeries);
        }

        let series = &spec.series;
        let months = series.months().to_vec();
        let n = months.len();
        let y_max = series.max_value().unwrap_or(1.0).max(1.0) * 1.1;

        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&spec.title, ("sans-serif", 24))
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)
                .map_err(draw_err)?;

            chart
                .configure_mesh()
                .x_desc("Month")
                .y_desc("Count")
                .x_labels(n)
                .x_label_formatter(&|x| {
                    // Label integer positions with the month they stand for
                    let i = x.round();
                    if (x - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < n {
                        months[i as usize].to_string()
                    } else {
                        String::new()
                    }
                })
                .draw()
                .map_err(draw_err)?;

            for (col, metric) in series.metrics().iter().enumerate() {
                let color = Palette99::pick(col);
                let points: Vec<(f64, f64)> = series
                    .column(col)
                    .enumerate()
                    .filter_map(|(i, v)| v.map(|y| (i as f64, y)))
                    .collect();
                if points.is_empty() {
                    // All-missing column: nothing to draw, nothing to label
                    continue;
                }

                match spec.kind {
                    ChartKind::Line => {
                        // Missing months break the line into separate runs;
                        // gaps are never interpolated across.
                        let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
                        let mut run: Vec<(f64, f64)> = Vec::new();
                        for v in series.column(col).enumerate().map(|(i, v)| (i as f64, v)) {
                            match v {
                                (x, Some(y)) => run.push((x, y)),
                                (_, None) => {
                                    if !run.is_empty() {
                                        runs.push(std::mem::take(&mut run));
                                    }
                                }
                            }
                        }
                        if !run.is_empty() {
                            runs.push(run);
                        }

                        for (k, run) in runs.into_iter().enumerate() {
                            let anno = chart
                                .draw_series(LineSeries::new(run, color.stroke_width(2)))
                                .map_err(draw_err)?;
                            if k == 0 {
                                let color = Palette99::pick(col);
                                anno.label(metric.clone()).legend(move |(x, y)| {
                                    PathElement::new(
                                        vec![(x, y), (x + 16, y)],
                                        color.stroke_width(2),
                                    )
                                });
                            }
                        }
                        chart
                            .draw_series(
                                points
                                    .iter()
                                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                            )
                            .map_err(draw_err)?;
                    }
                    ChartKind::Bar => {
                        let band = 0.8 / series.metrics().len() as f64;
                        let left = move |x: f64| x - 0.4 + band * col as f64;
                        chart
                            .draw_series(points.iter().map(|&(x, y)| {
                                Rectangle::new(
                                    [(left(x), 0.0), (left(x) + band, y)],
                                    color.filled(),
                                )
                            }))
                            .map_err(draw_err)?
                            .label(metric.clone())
                            .legend(move |(x, y)| {
                                Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                            });
                    }
                }
            }

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }

        Ok(ChartArtifact {
            bytes: buffer.into_bytes(),
            format: ImageFormat::Svg,
        })
    }
}
