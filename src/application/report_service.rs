// Report service - drives per-month fetches and assembles the aligned table
use crate::application::chart_renderer::ChartRenderer;
use crate::application::stats_repository::MonthlyStatsRepository;
use crate::domain::chart::{ChartArtifact, ChartKind, ChartSpec};
use crate::domain::error::ReportError;
use crate::domain::stats::{AggregatedSeries, MonthResult, StatsQuery};
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Everything one request produces: the table, the per-month outcomes for
/// display, and the rendered chart. A render failure leaves the aggregated
/// data intact for inspection.
#[derive(Debug)]
pub struct Report {
    pub title: String,
    pub series: AggregatedSeries,
    pub results: Vec<MonthResult>,
    pub chart: Result<ChartArtifact, ReportError>,
}

#[derive(Clone)]
pub struct ReportService {
    repository: Arc<dyn MonthlyStatsRepository>,
    renderer: Arc<dyn ChartRenderer>,
    fetch_concurrency: usize,
}

impl ReportService {
    pub fn new(
        repository: Arc<dyn MonthlyStatsRepository>,
        renderer: Arc<dyn ChartRenderer>,
        fetch_concurrency: usize,
    ) -> Self {
        Self {
            repository,
            renderer,
            fetch_concurrency: fetch_concurrency.max(1),
        }
    }

    /// Fetch every month in the query's window and assemble the row-aligned
    /// series. Months are fetched with a bounded concurrency cap; results
    /// come back in month order regardless of completion order, and one
    /// month's failure never cancels another's fetch.
    pub async fn aggregate(&self, query: &StatsQuery) -> (AggregatedSeries, Vec<MonthResult>) {
        let results: Vec<MonthResult> = stream::iter(query.months.iter().copied())
            .map(|month| {
                let repository = self.repository.clone();
                let game = query.game;
                let player = query.player.clone();
                let year = query.year;
                let metrics = query.metrics.clone();
                async move {
                    repository
                        .fetch_month(game, &player, year, month, &metrics)
                        .await
                }
            })
            .buffered(self.fetch_concurrency)
            .collect()
            .await;

        let mut series = AggregatedSeries::new(query.months.clone(), query.metrics.clone());
        for result in &results {
            match result {
                MonthResult::Success { month, values } => {
                    for metric in &query.metrics {
                        if let Some(value) = values.get(metric) {
                            series.set(*month, metric, *value);
                        }
                    }
                }
                MonthResult::Failure {
                    month,
                    kind,
                    detail,
                } => {
                    tracing::warn!(
                        "no data for {} {}/{}: {} ({})",
                        query.player,
                        month,
                        query.year,
                        kind.as_str(),
                        detail
                    );
                }
            }
        }

        (series, results)
    }

    /// Aggregate and render in one pass. Rendering failures abort only the
    /// render step - the series and per-month statuses are still returned.
    pub async fn build_report(&self, query: &StatsQuery, kind: ChartKind) -> Report {
        let (series, results) = self.aggregate(query).await;
        let title = query.title();
        let spec = ChartSpec {
            series: series.clone(),
            kind,
            title: title.clone(),
        };
        let chart = self.renderer.render(&spec);
        if let Err(e) = &chart {
            tracing::warn!("chart render failed for {}: {}", title, e);
        }
        Report {
            title,
            series,
            results,
            chart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Game;
    use crate::domain::chart::ImageFormat;
    use crate::domain::stats::FetchErrorKind;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted repository: one canned outcome per month, plus a call count
    /// so tests can assert how many fetches were issued.
    struct ScriptedRepository {
        outcomes: HashMap<u8, MonthResult>,
        calls: AtomicUsize,
    }

    impl ScriptedRepository {
        fn new(outcomes: Vec<MonthResult>) -> Self {
            Self {
                outcomes: outcomes.into_iter().map(|r| (r.month(), r)).collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MonthlyStatsRepository for ScriptedRepository {
        async fn fetch_month(
            &self,
            _game: Game,
            _player: &str,
            _year: u16,
            month: u8,
            _metrics: &[String],
        ) -> MonthResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .get(&month)
                .cloned()
                .unwrap_or(MonthResult::Failure {
                    month,
                    kind: FetchErrorKind::NotFound,
                    detail: "unscripted month".to_string(),
                })
        }
    }

    struct StubRenderer;

    impl ChartRenderer for StubRenderer {
        fn render(&self, spec: &ChartSpec) -> Result<ChartArtifact, ReportError> {
            if spec.series.is_all_missing() {
                return Err(ReportError::EmptySeries);
            }
            Ok(ChartArtifact {
                bytes: b"<svg/>".to_vec(),
                format: ImageFormat::Svg,
            })
        }
    }

    fn success(month: u8, values: &[(&str, f64)]) -> MonthResult {
        MonthResult::Success {
            month,
            values: values
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    fn failure(month: u8, kind: FetchErrorKind, detail: &str) -> MonthResult {
        MonthResult::Failure {
            month,
            kind,
            detail: detail.to_string(),
        }
    }

    fn service(repository: Arc<ScriptedRepository>) -> ReportService {
        ReportService::new(repository, Arc::new(StubRenderer), 2)
    }

    fn ctf_query(months: u8) -> StatsQuery {
        StatsQuery::new(
            Game::CaptureTheFlag,
            "Alice".to_string(),
            2024,
            months,
            vec!["kills".to_string(), "deaths".to_string()],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_row_count_matches_window_despite_failures() {
        let repository = Arc::new(ScriptedRepository::new(vec![
            failure(1, FetchErrorKind::RemoteError, "status 500"),
            failure(2, FetchErrorKind::RemoteError, "status 500"),
            success(3, &[("kills", 1.0), ("deaths", 0.0)]),
            failure(4, FetchErrorKind::MalformedResponse, "bad json"),
            failure(5, FetchErrorKind::NotFound, "empty body"),
        ]));
        let service = service(repository.clone());

        let (series, results) = service.aggregate(&ctf_query(5)).await;

        assert_eq!(series.months(), &[1, 2, 3, 4, 5]);
        assert_eq!(series.rows().len(), 5);
        assert_eq!(results.len(), 5);
        assert_eq!(repository.call_count(), 5);
        // results stay in month order no matter the completion order
        let months: Vec<u8> = results.iter().map(|r| r.month()).collect();
        assert_eq!(months, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_ctf_three_month_scenario() {
        let repository = Arc::new(ScriptedRepository::new(vec![
            success(1, &[("kills", 10.0), ("deaths", 2.0)]),
            failure(2, FetchErrorKind::NotFound, "status 404"),
            success(3, &[("kills", 7.0)]),
        ]));
        let service = service(repository);

        let (series, results) = service.aggregate(&ctf_query(3)).await;

        assert_eq!(series.value(1, "kills"), Some(10.0));
        assert_eq!(series.value(1, "deaths"), Some(2.0));
        assert_eq!(series.value(2, "kills"), None);
        assert_eq!(series.value(2, "deaths"), None);
        assert_eq!(series.value(3, "kills"), Some(7.0));
        // deaths absent from month 3's payload - missing, not zero
        assert_eq!(series.value(3, "deaths"), None);

        let not_found: Vec<u8> = results
            .iter()
            .filter_map(|r| match r {
                MonthResult::Failure {
                    month,
                    kind: FetchErrorKind::NotFound,
                    ..
                } => Some(*month),
                _ => None,
            })
            .collect();
        assert_eq!(not_found, vec![2]);
    }

    #[tokio::test]
    async fn test_invalid_metric_issues_no_fetches() {
        let repository = Arc::new(ScriptedRepository::new(Vec::new()));
        let _service = service(repository.clone());

        let err = StatsQuery::new(
            Game::SurvivalGames,
            "Alice".to_string(),
            2024,
            3,
            vec!["goals".to_string()],
        )
        .unwrap_err();

        assert!(matches!(err, ReportError::InvalidMetric { .. }));
        assert_eq!(repository.call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_values_pass_through_unmodified() {
        let repository = Arc::new(ScriptedRepository::new(vec![success(
            1,
            &[("kills", 12345.678), ("deaths", 0.0)],
        )]));
        let service = service(repository);

        let (series, _) = service.aggregate(&ctf_query(1)).await;
        assert_eq!(series.value(1, "kills"), Some(12345.678));
        assert_eq!(series.value(1, "deaths"), Some(0.0));
    }

    #[tokio::test]
    async fn test_build_report_keeps_data_when_render_fails() {
        let repository = Arc::new(ScriptedRepository::new(vec![
            failure(1, FetchErrorKind::NotFound, "empty body"),
            failure(2, FetchErrorKind::NotFound, "empty body"),
        ]));
        let service = service(repository);

        let report = service.build_report(&ctf_query(2), ChartKind::Line).await;

        assert_eq!(report.chart.unwrap_err(), ReportError::EmptySeries);
        assert_eq!(report.series.rows().len(), 2);
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.title, "Alice - ctf 2024");
    }

    #[tokio::test]
    async fn test_build_report_renders_chart() {
        let repository = Arc::new(ScriptedRepository::new(vec![success(
            1,
            &[("kills", 3.0)],
        )]));
        let service = service(repository);

        let report = service.build_report(&ctf_query(1), ChartKind::Bar).await;
        let artifact = report.chart.unwrap();
        assert_eq!(artifact.format, ImageFormat::Svg);
        assert!(!artifact.bytes.is_empty());
    }
}
