// Stats domain models - queries, per-month outcomes, and the aggregated table
use crate::domain::catalog::Game;
use crate::domain::error::ReportError;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Transport failure or non-2xx status from the upstream API
    RemoteError,
    /// Response body was not well-formed JSON
    MalformedResponse,
    /// Response parsed but was empty/null - no data for that period
    NotFound,
}

impl FetchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::RemoteError => "remote_error",
            FetchErrorKind::MalformedResponse => "malformed_response",
            FetchErrorKind::NotFound => "not_found",
        }
    }
}

/// Outcome of fetching one month. Exactly one of these exists per requested
/// month; failures are data, not errors, so one bad month never aborts the
/// surrounding window.
#[derive(Debug, Clone, PartialEq)]
pub enum MonthResult {
    Success {
        month: u8,
        values: HashMap<String, f64>,
    },
    Failure {
        month: u8,
        kind: FetchErrorKind,
        detail: String,
    },
}

impl MonthResult {
    pub fn month(&self) -> u8 {
        match self {
            MonthResult::Success { month, .. } => *month,
            MonthResult::Failure { month, .. } => *month,
        }
    }

}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsQuery {
    pub game: Game,
    pub player: String,
    pub year: u16,
    pub months: Vec<u8>,
    pub metrics: Vec<String>,
}

impl StatsQuery {
    /// Build a query over the window starting at January, `month_count`
    /// months long. Validation happens here, before any network call.
    pub fn new(
        game: Game,
        player: String,
        year: u16,
        month_count: u8,
        metrics: Vec<String>,
    ) -> Result<Self, ReportError> {
        if month_count == 0 || month_count > 12 {
            return Err(ReportError::InvalidWindow(format!(
                "month count must be 1..=12, got {}",
                month_count
            )));
        }
        Self::with_months(game, player, year, (1..=month_count).collect(), metrics)
    }

    /// Build a query over an explicit ascending month window.
    pub fn with_months(
        game: Game,
        player: String,
        year: u16,
        months: Vec<u8>,
        metrics: Vec<String>,
    ) -> Result<Self, ReportError> {
        if months.is_empty() {
            return Err(ReportError::InvalidWindow("no months requested".to_string()));
        }
        for window in months.windows(2) {
            if window[1] <= window[0] {
                return Err(ReportError::InvalidWindow(format!(
                    "months must be strictly ascending, got {} after {}",
                    window[1], window[0]
                )));
            }
        }
        if let Some(&bad) = months.iter().find(|m| **m < 1 || **m > 12) {
            return Err(ReportError::InvalidWindow(format!(
                "month {} is outside 1..=12",
                bad
            )));
        }
        if metrics.is_empty() {
            return Err(ReportError::NoMetrics);
        }
        for metric in &metrics {
            if !game.has_metric(metric) {
                return Err(ReportError::InvalidMetric {
                    game: game.id().to_string(),
                    metric: metric.clone(),
                });
            }
        }
        Ok(Self {
            game,
            player,
            year,
            months,
            metrics,
        })
    }

    pub fn title(&self) -> String {
        format!("{} - {} {}", self.player, self.game.id(), self.year)
    }
}

/// Row-aligned table of metric values over the requested window. Every
/// requested month has a row whether or not its fetch succeeded; absent
/// data is an explicit `None`, never a dropped row or a fabricated zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSeries {
    months: Vec<u8>,
    metrics: Vec<String>,
    rows: Vec<Vec<Option<f64>>>,
}

impl AggregatedSeries {
    pub fn new(months: Vec<u8>, metrics: Vec<String>) -> Self {
        let rows = vec![vec![None; metrics.len()]; months.len()];
        Self {
            months,
            metrics,
            rows,
        }
    }

    pub fn months(&self) -> &[u8] {
        &self.months
    }

    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    /// Record a value for (month, metric). Unknown months or metrics are
    /// ignored - the table's shape is fixed by the query window.
    pub fn set(&mut self, month: u8, metric: &str, value: f64) {
        let row = self.months.iter().position(|m| *m == month);
        let col = self.metrics.iter().position(|m| m == metric);
        if let (Some(row), Some(col)) = (row, col) {
            self.rows[row][col] = Some(value);
        }
    }

    pub fn value(&self, month: u8, metric: &str) -> Option<f64> {
        let row = self.months.iter().position(|m| *m == month)?;
        let col = self.metrics.iter().position(|m| m == metric)?;
        self.rows[row][col]
    }

    /// Values of one metric across the window, in month order.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().map(move |row| row[col])
    }

    pub fn is_all_missing(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|v| v.is_none()))
    }

    pub fn max_value(&self) -> Option<f64> {
        self.rows
            .iter()
            .flatten()
            .filter_map(|v| *v)
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_query_window_starts_at_january() {
        let query = StatsQuery::new(
            Game::Wars,
            "Alice".to_string(),
            2024,
            6,
            metrics(&["kills"]),
        )
        .unwrap();
        assert_eq!(query.months, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_query_rejects_bad_window() {
        let err = StatsQuery::new(Game::Wars, "Alice".to_string(), 2024, 0, metrics(&["kills"]))
            .unwrap_err();
        assert!(matches!(err, ReportError::InvalidWindow(_)));

        let err = StatsQuery::new(Game::Wars, "Alice".to_string(), 2024, 13, metrics(&["kills"]))
            .unwrap_err();
        assert!(matches!(err, ReportError::InvalidWindow(_)));

        let err = StatsQuery::with_months(
            Game::Wars,
            "Alice".to_string(),
            2024,
            vec![3, 2],
            metrics(&["kills"]),
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::InvalidWindow(_)));
    }

    #[test]
    fn test_query_rejects_metric_outside_catalog() {
        // goals belongs to bridge, not sg
        let err = StatsQuery::new(
            Game::SurvivalGames,
            "Alice".to_string(),
            2024,
            3,
            metrics(&["kills", "goals"]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ReportError::InvalidMetric {
                game: "sg".to_string(),
                metric: "goals".to_string(),
            }
        );
    }

    #[test]
    fn test_query_rejects_empty_metrics() {
        let err =
            StatsQuery::new(Game::Wars, "Alice".to_string(), 2024, 3, Vec::new()).unwrap_err();
        assert_eq!(err, ReportError::NoMetrics);
    }

    #[test]
    fn test_series_shape_is_fixed_by_window() {
        let series = AggregatedSeries::new(vec![1, 2, 3], metrics(&["kills", "deaths"]));
        assert_eq!(series.rows().len(), 3);
        assert!(series.is_all_missing());
    }

    #[test]
    fn test_series_set_and_lookup() {
        let mut series = AggregatedSeries::new(vec![1, 2, 3], metrics(&["kills", "deaths"]));
        series.set(2, "kills", 7.0);
        assert_eq!(series.value(2, "kills"), Some(7.0));
        assert_eq!(series.value(2, "deaths"), None);
        assert_eq!(series.value(1, "kills"), None);
        // outside the window - ignored
        series.set(9, "kills", 99.0);
        assert_eq!(series.rows().len(), 3);
        assert_eq!(series.max_value(), Some(7.0));
    }
}
