// HTTP request handlers
use crate::domain::catalog::{ALL_GAMES, Game};
use crate::domain::chart::ChartKind;
use crate::domain::error::ReportError;
use crate::domain::stats::{MonthResult, StatsQuery};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

#[derive(Serialize)]
pub struct GameDto {
    pub id: &'static str,
    pub name: &'static str,
}

/// List all games the catalog knows about
pub async fn list_games() -> Json<Vec<GameDto>> {
    Json(
        ALL_GAMES
            .iter()
            .map(|g| GameDto {
                id: g.id(),
                name: g.name(),
            })
            .collect(),
    )
}

#[derive(Serialize)]
pub struct GameMetricsDto {
    pub game: &'static str,
    pub metrics: Vec<&'static str>,
}

/// List the metric vocabulary for one game
pub async fn list_metrics(Path(game): Path<String>) -> Response {
    match game.parse::<Game>() {
        Ok(game) => Json(GameMetricsDto {
            game: game.id(),
            metrics: game.metrics().to_vec(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Deserialize)]
pub struct ReportParams {
    pub year: u16,
    pub months: Option<u8>,
    pub metrics: String,
    pub kind: Option<String>,
}

#[derive(Serialize)]
pub struct MonthStatusDto {
    pub month: u8,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<HashMap<String, f64>>,
}

impl From<&MonthResult> for MonthStatusDto {
    fn from(result: &MonthResult) -> Self {
        match result {
            MonthResult::Success { month, values } => Self {
                month: *month,
                status: "ok",
                reason: None,
                detail: None,
                values: Some(values.clone()),
            },
            MonthResult::Failure {
                month,
                kind,
                detail,
            } => Self {
                month: *month,
                status: "error",
                reason: Some(kind.as_str()),
                detail: Some(detail.clone()),
                values: None,
            },
        }
    }
}

#[derive(Serialize)]
pub struct ReportDto {
    pub title: String,
    pub game: &'static str,
    pub player: String,
    pub year: u16,
    pub months: Vec<u8>,
    pub metrics: Vec<String>,
    pub statuses: Vec<MonthStatusDto>,
    pub rows: Vec<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_svg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_error: Option<String>,
}

pub(crate) fn parse_metric_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn build_query(
    game: &str,
    player: String,
    params: &ReportParams,
) -> Result<(StatsQuery, ChartKind), ReportError> {
    let game = game.parse::<Game>()?;
    let kind = params
        .kind
        .as_deref()
        .unwrap_or("line")
        .parse::<ChartKind>()?;
    let query = StatsQuery::new(
        game,
        player,
        params.year,
        params.months.unwrap_or(6),
        parse_metric_list(&params.metrics),
    )?;
    Ok((query, kind))
}

/// Full report: per-month statuses plus the chart, as JSON. Per-month
/// failures are part of the body, not an error status.
pub async fn get_report(
    Path((game, player)): Path<(String, String)>,
    Query(params): Query<ReportParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let (query, kind) = match build_query(&game, player, &params) {
        Ok(built) => built,
        Err(e) => return error_response(e),
    };

    let report = state.report_service.build_report(&query, kind).await;
    let (chart_svg, chart_error) = match report.chart {
        Ok(artifact) => (
            Some(String::from_utf8_lossy(&artifact.bytes).into_owned()),
            None,
        ),
        Err(e) => (None, Some(e.to_string())),
    };

    Json(ReportDto {
        title: report.title,
        game: query.game.id(),
        player: query.player,
        year: query.year,
        months: report.series.months().to_vec(),
        metrics: report.series.metrics().to_vec(),
        statuses: report.results.iter().map(MonthStatusDto::from).collect(),
        rows: report.series.rows().to_vec(),
        chart_svg,
        chart_error,
    })
    .into_response()
}

/// Just the chart bytes, for direct display or download
pub async fn get_report_chart(
    Path((game, player)): Path<(String, String)>,
    Query(params): Query<ReportParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let (query, kind) = match build_query(&game, player, &params) {
        Ok(built) => built,
        Err(e) => return error_response(e),
    };

    let report = state.report_service.build_report(&query, kind).await;
    match report.chart {
        Ok(artifact) => (
            [(header::CONTENT_TYPE, artifact.format.content_type())],
            artifact.bytes,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: ReportError) -> Response {
    let status = match &e {
        ReportError::UnknownGame(_) => StatusCode::NOT_FOUND,
        ReportError::InvalidMetric { .. }
        | ReportError::InvalidWindow(_)
        | ReportError::NoMetrics
        | ReportError::UnsupportedChartKind(_) => StatusCode::BAD_REQUEST,
        ReportError::EmptySeries => StatusCode::UNPROCESSABLE_ENTITY,
        ReportError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
}
