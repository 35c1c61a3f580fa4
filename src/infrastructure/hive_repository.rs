// Hive stats API client - one GET per (game, player, year, month)
use crate::application::stats_repository::MonthlyStatsRepository;
use crate::domain::catalog::Game;
use crate::domain::stats::{FetchErrorKind, MonthResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HiveStatsRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HiveStatsRepository {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn month_url(&self, game: Game, player: &str, year: u16, month: u8) -> String {
        // Player names are free text and land in a path segment
        format!(
            "{}/game/monthly/player/{}/{}/{}/{}",
            self.base_url,
            game.id(),
            urlencoding::encode(player),
            year,
            month
        )
    }

    /// Classify a parsed payload. An empty or null body means the player has
    /// no data for that period; anything that is not a JSON object is not a
    /// stats payload at all.
    fn classify_payload(
        month: u8,
        payload: serde_json::Value,
        metrics: &[String],
    ) -> MonthResult {
        match payload {
            serde_json::Value::Null => MonthResult::Failure {
                month,
                kind: FetchErrorKind::NotFound,
                detail: "null body".to_string(),
            },
            serde_json::Value::Object(map) if map.is_empty() => MonthResult::Failure {
                month,
                kind: FetchErrorKind::NotFound,
                detail: "empty object".to_string(),
            },
            serde_json::Value::Object(map) => {
                // Project onto the requested metric set; the payload also
                // carries identity fields (UUID, username) we never chart.
                let values: HashMap<String, f64> = metrics
                    .iter()
                    .filter_map(|metric| {
                        map.get(metric)
                            .and_then(|v| v.as_f64())
                            .map(|v| (metric.clone(), v))
                    })
                    .collect();
                MonthResult::Success { month, values }
            }
            other => MonthResult::Failure {
                month,
                kind: FetchErrorKind::MalformedResponse,
                detail: format!("expected object, got {}", type_name(&other)),
            },
        }
    }
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[async_trait]
impl MonthlyStatsRepository for HiveStatsRepository {
    async fn fetch_month(
        &self,
        game: Game,
        player: &str,
        year: u16,
        month: u8,
        metrics: &[String],
    ) -> MonthResult {
        let url = self.month_url(game, player, year, month);
        tracing::debug!("fetching {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                return MonthResult::Failure {
                    month,
                    kind: FetchErrorKind::RemoteError,
                    detail: e.to_string(),
                };
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // The API 404s when the player has no record for that period
            return MonthResult::Failure {
                month,
                kind: FetchErrorKind::NotFound,
                detail: format!("status {}", status),
            };
        }
        if !status.is_success() {
            return MonthResult::Failure {
                month,
                kind: FetchErrorKind::RemoteError,
                detail: format!("status {}", status),
            };
        }

        match response.json::<serde_json::Value>().await {
            Ok(payload) => Self::classify_payload(month, payload, metrics),
            Err(e) => MonthResult::Failure {
                month,
                kind: FetchErrorKind::MalformedResponse,
                detail: e.to_string(),
            },
        }
    }
}
