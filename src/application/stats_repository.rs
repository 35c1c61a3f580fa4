// Repository trait for monthly stats access
use crate::domain::catalog::Game;
use crate::domain::stats::MonthResult;
use async_trait::async_trait;

#[async_trait]
pub trait MonthlyStatsRepository: Send + Sync {
    /// Fetch one month of stats for a player. Exactly one upstream attempt,
    /// no retries; every outcome (including transport and parse failures)
    /// is folded into the returned `MonthResult`.
    ///
    /// `metrics` is the projection set: only these keys are kept from the
    /// upstream payload, and keys absent from the payload stay absent.
    async fn fetch_month(
        &self,
        game: Game,
        player: &str,
        year: u16,
        month: u8,
        metrics: &[String],
    ) -> MonthResult;
}
