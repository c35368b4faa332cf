//! courtside-nba
//!
//! Source that implements `StatsSource` on top of the public NBA stats API.
//! Serves schedules (from the scoreboard) and box scores (one traditional box
//! score call per game, paced at the provider's mandated interval).
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
/// Builder presets composing the source with middleware.
pub mod builder;
/// Conversion of stats tables into canonical records.
pub mod normalize;
/// Response wire format.
pub mod payload;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use courtside_core::{
    BoxScoreProvider, CanonicalRecord, Capability, CourtsideError, FetchRequest, Pacer,
    ScheduleProvider, SourceCost, SourceError, SourceKey, StatsSource,
};

use adapter::{NbaApi, RealAdapter};
use normalize::GameInfo;

/// Source for the NBA stats API.
pub struct NbaStatsSource {
    api: Arc<dyn NbaApi>,
    pacer: Arc<Pacer>,
    max_games: usize,
}

impl NbaStatsSource {
    /// Static key for priority configuration.
    pub const KEY: SourceKey = SourceKey::new("nba-stats");

    /// Provider-mandated pause between calls.
    pub const DEFAULT_PACING: Duration = Duration::from_millis(300);

    /// Most box scores fetched for one request.
    pub const DEFAULT_MAX_GAMES: usize = 15;

    /// Build with the production HTTP adapter.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP client cannot be built.
    pub fn try_new_default() -> Result<Self, CourtsideError> {
        Ok(Self::from_api(Arc::new(RealAdapter::try_new_default()?)))
    }

    /// Build from any [`NbaApi`] implementation.
    #[must_use]
    pub fn from_api(api: Arc<dyn NbaApi>) -> Self {
        Self {
            api,
            pacer: Arc::new(Pacer::new(Self::DEFAULT_PACING)),
            max_games: Self::DEFAULT_MAX_GAMES,
        }
    }

    /// Share a pacer with other instances hitting the same provider.
    #[must_use]
    pub fn with_pacer(mut self, pacer: Arc<Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Replace the pacing interval.
    #[must_use]
    pub fn with_pacing(self, interval: Duration) -> Self {
        self.with_pacer(Arc::new(Pacer::new(interval)))
    }

    /// Cap the number of box scores fetched per request.
    #[must_use]
    pub const fn with_max_games(mut self, max_games: usize) -> Self {
        self.max_games = max_games;
        self
    }

    /// The pacer guarding outbound calls.
    #[must_use]
    pub const fn pacer(&self) -> &Arc<Pacer> {
        &self.pacer
    }

    fn games_for(&self, req: &FetchRequest) -> usize {
        req.item_limit
            .map_or(self.max_games, |n| n.min(self.max_games))
    }

    async fn games(&self, req: &FetchRequest) -> Result<Vec<GameInfo>, SourceError> {
        self.pacer.ready().await;
        let board = self.api.scoreboard(req.date).await?;
        let games: Vec<GameInfo> = normalize::scoreboard_games(&board)?
            .into_iter()
            .filter(|g| req.admits(&g.codes()))
            .collect();
        if games.is_empty() {
            return Err(SourceError::EmptyButValid);
        }
        Ok(games)
    }
}

impl StatsSource for NbaStatsSource {
    fn name(&self) -> &'static str {
        "nba-stats"
    }

    fn vendor(&self) -> &'static str {
        "NBA.com"
    }

    fn cost(&self, capability: Capability, req: &FetchRequest) -> SourceCost {
        let call = self.pacer.interval();
        match capability {
            Capability::BoxScores => SourceCost {
                fixed: call,
                per_item: call,
                expected_items: self.games_for(req),
            },
            _ => SourceCost {
                fixed: call,
                per_item: Duration::ZERO,
                expected_items: 0,
            },
        }
    }

    fn as_box_score_provider(&self) -> Option<&dyn BoxScoreProvider> {
        Some(self as &dyn BoxScoreProvider)
    }

    fn as_schedule_provider(&self) -> Option<&dyn ScheduleProvider> {
        Some(self as &dyn ScheduleProvider)
    }
}

#[async_trait]
impl ScheduleProvider for NbaStatsSource {
    async fn schedule(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError> {
        let games = self.games(req).await?;
        Ok(normalize::schedule_records(
            &games,
            req.date,
            self.name(),
            Utc::now(),
        ))
    }
}

#[async_trait]
impl BoxScoreProvider for NbaStatsSource {
    async fn box_scores(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError> {
        let games = self.games(req).await?;
        let limit = self.games_for(req);

        let mut records = Vec::new();
        let mut first_err: Option<SourceError> = None;
        for game in games.iter().take(limit) {
            self.pacer.ready().await;
            let parsed = self.api.box_score(&game.game_id).await.and_then(|p| {
                normalize::box_score_records(&p, game, req.date, self.name(), Utc::now())
            });
            match parsed {
                Ok(recs) => records.extend(recs),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(game_id = %game.game_id, error = %e, "nba-stats: box score skipped");
                    // a rate limit applies to every remaining game; keep what was fetched
                    if matches!(e, SourceError::RateLimited { .. }) {
                        first_err = Some(e);
                        break;
                    }
                    first_err.get_or_insert(e);
                }
            }
        }

        if records.is_empty() {
            return Err(first_err.unwrap_or(SourceError::EmptyButValid));
        }
        Ok(records)
    }
}
