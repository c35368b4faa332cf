//! courtside-espn
//!
//! Source that implements `StatsSource` on top of ESPN's public site API.
//! Schedules come from the scoreboard alone; box scores add one summary call
//! per game, paced at the provider's mandated interval.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
/// Builder presets composing the source with middleware.
pub mod builder;
/// Conversion of payloads into canonical records.
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

use adapter::{EspnApi, RealAdapter};
use payload::Event;

/// Source for the ESPN site API.
pub struct EspnSource {
    api: Arc<dyn EspnApi>,
    pacer: Arc<Pacer>,
    max_games: usize,
}

impl EspnSource {
    /// Static key for priority configuration.
    pub const KEY: SourceKey = SourceKey::new("espn");

    /// Provider-mandated pause between calls.
    pub const DEFAULT_PACING: Duration = Duration::from_millis(200);

    /// Most summaries fetched for one request.
    pub const DEFAULT_MAX_GAMES: usize = 15;

    /// Build with the production HTTP adapter.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP client cannot be built.
    pub fn try_new_default() -> Result<Self, CourtsideError> {
        Ok(Self::from_api(Arc::new(RealAdapter::try_new_default()?)))
    }

    /// Build from any [`EspnApi`] implementation.
    #[must_use]
    pub fn from_api(api: Arc<dyn EspnApi>) -> Self {
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

    /// Cap the number of summaries fetched per request.
    #[must_use]
    pub const fn with_max_games(mut self, max_games: usize) -> Self {
        self.max_games = max_games;
        self
    }

    fn games_for(&self, req: &FetchRequest) -> usize {
        req.item_limit
            .map_or(self.max_games, |n| n.min(self.max_games))
    }

    async fn events(&self, req: &FetchRequest) -> Result<Vec<Event>, SourceError> {
        self.pacer.ready().await;
        let board = self.api.scoreboard(req.date).await?;
        let events: Vec<Event> = board
            .events
            .into_iter()
            .filter(|e| normalize::on_date(e, req.date))
            .filter(|e| req.admits(&normalize::event_codes(e)))
            .collect();
        if events.is_empty() {
            return Err(SourceError::EmptyButValid);
        }
        Ok(events)
    }
}

impl StatsSource for EspnSource {
    fn name(&self) -> &'static str {
        "espn"
    }

    fn vendor(&self) -> &'static str {
        "ESPN"
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
impl ScheduleProvider for EspnSource {
    async fn schedule(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError> {
        let events = self.events(req).await?;
        let now = Utc::now();
        Ok(events
            .iter()
            .flat_map(|e| normalize::team_records(e, req.date, self.name(), now))
            .collect())
    }
}

#[async_trait]
impl BoxScoreProvider for EspnSource {
    async fn box_scores(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError> {
        let events = self.events(req).await?;
        let limit = self.games_for(req);

        let mut records = Vec::new();
        let mut first_err: Option<SourceError> = None;
        for event in events.iter().take(limit) {
            self.pacer.ready().await;
            match self.api.summary(&event.id).await {
                Ok(summary) => {
                    let now = Utc::now();
                    let players =
                        normalize::player_records(&summary, event, req.date, self.name(), now);
                    if players.is_empty() {
                        continue;
                    }
                    records.extend(normalize::team_records(event, req.date, self.name(), now));
                    records.extend(players);
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(event_id = %event.id, error = %e, "espn: summary skipped");
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
