//! Mock sources for CI-safe tests and examples.
//!
//! - [`MockSource`] serves a fixed slate (2024-01-15, two games) in either of
//!   two naming conventions, so joins across providers can be exercised offline.
//! - [`DynamicMockSource`] defers every call to a test-controlled script.

use std::time::Duration;

use async_trait::async_trait;
use courtside_core::{
    BoxScoreProvider, CanonicalRecord, Capability, FetchRequest, NaiveDate, ScheduleProvider,
    SourceCost, SourceError, StatsSource,
};

mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};
pub use fixtures::Style;

/// Mock source serving deterministic fixture data.
///
/// Dates other than the slate date are answered with `EmptyButValid`, except
/// [`MockSource::FAIL_DATE`], which fails with an upstream 503.
pub struct MockSource {
    name: &'static str,
    style: Style,
    per_item: Duration,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::stats_style()
    }
}

impl MockSource {
    /// A date on which every call fails.
    pub const FAIL_DATE: &'static str = "1999-01-01";

    /// Fixture source named `"mock-stats"` using league naming.
    #[must_use]
    pub const fn stats_style() -> Self {
        Self {
            name: "mock-stats",
            style: Style::Stats,
            per_item: Duration::ZERO,
        }
    }

    /// Fixture source named `"mock-scoreboard"` using scoreboard naming.
    #[must_use]
    pub const fn scoreboard_style() -> Self {
        Self {
            name: "mock-scoreboard",
            style: Style::Scoreboard,
            per_item: Duration::ZERO,
        }
    }

    /// Rename the source.
    #[must_use]
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Declare a per-game cost for the budget controller.
    #[must_use]
    pub const fn with_per_item_cost(mut self, per_item: Duration) -> Self {
        self.per_item = per_item;
        self
    }

    fn check_date(date: NaiveDate) -> Result<(), SourceError> {
        if date.to_string() == Self::FAIL_DATE {
            return Err(SourceError::UpstreamError { code: 503 });
        }
        Ok(())
    }

    fn non_empty(records: Vec<CanonicalRecord>) -> Result<Vec<CanonicalRecord>, SourceError> {
        if records.is_empty() {
            Err(SourceError::EmptyButValid)
        } else {
            Ok(records)
        }
    }

    fn truncate(mut records: Vec<CanonicalRecord>, req: &FetchRequest) -> Vec<CanonicalRecord> {
        if let Some(limit) = req.item_limit {
            let mut games: Vec<String> = records
                .iter()
                .filter_map(|r| r.game.game_id.clone())
                .collect();
            games.sort();
            games.dedup();
            games.truncate(limit);
            records.retain(|r| r.game.game_id.as_ref().is_some_and(|g| games.contains(g)));
        }
        records
    }
}

impl StatsSource for MockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn cost(&self, capability: Capability, req: &FetchRequest) -> SourceCost {
        let games = if req.date == fixtures::slate_date() { 2 } else { 0 };
        match capability {
            Capability::BoxScores => SourceCost {
                fixed: Duration::ZERO,
                per_item: self.per_item,
                expected_items: games,
            },
            _ => SourceCost::free(),
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
impl BoxScoreProvider for MockSource {
    async fn box_scores(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError> {
        Self::check_date(req.date)?;
        let records = fixtures::box_scores(self.name, req, self.style);
        Self::non_empty(Self::truncate(records, req))
    }
}

#[async_trait]
impl ScheduleProvider for MockSource {
    async fn schedule(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError> {
        Self::check_date(req.date)?;
        Self::non_empty(fixtures::schedule(self.name, req, self.style))
    }
}
