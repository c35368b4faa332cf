use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::teams::TeamDirectory;
use crate::{CanonicalRecord, Capability, SourceError, SourceKey};

/// What a source is asked to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Game date (US Eastern calendar).
    pub date: NaiveDate,
    /// Restrict to games involving this team code, when set.
    pub team: Option<String>,
    /// Upper bound on per-item upstream calls, set by the budget controller.
    pub item_limit: Option<usize>,
}

impl FetchRequest {
    /// Unrestricted request for `date`.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            team: None,
            item_limit: None,
        }
    }

    /// Restrict the request to one team.
    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Cap the number of per-item calls.
    #[must_use]
    pub const fn with_item_limit(mut self, limit: Option<usize>) -> Self {
        self.item_limit = limit;
        self
    }

    /// Whether a game between `codes` passes the team filter.
    ///
    /// Codes are compared case-insensitively and through the league directory,
    /// so `"GSW"` admits a provider spelling it `"GS"`. No filter admits everything.
    #[must_use]
    pub fn admits(&self, codes: &[&str]) -> bool {
        let Some(team) = self.team.as_deref() else {
            return true;
        };
        let directory = TeamDirectory::nba();
        let wanted = directory.lookup(team).map(|t| t.code);
        codes.iter().any(|c| {
            c.eq_ignore_ascii_case(team)
                || wanted.is_some_and(|w| directory.lookup(c).is_some_and(|t| t.code == w))
        })
    }
}

/// Declared time cost of serving a request, read by the budget controller
/// before the source is scheduled.
///
/// A provider that mandates a pause between calls declares that pause as its
/// per-item cost; the pause itself is enforced by the source's [`Pacer`](crate::Pacer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceCost {
    /// One-off cost (e.g. the listing call that precedes per-game calls).
    pub fixed: Duration,
    /// Cost of each per-item call.
    pub per_item: Duration,
    /// Items the source expects to fetch for the request.
    pub expected_items: usize,
}

impl SourceCost {
    /// A cost the budget can always cover.
    #[must_use]
    pub const fn free() -> Self {
        Self {
            fixed: Duration::ZERO,
            per_item: Duration::ZERO,
            expected_items: 0,
        }
    }

    /// Cost of fetching `items` items.
    #[must_use]
    pub fn for_items(&self, items: usize) -> Duration {
        let n = u32::try_from(items).unwrap_or(u32::MAX);
        self.fixed.saturating_add(self.per_item.saturating_mul(n))
    }

    /// Cost of the full expected fetch.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.for_items(self.expected_items)
    }

    /// Smallest fetch the budget would still schedule: one item when partial
    /// results are acceptable, the full fetch otherwise.
    #[must_use]
    pub fn minimum(&self, allow_partial: bool) -> Duration {
        if allow_partial && !self.per_item.is_zero() && self.expected_items > 1 {
            self.for_items(1)
        } else {
            self.total()
        }
    }
}

/// Focused role trait for sources that provide box scores.
#[async_trait]
pub trait BoxScoreProvider: Send + Sync {
    /// Fetch per-team and per-player lines for every game on the requested date.
    async fn box_scores(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError>;
}

/// Focused role trait for sources that provide schedules and scores.
#[async_trait]
pub trait ScheduleProvider: Send + Sync {
    /// Fetch one team record per side of every game on the requested date.
    async fn schedule(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError>;
}

/// Main source trait implemented by adapter crates. Exposes capability discovery.
///
/// Sources perform idempotent reads only, so the engine may call them
/// concurrently and abandon them at the deadline.
pub trait StatsSource: Send + Sync {
    /// A stable identifier for priority lists (e.g. "nba-stats", "espn").
    fn name(&self) -> &'static str;

    /// Canonical source key constructed from the static name.
    fn key(&self) -> SourceKey {
        SourceKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Declared cost of serving `req` for `capability`.
    ///
    /// Default: free, which the budget controller always schedules.
    fn cost(&self, capability: Capability, req: &FetchRequest) -> SourceCost {
        let _ = (capability, req);
        SourceCost::free()
    }

    /// Advertise box-score capability by returning a usable trait object reference.
    fn as_box_score_provider(&self) -> Option<&dyn BoxScoreProvider> {
        None
    }

    /// Advertise schedule capability by returning a usable trait object reference.
    fn as_schedule_provider(&self) -> Option<&dyn ScheduleProvider> {
        None
    }

    /// Whether the source serves `capability` at all.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::BoxScores => self.as_box_score_provider().is_some(),
            Capability::Schedule => self.as_schedule_provider().is_some(),
            _ => false,
        }
    }
}
