//! Courtside reconciles basketball box scores and schedules across unreliable
//! stat providers.
//!
//! Overview
//! - Routes requests to sources that implement the `courtside_core` role traits.
//! - Applies per-capability and per-stat-category priorities to decide which
//!   provider wins when values disagree.
//! - Joins provider spellings of the same team or player onto one canonical key
//!   and records where every value came from.
//! - Bounds every pass by a wall-clock budget derived from the host platform's
//!   timeout; the engine answers with what it has instead of timing out.
//! - Merges a fantasy roster snapshot against the reconciled players.
//!
//! Key behaviors and trade-offs
//! - Fallback policy:
//!   - `CrossCheck`: fetch every eligible source concurrently and merge; most
//!     complete provenance, highest request fanout. Box-score default.
//!   - `OnFailure`: consult fallbacks only when the primary errors; an empty
//!     answer is trusted. Schedule default.
//!   - `OnFailureOrEmpty`: also fall back on an empty primary answer.
//!   - `Never`: primary only.
//! - Budget: sources whose declared cost does not fit the remaining window are
//!   skipped or truncated; a source that had to drop games flags the result
//!   `partial`. In sequential policies each source leaves room for the cheapest
//!   fetch of the fallbacks queued behind it.
//! - Identity matching: exact alias, then case-insensitive alias, then
//!   containment of the normalized names (substring or initials), then a
//!   three-letter code prefix. The ladder is configurable through
//!   `MatchPolicy`. Ambiguity is reported as a conflict, never guessed.
//! - Upstream errors never abort a pass. They are collected in `errors`.
//!
//! Examples
//! Building an engine with preferences:
//! ```rust,ignore
//! use std::sync::Arc;
//! use courtside::{Capability, Courtside, FallbackPolicy, StatCategory};
//!
//! let nba = courtside_nba::NbaStatsSource::rate_limited()?.build();
//! let espn = courtside_espn::EspnSource::rate_limited()?.build();
//!
//! let engine = Courtside::builder()
//!     .with_source(nba.clone())
//!     .with_source(espn.clone())
//!     .prefer_for_capability(Capability::BoxScores, &[nba.clone(), espn.clone()])
//!     .prefer_for_category(StatCategory::Rebounding, &[espn.clone()])
//!     .fallback_policy(Capability::Schedule, FallbackPolicy::OnFailureOrEmpty)
//!     .platform_timeout(std::time::Duration::from_secs(30))
//!     .build()?;
//! ```
//!
//! Reconciling a slate and reading provenance:
//! ```rust,ignore
//! let result = engine.reconcile_box_scores("2024-01-15", Some("LAL")).await?;
//! for (record, prov) in result.records.iter().zip(&result.provenance) {
//!     println!("{} served by {} overrides={:?}", record.entity_id, prov.served_by, prov.overrides);
//! }
//! if result.partial {
//!     // a source dropped games or nothing was found
//! }
//! ```
//!
//! Fantasy merge and daily report:
//! ```rust,ignore
//! let report = engine.fantasy_report("2024-01-15", &roster).await?;
//! for entry in &report.top_performers {
//!     println!("{} {}", entry.roster_entry.player_alias, entry.estimated_fantasy_points);
//! }
//! ```
//!
//! See `courtside/examples/` for a runnable demonstration against mock sources.
#![warn(missing_docs)]

pub(crate) mod core;
pub mod phase;
mod router;

pub use core::{Courtside, CourtsideBuilder};
pub use phase::{PassPlan, PhaseEvent, PhaseTracker, PrimaryOutcome, ReconcilePhase};
pub use router::box_scores::BoxScoreRequest;
pub use router::fantasy::{daily_report, merge_roster, team_totals};

pub use courtside_middleware::{CooldownMiddleware, QuotaMiddleware, SourceBuilder};

// Re-export core types for convenience
pub use courtside_core::{
    BoxScoreProvider,
    // Configuration
    BudgetConfig,
    // Records
    CanonicalRecord,
    Capability,
    CourtsideConfig,
    CourtsideError,
    EntityKind,
    FallbackConfig,
    FallbackPolicy,
    // Fantasy
    FantasyMergedEntry,
    FantasyReport,
    FantasyRosterEntry,
    FetchRequest,
    GameRef,
    HomeAway,
    MatchPolicy,
    MatchStrategy,
    PlayerStatus,
    Provenance,
    QuotaConfig,
    ReconcileError,
    ReconciledResult,
    RosterSnapshot,
    ScheduleProvider,
    ScoringWeights,
    SourceError,
    SourceUsed,
    StatCategory,
    StatKind,
    StatLine,
    StatThresholds,
    // Source contracts
    StatsSource,
    TeamDirectory,
    TeamTotal,
    ThresholdLogic,
    TimeoutReason,
};
