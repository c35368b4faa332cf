//! Re-export of foundational types from `courtside-types`.
// Consolidated re-exports so downstream crates can depend on `courtside-core` only

pub use courtside_types::{Capability, CourtsideError, ReconcileError, SourceError, TimeoutReason};

pub use courtside_types::SourceKey;
pub use courtside_types::{
    BudgetConfig, CourtsideConfig, FallbackConfig, FallbackPolicy, MatchPolicy, MatchStrategy,
    QuotaConfig, QuotaState, ScoringWeights,
};
pub use courtside_types::{
    CanonicalRecord, EntityKind, GameRef, HomeAway, StatCategory, StatKind, StatLine,
    StatThresholds, ThresholdLogic,
};
pub use courtside_types::{
    FantasyMergedEntry, FantasyReport, FantasyRosterEntry, PlayerStatus, Provenance,
    ReconciledResult, RosterSnapshot, SourceUsed, TeamTotal,
};

pub use chrono::{DateTime, NaiveDate, Utc};
pub use rust_decimal::{Decimal, RoundingStrategy};
