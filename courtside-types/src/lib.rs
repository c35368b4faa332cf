//! Courtside-specific data transfer objects, diagnostics and configuration primitives.
#![warn(missing_docs)]

mod capability;
mod config;
mod error;
mod record;
mod reports;
mod roster;
mod source;
mod thresholds;

pub use capability::Capability;
pub use config::{
    BudgetConfig, CourtsideConfig, FallbackConfig, FallbackPolicy, MatchPolicy,
    MatchStrategy, QuotaConfig, QuotaState, ScoringWeights,
};
pub use error::{CourtsideError, ReconcileError, SourceError, TimeoutReason};
pub use record::{CanonicalRecord, EntityKind, GameRef, HomeAway, StatCategory, StatKind, StatLine};
pub use reports::{
    FantasyMergedEntry, FantasyReport, PlayerStatus, Provenance, ReconciledResult, SourceUsed,
    TeamTotal,
};
pub use roster::{FantasyRosterEntry, RosterSnapshot};
pub use source::SourceKey;
pub use thresholds::{StatThresholds, ThresholdLogic};
