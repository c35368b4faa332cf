//! Result envelopes produced by the engine.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::capability::Capability;
use crate::error::ReconcileError;
use crate::record::{CanonicalRecord, EntityKind, StatCategory};
use crate::roster::FantasyRosterEntry;

/// Which sources ended up serving a reconciled result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceUsed {
    /// Only the primary source contributed records.
    Primary,
    /// Only fallback sources contributed records.
    Fallback,
    /// Records from both were joined.
    MergedBoth,
    /// No source contributed anything.
    NoDataAvailable,
}

/// Which source served one reconciled key, and which were set aside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Canonical entity id of the key.
    pub entity_id: String,
    /// Entity kind of the key.
    pub kind: EntityKind,
    /// Game date of the key.
    pub date: NaiveDate,
    /// Source whose record forms the base of the served record.
    pub served_by: String,
    /// Categories whose values were taken from a higher-ranked source than `served_by`.
    pub overrides: BTreeMap<StatCategory, String>,
    /// Sources that produced a record for this key which contributed nothing.
    pub discarded: Vec<String>,
}

/// Outcome of one reconciliation pass.
///
/// Carries the ordered records together with the non-fatal diagnostics that
/// explain any gaps, so callers never have to guess why data is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledResult {
    /// Capability the result was produced for.
    pub capability: Capability,
    /// Requested game date.
    pub date: NaiveDate,
    /// Reconciled records, ordered by date, team, kind and entity.
    pub records: Vec<CanonicalRecord>,
    /// Which sources served the records.
    pub source_used: SourceUsed,
    /// Non-fatal diagnostics.
    pub errors: Vec<ReconcileError>,
    /// True when the result is known to be incomplete.
    pub partial: bool,
    /// Milliseconds of the budget spent producing the result.
    pub elapsed_budget_ms: u64,
    /// Per-key serving source, aligned with `records`.
    pub provenance: Vec<Provenance>,
    /// Records from lower-ranked sources that lost the join.
    pub superseded: Vec<CanonicalRecord>,
}

impl ReconciledResult {
    /// Empty result for `capability` on `date`.
    #[must_use]
    pub const fn empty(capability: Capability, date: NaiveDate) -> Self {
        Self {
            capability,
            date,
            records: Vec::new(),
            source_used: SourceUsed::NoDataAvailable,
            errors: Vec::new(),
            partial: true,
            elapsed_budget_ms: 0,
            provenance: Vec::new(),
            superseded: Vec::new(),
        }
    }

    /// Records of the given kind.
    pub fn records_of(&self, kind: EntityKind) -> impl Iterator<Item = &CanonicalRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    /// Provenance entry for a canonical entity id, if present.
    #[must_use]
    pub fn provenance_for(&self, entity_id: &str) -> Option<&Provenance> {
        self.provenance.iter().find(|p| p.entity_id == entity_id)
    }
}

/// Availability of a rostered player for the merged date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// A stat record exists for the date.
    Active,
    /// Listed injured and no record exists.
    Out,
    /// Healthy but no record exists.
    DidNotPlay,
    /// The roster alias matched several identities.
    Unresolved,
}

impl PlayerStatus {
    /// Human-readable status label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Out => "Out",
            Self::DidNotPlay => "Did not play",
            Self::Unresolved => "Unresolved",
        }
    }
}

/// A roster slot joined with the player's real performance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasyMergedEntry {
    /// Roster slot as synced.
    pub roster_entry: FantasyRosterEntry,
    /// Reconciled stat record for the date, when one exists.
    pub record: Option<CanonicalRecord>,
    /// Fantasy points derived from `record`; recomputed on every merge.
    pub estimated_fantasy_points: Decimal,
    /// Availability classification.
    pub status: PlayerStatus,
    /// Display label for `status`.
    pub status_text: String,
    /// Whether the player is treated as injured for this date.
    pub injured: bool,
    /// Whether the estimate fell well short of the season average.
    pub underperforming: bool,
}

/// Sum of fantasy points for one fantasy team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTotal {
    /// Fantasy team identifier.
    pub team_id: String,
    /// Fantasy team display name, when known.
    pub team_name: Option<String>,
    /// Total estimated points across the team's roster.
    pub total_points: Decimal,
    /// Number of roster entries with a stat record.
    pub active_players: usize,
}

/// Daily fantasy summary for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasyReport {
    /// Date the report covers.
    pub date: NaiveDate,
    /// Highest-scoring active players, best first.
    pub top_performers: Vec<FantasyMergedEntry>,
    /// Active players scoring well below their season average.
    pub underperformers: Vec<FantasyMergedEntry>,
    /// Players listed injured without a record.
    pub injured: Vec<FantasyMergedEntry>,
    /// Per-team totals, best first.
    pub team_totals: Vec<TeamTotal>,
    /// Diagnostics from the underlying box-score reconciliation and roster matching.
    pub errors: Vec<ReconcileError>,
    /// True when the underlying box scores were partial.
    pub partial: bool,
}
