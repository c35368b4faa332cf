//! Fantasy roster merge and daily report.
//!
//! Roster aliases are resolved against the players present in a reconciled
//! box-score result, then scored with the configured weights. The pure helpers
//! ([`merge_roster`], [`team_totals`], [`daily_report`]) are exposed so a
//! previously reconciled result can be merged again without refetching.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use courtside_core::{
    CanonicalRecord, CourtsideConfig, CourtsideError, Decimal, EntityKind, FantasyMergedEntry,
    FantasyReport, FantasyRosterEntry, IdentityId, IdentityRegistry, PlayerStatus,
    ReconcileError, ReconciledResult, Resolution, RosterSnapshot, TeamDirectory, TeamTotal,
    fantasy_points,
};

use crate::Courtside;
use crate::phase::PhaseEvent;
use crate::router::box_scores::BoxScoreRequest;

impl Courtside {
    /// Join a fantasy roster with the reconciled box scores for `date`.
    ///
    /// One entry per roster slot, in roster order.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `date` is not `YYYY-MM-DD`.
    pub async fn merge_fantasy(
        &self,
        date: &str,
        roster: &RosterSnapshot,
    ) -> Result<Vec<FantasyMergedEntry>, CourtsideError> {
        let (entries, _) = self.fantasy_pass(date, roster).await?;
        Ok(entries)
    }

    /// Daily fantasy summary for `date`: top performers, underperformers,
    /// injured players and per-team totals.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `date` is not `YYYY-MM-DD`.
    pub async fn fantasy_report(
        &self,
        date: &str,
        roster: &RosterSnapshot,
    ) -> Result<FantasyReport, CourtsideError> {
        let (entries, result) = self.fantasy_pass(date, roster).await?;
        Ok(daily_report(
            result.date,
            &entries,
            result.errors,
            result.partial,
            &self.cfg,
        ))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "courtside::router::fantasy",
            skip(self, roster),
            fields(slots = roster.entries.len()),
        )
    )]
    async fn fantasy_pass(
        &self,
        date: &str,
        roster: &RosterSnapshot,
    ) -> Result<(Vec<FantasyMergedEntry>, ReconciledResult), CourtsideError> {
        let (mut result, mut pass) = self
            .box_score_pass(&BoxScoreRequest::new(date), true)
            .await?;
        let (entries, errors) = merge_roster(&result, roster, &self.cfg);
        result.errors.extend(errors);
        pass.advance(PhaseEvent::Merged);
        Ok((entries, result))
    }
}

fn league_code(raw: &str) -> String {
    TeamDirectory::nba()
        .lookup(raw)
        .map_or_else(|| raw.trim().to_uppercase(), |t| t.code.to_string())
}

/// Resolve every roster slot against the players in `result` and score it.
///
/// Returns the merged entries in roster order, plus an `IdentityConflict`
/// diagnostic for every alias that matched several players.
#[must_use]
pub fn merge_roster(
    result: &ReconciledResult,
    roster: &RosterSnapshot,
    cfg: &CourtsideConfig,
) -> (Vec<FantasyMergedEntry>, Vec<ReconcileError>) {
    let mut registry = IdentityRegistry::new(cfg.match_policy.clone());
    let mut played: HashMap<IdentityId, &CanonicalRecord> = HashMap::new();
    for r in result.records_of(EntityKind::Player) {
        let scope = r.team_code.as_deref().map(league_code);
        if let Ok(id) =
            registry.register(EntityKind::Player, &r.entity_id, &r.display_name, scope.as_deref())
        {
            played.insert(id, r);
        }
    }

    let mut errors = Vec::new();
    let entries = roster
        .entries
        .iter()
        .map(|slot| {
            let alias = slot.player_alias.as_str();
            let scope = slot.pro_team.as_deref().map(league_code);
            let mut resolution = registry.resolve(EntityKind::Player, alias, scope.as_deref());
            if scope.is_some() && resolution == Resolution::Unresolved {
                // traded since the roster sync
                resolution = registry.resolve(EntityKind::Player, alias, None);
            }
            match resolution {
                Resolution::Resolved(id) => match played.get(&id).copied() {
                    Some(record) => merged(slot, Some(record), PlayerStatus::Active, cfg),
                    None => absent(slot, cfg),
                },
                Resolution::Conflict(ids) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        alias,
                        candidates = ids.len(),
                        "courtside: roster alias is ambiguous"
                    );
                    errors.push(ReconcileError::IdentityConflict {
                        kind: EntityKind::Player,
                        raw: alias.to_string(),
                        candidates: ids
                            .iter()
                            .filter_map(|id| registry.get(*id))
                            .map(|i| i.canonical_code.clone())
                            .collect(),
                    });
                    merged(slot, None, PlayerStatus::Unresolved, cfg)
                }
                Resolution::Unresolved => absent(slot, cfg),
            }
        })
        .collect();
    (entries, errors)
}

fn absent(slot: &FantasyRosterEntry, cfg: &CourtsideConfig) -> FantasyMergedEntry {
    let status = if slot.injury_flag {
        PlayerStatus::Out
    } else {
        PlayerStatus::DidNotPlay
    };
    merged(slot, None, status, cfg)
}

fn merged(
    slot: &FantasyRosterEntry,
    record: Option<&CanonicalRecord>,
    status: PlayerStatus,
    cfg: &CourtsideConfig,
) -> FantasyMergedEntry {
    let points = record.map_or(Decimal::ZERO, |r| fantasy_points(&r.stats, &cfg.scoring));
    let underperforming = status == PlayerStatus::Active
        && slot
            .avg_points
            .is_some_and(|avg| avg > Decimal::ZERO && points < avg * cfg.underperformance_ratio);
    FantasyMergedEntry {
        roster_entry: slot.clone(),
        record: record.cloned(),
        estimated_fantasy_points: points,
        status,
        status_text: status.as_str().to_string(),
        injured: status != PlayerStatus::Active && slot.injury_flag,
        underperforming,
    }
}

/// Sum estimated points per fantasy team, best first.
#[must_use]
pub fn team_totals(entries: &[FantasyMergedEntry]) -> Vec<TeamTotal> {
    let mut totals: BTreeMap<&str, TeamTotal> = BTreeMap::new();
    for e in entries {
        let slot = &e.roster_entry;
        let total = totals.entry(slot.team_id.as_str()).or_insert_with(|| TeamTotal {
            team_id: slot.team_id.clone(),
            team_name: None,
            total_points: Decimal::ZERO,
            active_players: 0,
        });
        if total.team_name.is_none() {
            total.team_name.clone_from(&slot.team_name);
        }
        total.total_points += e.estimated_fantasy_points;
        if e.status == PlayerStatus::Active {
            total.active_players += 1;
        }
    }
    let mut out: Vec<TeamTotal> = totals.into_values().collect();
    out.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
    out
}

/// Assemble the daily report from merged entries.
#[must_use]
pub fn daily_report(
    date: NaiveDate,
    entries: &[FantasyMergedEntry],
    errors: Vec<ReconcileError>,
    partial: bool,
    cfg: &CourtsideConfig,
) -> FantasyReport {
    let mut top: Vec<&FantasyMergedEntry> = entries
        .iter()
        .filter(|e| e.status == PlayerStatus::Active)
        .collect();
    top.sort_by(|a, b| {
        b.estimated_fantasy_points
            .cmp(&a.estimated_fantasy_points)
            .then_with(|| a.roster_entry.player_alias.cmp(&b.roster_entry.player_alias))
    });
    top.truncate(cfg.top_performers);

    let shortfall = |e: &FantasyMergedEntry| {
        e.estimated_fantasy_points - e.roster_entry.avg_points.unwrap_or_default()
    };
    let mut under: Vec<&FantasyMergedEntry> = entries.iter().filter(|e| e.underperforming).collect();
    under.sort_by(|a, b| {
        shortfall(a)
            .cmp(&shortfall(b))
            .then_with(|| a.roster_entry.player_alias.cmp(&b.roster_entry.player_alias))
    });

    FantasyReport {
        date,
        top_performers: top.into_iter().cloned().collect(),
        underperformers: under.into_iter().cloned().collect(),
        injured: entries
            .iter()
            .filter(|e| e.status == PlayerStatus::Out)
            .cloned()
            .collect(),
        team_totals: team_totals(entries),
        errors,
        partial,
    }
}
