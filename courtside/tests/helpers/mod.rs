#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use courtside::{
    CanonicalRecord, Courtside, CourtsideBuilder, EntityKind, FantasyRosterEntry, GameRef,
    ReconcileError, ReconciledResult, StatKind, StatLine, StatsSource, TimeoutReason,
};
use courtside_mock::MockSource;
use rust_decimal::Decimal;

/// The fixture slate: two games.
pub const SLATE: &str = "2024-01-15";
/// A valid date with no games.
pub const OFF_DAY: &str = "2024-01-16";

pub fn slate() -> NaiveDate {
    courtside_mock::fixtures::slate_date()
}

pub fn stats() -> Arc<dyn StatsSource> {
    Arc::new(MockSource::stats_style())
}

pub fn scoreboard() -> Arc<dyn StatsSource> {
    Arc::new(MockSource::scoreboard_style())
}

/// Builder with `sources` registered in order.
pub fn engine(sources: &[Arc<dyn StatsSource>]) -> CourtsideBuilder {
    sources
        .iter()
        .fold(Courtside::builder(), |b, s| b.with_source(Arc::clone(s)))
}

/// Builder whose budget window is `window` (platform timeout minus a one-second margin).
pub fn windowed(sources: &[Arc<dyn StatsSource>], window: Duration) -> CourtsideBuilder {
    engine(sources)
        .platform_timeout(window + Duration::from_secs(1))
        .safety_margin(Duration::from_secs(1))
}

pub fn line(pairs: &[(StatKind, i64)]) -> StatLine {
    pairs.iter().map(|(k, v)| (*k, Decimal::from(*v))).collect()
}

pub fn player(source: &str, team: &str, name: &str, pts: i64, reb: i64) -> CanonicalRecord {
    CanonicalRecord {
        entity_id: format!("{source}:{name}"),
        kind: EntityKind::Player,
        display_name: name.to_string(),
        team_code: Some(team.to_string()),
        stats: line(&[(StatKind::Points, pts), (StatKind::Rebounds, reb)]),
        game: GameRef::on(slate()),
        source: source.to_string(),
        fetched_at: Utc::now(),
    }
}

pub fn team(source: &str, code: Option<&str>, name: &str, pts: i64) -> CanonicalRecord {
    CanonicalRecord {
        entity_id: code.unwrap_or(name).to_string(),
        kind: EntityKind::Team,
        display_name: name.to_string(),
        team_code: code.map(str::to_string),
        stats: line(&[(StatKind::Points, pts)]),
        game: GameRef::on(slate()),
        source: source.to_string(),
        fetched_at: Utc::now(),
    }
}

pub fn slot(team_id: &str, alias: &str, pro_team: &str) -> FantasyRosterEntry {
    FantasyRosterEntry {
        team_id: team_id.to_string(),
        team_name: None,
        player_alias: alias.to_string(),
        position_slot: "UTIL".to_string(),
        injury_flag: false,
        injury_status: None,
        pro_team: Some(pro_team.to_string()),
        avg_points: None,
    }
}

pub fn find<'a>(result: &'a ReconciledResult, entity_id: &str) -> &'a CanonicalRecord {
    result
        .records
        .iter()
        .find(|r| r.entity_id == entity_id)
        .unwrap_or_else(|| panic!("no record for {entity_id}"))
}

pub fn timeout_reason(result: &ReconciledResult, source: &str) -> Option<TimeoutReason> {
    result.errors.iter().find_map(|e| match e {
        ReconcileError::SourceTimeout {
            source_id, reason, ..
        } if source_id == source => Some(*reason),
        _ => None,
    })
}

/// Records with their fetch timestamps cleared, for comparing two passes.
pub fn without_timestamps(records: &[CanonicalRecord]) -> Vec<CanonicalRecord> {
    records
        .iter()
        .map(|r| CanonicalRecord {
            fetched_at: chrono::DateTime::<Utc>::UNIX_EPOCH,
            ..r.clone()
        })
        .collect()
}

/// Whole result with every fetch timestamp cleared, kept records and superseded ones alike.
pub fn without_fetch_times(result: &ReconciledResult) -> ReconciledResult {
    ReconciledResult {
        records: without_timestamps(&result.records),
        superseded: without_timestamps(&result.superseded),
        ..result.clone()
    }
}
