//! Conversion of site API payloads into canonical records.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use courtside_core::calendar::eastern_date;
use courtside_core::{
    CanonicalRecord, Decimal, EntityKind, GameRef, HomeAway, StatKind, StatLine,
};
use serde_json::Value;

use crate::payload::{Competitor, Event, StatTable, SummaryPayload};

/// Whether an event belongs to the requested Eastern date.
///
/// Events without a parseable tip-off are kept.
#[must_use]
pub fn on_date(event: &Event, date: NaiveDate) -> bool {
    event.tip_off().is_none_or(|t| eastern_date(t) == date)
}

/// Team abbreviations of an event, for team filtering.
#[must_use]
pub fn event_codes(event: &Event) -> Vec<&str> {
    event
        .competitors()
        .iter()
        .map(|c| c.team.abbreviation.as_str())
        .collect()
}

fn side(c: &Competitor) -> Option<HomeAway> {
    match c.home_away.as_deref() {
        Some("home") => Some(HomeAway::Home),
        Some("away") => Some(HomeAway::Away),
        _ => None,
    }
}

fn game_ref(event: &Event, date: NaiveDate, code: &str) -> GameRef {
    let sides = event.competitors();
    let me = sides.iter().find(|c| c.team.abbreviation == code);
    let opponent = sides.iter().find(|c| c.team.abbreviation != code);
    GameRef {
        date,
        opponent: opponent.map(|c| c.team.abbreviation.clone()),
        home_away: me.and_then(side),
        game_id: Some(event.id.clone()),
        status: event.status_text(),
    }
}

fn score(c: &Competitor) -> Option<Decimal> {
    match c.score.as_ref()? {
        Value::String(s) if !s.trim().is_empty() => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

/// One team record per competitor of an event.
#[must_use]
pub fn team_records(
    event: &Event,
    date: NaiveDate,
    source: &str,
    fetched_at: DateTime<Utc>,
) -> Vec<CanonicalRecord> {
    event
        .competitors()
        .iter()
        .map(|c| {
            let code = &c.team.abbreviation;
            let mut stats = StatLine::new();
            if let Some(p) = score(c) {
                stats.insert(StatKind::Points, p);
            }
            CanonicalRecord {
                entity_id: c.team.id.clone().unwrap_or_else(|| code.clone()),
                kind: EntityKind::Team,
                display_name: c.team.display_name.clone().unwrap_or_else(|| code.clone()),
                team_code: Some(code.clone()),
                stats,
                game: game_ref(event, date, code),
                source: source.to_string(),
                fetched_at,
            }
        })
        .collect()
}

/// Player records from a game summary; bench-only players are skipped.
#[must_use]
pub fn player_records(
    summary: &SummaryPayload,
    event: &Event,
    date: NaiveDate,
    source: &str,
    fetched_at: DateTime<Utc>,
) -> Vec<CanonicalRecord> {
    let Some(boxscore) = &summary.boxscore else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for team in &boxscore.players {
        let code = &team.team.abbreviation;
        let Some(table) = team.statistics.first() else {
            continue;
        };
        for line in &table.athletes {
            if line.did_not_play || line.stats.is_empty() {
                continue;
            }
            let stats = stat_line(table, &line.stats);
            if stats
                .get(&StatKind::Minutes)
                .is_none_or(|m| m.is_zero())
            {
                continue;
            }
            out.push(CanonicalRecord {
                entity_id: line
                    .athlete
                    .id
                    .clone()
                    .unwrap_or_else(|| line.athlete.display_name.clone()),
                kind: EntityKind::Player,
                display_name: line.athlete.display_name.clone(),
                team_code: Some(code.clone()),
                stats,
                game: game_ref(event, date, code),
                source: source.to_string(),
                fetched_at,
            });
        }
    }
    out
}

/// Map one athlete row onto stats by column header.
#[must_use]
pub fn stat_line(table: &StatTable, values: &[String]) -> StatLine {
    let mut stats = StatLine::new();
    for (column, raw) in table.columns().iter().zip(values) {
        let raw = raw.trim();
        match column.to_ascii_uppercase().as_str() {
            "MIN" | "MINUTES" => put(&mut stats, StatKind::Minutes, raw),
            "PTS" | "POINTS" => put(&mut stats, StatKind::Points, raw),
            "REB" | "REBOUNDS" => put(&mut stats, StatKind::Rebounds, raw),
            "AST" | "ASSISTS" => put(&mut stats, StatKind::Assists, raw),
            "STL" | "STEALS" => put(&mut stats, StatKind::Steals, raw),
            "BLK" | "BLOCKS" => put(&mut stats, StatKind::Blocks, raw),
            "TO" | "TURNOVERS" => put(&mut stats, StatKind::Turnovers, raw),
            "+/-" | "PLUSMINUS" => put(&mut stats, StatKind::PlusMinus, raw),
            "FG" => put_pair(
                &mut stats,
                (StatKind::FieldGoalsMade, StatKind::FieldGoalsAttempted),
                raw,
            ),
            "3PT" => put_pair(
                &mut stats,
                (StatKind::ThreePointersMade, StatKind::ThreePointersAttempted),
                raw,
            ),
            "FT" => put_pair(
                &mut stats,
                (StatKind::FreeThrowsMade, StatKind::FreeThrowsAttempted),
                raw,
            ),
            _ => {}
        }
    }
    stats
}

fn number(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.strip_prefix('+').unwrap_or(raw)).ok()
}

fn put(stats: &mut StatLine, kind: StatKind, raw: &str) {
    if let Some(v) = number(raw) {
        stats.insert(kind, v);
    }
}

/// `"made-attempted"` cells such as `"10-20"`.
fn put_pair(stats: &mut StatLine, (made, attempted): (StatKind, StatKind), raw: &str) {
    if let Some((m, a)) = raw.split_once('-') {
        put(stats, made, m);
        put(stats, attempted, a);
    }
}
