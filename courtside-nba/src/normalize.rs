//! Conversion of stats API tables into canonical records.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use courtside_core::{
    CanonicalRecord, Decimal, EntityKind, GameRef, HomeAway, RoundingStrategy, SourceError,
    StatKind, StatLine,
};

use crate::payload::{Row, StatsPayload};

/// Box-score columns and the stat each one feeds.
const STAT_COLUMNS: &[(&str, StatKind)] = &[
    ("PTS", StatKind::Points),
    ("REB", StatKind::Rebounds),
    ("AST", StatKind::Assists),
    ("STL", StatKind::Steals),
    ("BLK", StatKind::Blocks),
    ("TO", StatKind::Turnovers),
    ("FGM", StatKind::FieldGoalsMade),
    ("FGA", StatKind::FieldGoalsAttempted),
    ("FG3M", StatKind::ThreePointersMade),
    ("FG3A", StatKind::ThreePointersAttempted),
    ("FTM", StatKind::FreeThrowsMade),
    ("FTA", StatKind::FreeThrowsAttempted),
    ("PLUS_MINUS", StatKind::PlusMinus),
];

/// One side of a scoreboard game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamLine {
    /// Numeric team id as text.
    pub team_id: String,
    /// Team abbreviation.
    pub code: String,
    /// City and nickname.
    pub name: String,
    /// Final or current points, when the game has started.
    pub points: Option<Decimal>,
}

/// A game listed on the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInfo {
    /// Ten-digit game id.
    pub game_id: String,
    /// Status text (e.g. "Final", "7:30 pm ET").
    pub status: Option<String>,
    /// Home side.
    pub home: Option<TeamLine>,
    /// Visiting side.
    pub away: Option<TeamLine>,
}

impl GameInfo {
    /// Abbreviations of both sides, for team filtering.
    #[must_use]
    pub fn codes(&self) -> Vec<&str> {
        [&self.home, &self.away]
            .into_iter()
            .flatten()
            .map(|t| t.code.as_str())
            .collect()
    }

    fn opponent_of(&self, code: &str) -> Option<(&TeamLine, HomeAway)> {
        match (&self.home, &self.away) {
            (Some(h), Some(a)) if h.code == code => Some((a, HomeAway::Home)),
            (Some(h), Some(a)) if a.code == code => Some((h, HomeAway::Away)),
            _ => None,
        }
    }

    fn game_ref(&self, date: NaiveDate, code: &str) -> GameRef {
        let side = self.opponent_of(code);
        GameRef {
            date,
            opponent: side.map(|(t, _)| t.code.clone()),
            home_away: side.map(|(_, ha)| ha),
            game_id: Some(self.game_id.clone()),
            status: self.status.clone(),
        }
    }
}

/// Games on a scoreboard, in listing order, with duplicate headers dropped.
///
/// # Errors
/// Returns `MalformedResponse` when either table is missing.
pub fn scoreboard_games(payload: &StatsPayload) -> Result<Vec<GameInfo>, SourceError> {
    let header = payload.result_set("GameHeader")?;
    let lines = payload.result_set("LineScore")?;

    let mut games: Vec<(GameInfo, Option<String>, Option<String>)> = Vec::new();
    for row in header.rows() {
        let Some(game_id) = row.text("GAME_ID") else {
            continue;
        };
        if games.iter().any(|(g, _, _)| g.game_id == game_id) {
            continue;
        }
        games.push((
            GameInfo {
                game_id,
                status: row.text("GAME_STATUS_TEXT"),
                home: None,
                away: None,
            },
            row.text("HOME_TEAM_ID"),
            row.text("VISITOR_TEAM_ID"),
        ));
    }

    for row in lines.rows() {
        let (Some(game_id), Some(team_id), Some(code)) = (
            row.text("GAME_ID"),
            row.text("TEAM_ID"),
            row.text("TEAM_ABBREVIATION"),
        ) else {
            continue;
        };
        let Some((game, home_id, away_id)) = games.iter_mut().find(|(g, _, _)| g.game_id == game_id)
        else {
            continue;
        };
        let name = [row.text("TEAM_CITY_NAME"), row.text("TEAM_NAME")]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let line = TeamLine {
            team_id: team_id.clone(),
            name: if name.is_empty() { code.clone() } else { name },
            code,
            points: row.decimal("PTS"),
        };
        if home_id.as_deref() == Some(team_id.as_str()) {
            game.home = Some(line);
        } else if away_id.as_deref() == Some(team_id.as_str()) {
            game.away = Some(line);
        }
    }

    Ok(games.into_iter().map(|(g, _, _)| g).collect())
}

/// One team record per side of every fully listed game.
#[must_use]
pub fn schedule_records(
    games: &[GameInfo],
    date: NaiveDate,
    source: &str,
    fetched_at: DateTime<Utc>,
) -> Vec<CanonicalRecord> {
    let mut out = Vec::with_capacity(games.len() * 2);
    for game in games {
        for side in [&game.home, &game.away].into_iter().flatten() {
            let mut stats = StatLine::new();
            if let Some(p) = side.points {
                stats.insert(StatKind::Points, p);
            }
            out.push(CanonicalRecord {
                entity_id: side.team_id.clone(),
                kind: EntityKind::Team,
                display_name: side.name.clone(),
                team_code: Some(side.code.clone()),
                stats,
                game: game.game_ref(date, &side.code),
                source: source.to_string(),
                fetched_at,
            });
        }
    }
    out
}

/// Team and player records from one traditional box score.
///
/// Players who did not play are skipped.
///
/// # Errors
/// Returns `MalformedResponse` when the player table is missing.
pub fn box_score_records(
    payload: &StatsPayload,
    game: &GameInfo,
    date: NaiveDate,
    source: &str,
    fetched_at: DateTime<Utc>,
) -> Result<Vec<CanonicalRecord>, SourceError> {
    let players = payload.result_set("PlayerStats")?;
    let mut out = Vec::new();

    if let Ok(teams) = payload.result_set("TeamStats") {
        for row in teams.rows() {
            let Some(code) = row.text("TEAM_ABBREVIATION") else {
                continue;
            };
            let name = [row.text("TEAM_CITY"), row.text("TEAM_NAME")]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            out.push(CanonicalRecord {
                entity_id: row.text("TEAM_ID").unwrap_or_else(|| code.clone()),
                kind: EntityKind::Team,
                display_name: if name.is_empty() { code.clone() } else { name },
                team_code: Some(code.clone()),
                stats: stat_line(&row, false),
                game: game.game_ref(date, &code),
                source: source.to_string(),
                fetched_at,
            });
        }
    }

    for row in players.rows() {
        let minutes = row.text("MIN");
        if did_not_play(minutes.as_deref()) {
            continue;
        }
        let (Some(name), Some(code)) = (row.text("PLAYER_NAME"), row.text("TEAM_ABBREVIATION"))
        else {
            continue;
        };
        out.push(CanonicalRecord {
            entity_id: row.text("PLAYER_ID").unwrap_or_else(|| name.clone()),
            kind: EntityKind::Player,
            display_name: name,
            team_code: Some(code.clone()),
            stats: stat_line(&row, true),
            game: game.game_ref(date, &code),
            source: source.to_string(),
            fetched_at,
        });
    }

    Ok(out)
}

fn stat_line(row: &Row<'_>, with_minutes: bool) -> StatLine {
    let mut stats: StatLine = STAT_COLUMNS
        .iter()
        .filter_map(|(col, kind)| row.decimal(col).map(|v| (*kind, v)))
        .collect();
    if with_minutes {
        if let Some(m) = row.text("MIN").as_deref().and_then(parse_minutes) {
            stats.insert(StatKind::Minutes, m);
        }
    }
    stats
}

/// Whether a `MIN` cell marks a player who did not take the floor.
#[must_use]
pub fn did_not_play(minutes: Option<&str>) -> bool {
    match minutes.map(str::trim) {
        None | Some("" | "0" | "0:00" | "0.0") => true,
        Some(m) => parse_minutes(m).is_some_and(|v| v.is_zero()),
    }
}

/// Parse `MM:SS` (minutes may carry a fractional part) or plain minutes.
///
/// The result is rounded to two decimal places.
#[must_use]
pub fn parse_minutes(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    let value = match raw.split_once(':') {
        Some((m, s)) => {
            let whole = Decimal::from_str(m.trim()).ok()?.trunc();
            let secs = Decimal::from_str(s.trim()).ok()?;
            whole + secs / Decimal::from(60)
        }
        None => Decimal::from_str(raw).ok()?,
    };
    (value >= Decimal::ZERO)
        .then(|| value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
