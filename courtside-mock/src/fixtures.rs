//! Static slate for 2024-01-15, spelled two ways.
//!
//! The stats-style spelling uses league abbreviations and full player names;
//! the scoreboard-style spelling uses ESPN abbreviations (`GS`, `NY`) and
//! initialled names (`"L. James"`). A few lines differ slightly between the two
//! so per-category priority is observable.

use chrono::{NaiveDate, Utc};
use courtside_core::{
    CanonicalRecord, EntityKind, FetchRequest, GameRef, HomeAway, StatKind, StatLine,
};
use rust_decimal::Decimal;

/// Spelling convention of a fixture source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// League stats naming.
    Stats,
    /// Scoreboard naming.
    Scoreboard,
}

struct Game {
    id: &'static str,
    home: (&'static str, &'static str, &'static str),
    away: (&'static str, &'static str, &'static str),
    home_pts: i64,
    away_pts: i64,
}

struct Line {
    game: &'static str,
    team: &'static str,
    full: &'static str,
    short: &'static str,
    // pts, reb, ast, stl, blk, tov, min
    stats: [i64; 7],
    scoreboard_reb: Option<i64>,
}

// (stats code, scoreboard code, full name)
const GAMES: [Game; 2] = [
    Game {
        id: "0022300571",
        home: ("BOS", "BOS", "Boston Celtics"),
        away: ("LAL", "LAL", "Los Angeles Lakers"),
        home_pts: 114,
        away_pts: 105,
    },
    Game {
        id: "0022300572",
        home: ("NYK", "NY", "New York Knicks"),
        away: ("GSW", "GS", "Golden State Warriors"),
        home_pts: 118,
        away_pts: 110,
    },
];

const LINES: [Line; 8] = [
    line("0022300571", "LAL", "LeBron James", "L. James", [25, 8, 9, 1, 1, 3, 36], Some(9)),
    line("0022300571", "LAL", "Anthony Davis", "A. Davis", [28, 13, 3, 2, 3, 2, 38], None),
    line("0022300571", "BOS", "Jayson Tatum", "J. Tatum", [32, 9, 4, 1, 0, 2, 37], None),
    line("0022300571", "BOS", "Jaylen Brown", "J. Brown", [22, 6, 3, 1, 1, 3, 35], None),
    line("0022300572", "GSW", "Stephen Curry", "S. Curry", [30, 4, 6, 2, 0, 4, 35], Some(5)),
    line("0022300572", "GSW", "Klay Thompson", "K. Thompson", [18, 3, 2, 0, 0, 1, 30], None),
    line("0022300572", "NYK", "Jalen Brunson", "J. Brunson", [34, 3, 7, 1, 0, 2, 38], None),
    line("0022300572", "NYK", "Julius Randle", "J. Randle", [24, 11, 5, 0, 1, 3, 36], None),
];

const fn line(
    game: &'static str,
    team: &'static str,
    full: &'static str,
    short: &'static str,
    stats: [i64; 7],
    scoreboard_reb: Option<i64>,
) -> Line {
    Line {
        game,
        team,
        full,
        short,
        stats,
        scoreboard_reb,
    }
}

/// The date the fixtures describe.
pub fn slate_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default()
}

/// The day after the slate: a valid date with no games.
pub fn off_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 16).unwrap_or_default()
}

fn code(style: Style, side: (&str, &str, &str)) -> String {
    match style {
        Style::Stats => side.0.to_string(),
        Style::Scoreboard => side.1.to_string(),
    }
}

fn game_ref(date: NaiveDate, game: &Game, home: bool, style: Style) -> GameRef {
    let opponent = if home { game.away } else { game.home };
    GameRef {
        date,
        opponent: Some(code(style, opponent)),
        home_away: Some(if home { HomeAway::Home } else { HomeAway::Away }),
        game_id: Some(game.id.to_string()),
        status: Some("Final".to_string()),
    }
}

fn admits(req: &FetchRequest, game: &Game) -> bool {
    req.admits(&[game.home.0, game.away.0, game.home.1, game.away.1])
}

fn team_records(source: &str, req: &FetchRequest, style: Style) -> Vec<CanonicalRecord> {
    let mut out = Vec::new();
    for game in &GAMES {
        if !admits(req, game) {
            continue;
        }
        let sides = [
            (game.home, game.home_pts, true),
            (game.away, game.away_pts, false),
        ];
        for (side, pts, home) in sides {
            let abbr = code(style, side);
            out.push(CanonicalRecord {
                entity_id: abbr.clone(),
                kind: EntityKind::Team,
                display_name: side.2.to_string(),
                team_code: Some(abbr),
                stats: StatLine::from([(StatKind::Points, Decimal::from(pts))]),
                game: game_ref(req.date, game, home, style),
                source: source.to_string(),
                fetched_at: Utc::now(),
            });
        }
    }
    out
}

/// Team score records for `date`; empty off the slate.
pub fn schedule(source: &str, req: &FetchRequest, style: Style) -> Vec<CanonicalRecord> {
    if req.date != slate_date() {
        return Vec::new();
    }
    team_records(source, req, style)
}

/// Team and player lines for `date`; empty off the slate.
pub fn box_scores(source: &str, req: &FetchRequest, style: Style) -> Vec<CanonicalRecord> {
    if req.date != slate_date() {
        return Vec::new();
    }
    let mut out = team_records(source, req, style);
    for l in &LINES {
        let Some(game) = GAMES.iter().find(|g| g.id == l.game) else {
            continue;
        };
        let (own, home) = if game.home.0 == l.team {
            (game.home, true)
        } else {
            (game.away, false)
        };
        if !admits(req, game) {
            continue;
        }
        let [pts, reb, ast, stl, blk, tov, min] = l.stats;
        let reb = match style {
            Style::Stats => reb,
            Style::Scoreboard => l.scoreboard_reb.unwrap_or(reb),
        };
        let stats = StatLine::from([
            (StatKind::Points, Decimal::from(pts)),
            (StatKind::Rebounds, Decimal::from(reb)),
            (StatKind::Assists, Decimal::from(ast)),
            (StatKind::Steals, Decimal::from(stl)),
            (StatKind::Blocks, Decimal::from(blk)),
            (StatKind::Turnovers, Decimal::from(tov)),
            (StatKind::Minutes, Decimal::from(min)),
        ]);
        let name = match style {
            Style::Stats => l.full,
            Style::Scoreboard => l.short,
        };
        out.push(CanonicalRecord {
            entity_id: format!(
                "{}-{}",
                l.team,
                name.to_ascii_lowercase().replace(['.', ' '], "")
            ),
            kind: EntityKind::Player,
            display_name: name.to_string(),
            team_code: Some(code(style, own)),
            stats,
            game: game_ref(req.date, game, home, style),
            source: source.to_string(),
            fetched_at: Utc::now(),
        });
    }
    out
}
