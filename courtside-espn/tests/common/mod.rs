#![allow(dead_code)]

use courtside_espn::payload::{ScoreboardPayload, SummaryPayload};
use serde_json::{Value, json};

pub const BOS_LAL: &str = "401585183";
pub const NY_GS: &str = "401585184";
pub const NEXT_DAY: &str = "401585190";

fn competitor(home_away: &str, id: &str, abbr: &str, name: &str, score: &str) -> Value {
    json!({
        "homeAway": home_away,
        "score": score,
        "team": {"id": id, "abbreviation": abbr, "displayName": name}
    })
}

fn event(id: &str, date: &str, home: Value, away: Value) -> Value {
    json!({
        "id": id,
        "date": date,
        "competitions": [{
            "competitors": [home, away],
            "status": {"type": {"description": "Final", "completed": true}}
        }]
    })
}

pub fn scoreboard_json() -> Value {
    json!({
        "events": [
            event(
                BOS_LAL,
                "2024-01-16T00:30Z",
                competitor("home", "2", "BOS", "Boston Celtics", "114"),
                competitor("away", "13", "LAL", "Los Angeles Lakers", "105"),
            ),
            event(
                NY_GS,
                "2024-01-16T03:00Z",
                competitor("home", "18", "NY", "New York Knicks", "118"),
                competitor("away", "9", "GS", "Golden State Warriors", "110"),
            ),
            // tips off on the next Eastern day
            event(
                NEXT_DAY,
                "2024-01-17T00:00Z",
                competitor("home", "20", "PHI", "Philadelphia 76ers", "0"),
                competitor("away", "5", "CLE", "Cleveland Cavaliers", "0"),
            ),
        ]
    })
}

pub fn scoreboard() -> ScoreboardPayload {
    serde_json::from_value(scoreboard_json()).unwrap()
}

const LABELS: [&str; 8] = ["MIN", "FG", "3PT", "FT", "REB", "AST", "+/-", "PTS"];

fn athlete(id: &str, name: &str, stats: &[&str]) -> Value {
    json!({
        "athlete": {"id": id, "displayName": name},
        "stats": stats,
        "didNotPlay": false
    })
}

fn bench(id: &str, name: &str) -> Value {
    json!({
        "athlete": {"id": id, "displayName": name},
        "stats": [],
        "didNotPlay": true
    })
}

fn team_table(abbr: &str, athletes: Vec<Value>) -> Value {
    json!({
        "team": {"abbreviation": abbr},
        "statistics": [{"labels": LABELS, "athletes": athletes}]
    })
}

pub fn summary_json(event_id: &str) -> Value {
    let players = if event_id == BOS_LAL {
        vec![
            team_table(
                "LAL",
                vec![
                    athlete("1966", "LeBron James", &["35", "10-20", "2-6", "3-4", "9", "7", "-6", "25"]),
                    bench("5105565", "Bronny James"),
                ],
            ),
            team_table(
                "BOS",
                vec![athlete("4065648", "Jayson Tatum", &["38", "11-22", "4-9", "5-5", "9", "4", "+9", "31"])],
            ),
        ]
    } else {
        vec![
            team_table(
                "GS",
                vec![athlete("3975", "Stephen Curry", &["36", "11-23", "5-12", "3-3", "5", "6", "-4", "30"])],
            ),
            team_table(
                "NY",
                vec![athlete("3934672", "Jalen Brunson", &["37", "12-24", "3-7", "6-7", "3", "8", "+8", "33"])],
            ),
        ]
    };
    json!({"boxscore": {"players": players}})
}

pub fn summary(event_id: &str) -> SummaryPayload {
    serde_json::from_value(summary_json(event_id)).unwrap()
}
