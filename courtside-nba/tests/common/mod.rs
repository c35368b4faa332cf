#![allow(dead_code)]

use courtside_nba::payload::StatsPayload;
use serde_json::{Value, json};

pub const BOS_LAL: &str = "0022300571";
pub const NYK_GSW: &str = "0022300572";

pub fn scoreboard_json() -> Value {
    json!({
        "resource": "scoreboard",
        "resultSets": [
            {
                "name": "GameHeader",
                "headers": ["GAME_DATE_EST", "GAME_ID", "GAME_STATUS_TEXT", "HOME_TEAM_ID", "VISITOR_TEAM_ID"],
                "rowSet": [
                    ["2024-01-15T00:00:00", BOS_LAL, "Final", 1610612738, 1610612747],
                    ["2024-01-15T00:00:00", NYK_GSW, "Final", 1610612752, 1610612744]
                ]
            },
            {
                "name": "LineScore",
                "headers": ["GAME_ID", "TEAM_ID", "TEAM_ABBREVIATION", "TEAM_CITY_NAME", "TEAM_NAME", "PTS"],
                "rowSet": [
                    [BOS_LAL, 1610612747, "LAL", "Los Angeles", "Lakers", 105],
                    [BOS_LAL, 1610612738, "BOS", "Boston", "Celtics", 114],
                    [NYK_GSW, 1610612744, "GSW", "Golden State", "Warriors", 110],
                    [NYK_GSW, 1610612752, "NYK", "New York", "Knicks", 118]
                ]
            }
        ]
    })
}

pub fn scoreboard() -> StatsPayload {
    serde_json::from_value(scoreboard_json()).unwrap()
}

pub fn empty_scoreboard() -> StatsPayload {
    serde_json::from_value(json!({
        "resultSets": [
            {"name": "GameHeader", "headers": ["GAME_ID"], "rowSet": []},
            {"name": "LineScore", "headers": ["GAME_ID"], "rowSet": []}
        ]
    }))
    .unwrap()
}

const PLAYER_HEADERS: [&str; 14] = [
    "GAME_ID", "TEAM_ID", "TEAM_ABBREVIATION", "PLAYER_ID", "PLAYER_NAME", "MIN", "FGM", "FGA",
    "REB", "AST", "STL", "BLK", "TO", "PTS",
];

pub fn box_score_json(game_id: &str) -> Value {
    let (players, teams) = if game_id == BOS_LAL {
        (
            json!([
                [game_id, 1610612747, "LAL", 2544, "LeBron James", "35:12", 10, 20, 8, 7, 1, 1, 3, 25],
                [game_id, 1610612747, "LAL", 1641733, "Bronny James", null, null, null, null, null, null, null, null, null],
                [game_id, 1610612738, "BOS", 1628369, "Jayson Tatum", "38.000000:30", 11, 22, 9, 4, 1, 0, 2, 31]
            ]),
            json!([
                [game_id, 1610612747, "Lakers", "LAL", "Los Angeles", 105],
                [game_id, 1610612738, "Celtics", "BOS", "Boston", 114]
            ]),
        )
    } else {
        (
            json!([
                [game_id, 1610612744, "GSW", 201939, "Stephen Curry", "36:00", 11, 23, 4, 6, 2, 0, 3, 30],
                [game_id, 1610612752, "NYK", 1628973, "Jalen Brunson", "37:45", 12, 24, 3, 8, 1, 0, 2, 33]
            ]),
            json!([
                [game_id, 1610612744, "Warriors", "GSW", "Golden State", 110],
                [game_id, 1610612752, "Knicks", "NYK", "New York", 118]
            ]),
        )
    };
    json!({
        "resultSets": [
            {"name": "PlayerStats", "headers": PLAYER_HEADERS, "rowSet": players},
            {
                "name": "TeamStats",
                "headers": ["GAME_ID", "TEAM_ID", "TEAM_NAME", "TEAM_ABBREVIATION", "TEAM_CITY", "PTS"],
                "rowSet": teams
            }
        ]
    })
}

pub fn box_score(game_id: &str) -> StatsPayload {
    serde_json::from_value(box_score_json(game_id)).unwrap()
}
