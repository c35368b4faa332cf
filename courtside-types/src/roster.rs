use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slot of a fantasy team's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasyRosterEntry {
    /// League-scoped fantasy team identifier.
    pub team_id: String,
    /// Fantasy team display name.
    #[serde(default)]
    pub team_name: Option<String>,
    /// Player name as spelled by the fantasy platform.
    pub player_alias: String,
    /// Lineup slot or eligible position (e.g. "PG", "UTIL", "BE").
    pub position_slot: String,
    /// Whether the fantasy platform lists the player as injured.
    pub injury_flag: bool,
    /// Platform injury designation (e.g. "OUT", "DAY_TO_DAY").
    #[serde(default)]
    pub injury_status: Option<String>,
    /// Professional team code as listed by the fantasy platform.
    #[serde(default)]
    pub pro_team: Option<String>,
    /// Season average fantasy points.
    #[serde(default)]
    pub avg_points: Option<Decimal>,
}

/// League-wide roster snapshot as synced from the fantasy platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RosterSnapshot {
    /// All roster slots across all fantasy teams.
    pub entries: Vec<FantasyRosterEntry>,
    /// When the snapshot was taken.
    #[serde(default)]
    pub synced_at: Option<DateTime<Utc>>,
}

impl RosterSnapshot {
    /// Build a snapshot from entries with no sync timestamp.
    #[must_use]
    pub const fn new(entries: Vec<FantasyRosterEntry>) -> Self {
        Self {
            entries,
            synced_at: None,
        }
    }
}
