//! Wire format of the site API scoreboard and game summary.
//!
//! Only the fields the source reads are modeled; everything else is ignored.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// `scoreboard?dates=YYYYMMDD` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreboardPayload {
    /// Games on the requested day.
    #[serde(default)]
    pub events: Vec<Event>,
}

/// One game.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    /// Event id, used for the summary call.
    pub id: String,
    /// Tip-off time in UTC (e.g. `"2024-01-16T00:30Z"`).
    #[serde(default)]
    pub date: Option<String>,
    /// Competitions; NBA events carry exactly one.
    #[serde(default)]
    pub competitions: Vec<Competition>,
    /// Event-level status.
    #[serde(default)]
    pub status: Option<Status>,
}

/// Competition inside an event.
#[derive(Debug, Clone, Deserialize)]
pub struct Competition {
    /// Both sides.
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    /// Competition-level status.
    #[serde(default)]
    pub status: Option<Status>,
}

/// One side of a competition.
#[derive(Debug, Clone, Deserialize)]
pub struct Competitor {
    /// `"home"` or `"away"`.
    #[serde(rename = "homeAway", default)]
    pub home_away: Option<String>,
    /// Score; sent as a string, occasionally as a number.
    #[serde(default)]
    pub score: Option<Value>,
    /// Team.
    pub team: Team,
}

/// Team reference.
#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    /// Numeric id as text.
    #[serde(default)]
    pub id: Option<String>,
    /// Abbreviation (e.g. `"GS"`).
    pub abbreviation: String,
    /// Full name (e.g. `"Golden State Warriors"`).
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

/// Game status wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    /// Status detail.
    #[serde(rename = "type", default)]
    pub kind: Option<StatusType>,
}

/// Game status detail.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusType {
    /// Text such as `"Final"` or `"Scheduled"`.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the game is over.
    #[serde(default)]
    pub completed: bool,
}

/// `summary?event=ID` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryPayload {
    /// Box score section; absent before tip-off.
    #[serde(default)]
    pub boxscore: Option<BoxScore>,
}

/// Box score section of a summary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoxScore {
    /// Player tables, one per team.
    #[serde(default)]
    pub players: Vec<TeamPlayers>,
}

/// One team's player tables.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamPlayers {
    /// Team the players belong to.
    pub team: Team,
    /// Stat tables; the first carries the traditional columns.
    #[serde(default)]
    pub statistics: Vec<StatTable>,
}

/// Column labels plus one string row per athlete.
#[derive(Debug, Clone, Deserialize)]
pub struct StatTable {
    /// Display labels (e.g. `"MIN"`, `"FG"`, `"3PT"`).
    #[serde(default)]
    pub labels: Vec<String>,
    /// Column names, used when labels are absent.
    #[serde(default)]
    pub names: Vec<String>,
    /// Rows.
    #[serde(default)]
    pub athletes: Vec<AthleteLine>,
}

impl StatTable {
    /// Column headers: labels when present, names otherwise.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        if self.labels.is_empty() {
            &self.names
        } else {
            &self.labels
        }
    }
}

/// One athlete's row.
#[derive(Debug, Clone, Deserialize)]
pub struct AthleteLine {
    /// Who.
    pub athlete: Athlete,
    /// Values aligned with the table's columns.
    #[serde(default)]
    pub stats: Vec<String>,
    /// Set for players who stayed on the bench.
    #[serde(rename = "didNotPlay", default)]
    pub did_not_play: bool,
}

/// Athlete reference.
#[derive(Debug, Clone, Deserialize)]
pub struct Athlete {
    /// Numeric id as text.
    #[serde(default)]
    pub id: Option<String>,
    /// Full name.
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl Event {
    /// Tip-off time, when parseable.
    #[must_use]
    pub fn tip_off(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
            .map(|n| n.and_utc())
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|d| d.with_timezone(&Utc))
            })
    }

    /// Status text, preferring the competition's.
    #[must_use]
    pub fn status_text(&self) -> Option<String> {
        self.competitions
            .first()
            .and_then(|c| c.status.as_ref())
            .or(self.status.as_ref())
            .and_then(|s| s.kind.as_ref())
            .and_then(|k| k.description.clone())
    }

    /// Competitors of the first competition.
    #[must_use]
    pub fn competitors(&self) -> &[Competitor] {
        self.competitions
            .first()
            .map(|c| c.competitors.as_slice())
            .unwrap_or_default()
    }
}
