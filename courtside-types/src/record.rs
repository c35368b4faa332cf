//! Canonical stat records shared by sources and the engine.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a record describes a team or a player.
///
/// Ordering puts teams before players so reconciled output lists each team
/// line ahead of its roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A franchise.
    Team,
    /// An individual player.
    Player,
}

/// Individual stat columns a source can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum StatKind {
    /// Points scored.
    Points,
    /// Total rebounds.
    Rebounds,
    /// Assists.
    Assists,
    /// Steals.
    Steals,
    /// Blocked shots.
    Blocks,
    /// Turnovers.
    Turnovers,
    /// Minutes played, fractional.
    Minutes,
    /// Field goals made.
    FieldGoalsMade,
    /// Field goals attempted.
    FieldGoalsAttempted,
    /// Three-pointers made.
    ThreePointersMade,
    /// Three-pointers attempted.
    ThreePointersAttempted,
    /// Free throws made.
    FreeThrowsMade,
    /// Free throws attempted.
    FreeThrowsAttempted,
    /// Point differential while on the floor.
    PlusMinus,
}

impl StatKind {
    /// Category used to pick the winning source for this stat.
    #[must_use]
    pub const fn category(self) -> StatCategory {
        match self {
            Self::Points
            | Self::FieldGoalsMade
            | Self::FieldGoalsAttempted
            | Self::ThreePointersMade
            | Self::ThreePointersAttempted
            | Self::FreeThrowsMade
            | Self::FreeThrowsAttempted => StatCategory::Scoring,
            Self::Rebounds => StatCategory::Rebounding,
            Self::Assists | Self::Turnovers => StatCategory::Playmaking,
            Self::Steals | Self::Blocks => StatCategory::Defense,
            Self::Minutes | Self::PlusMinus => StatCategory::Usage,
        }
    }

    /// Whether the stat may legitimately be negative.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::PlusMinus)
    }
}

/// Stat categories used for per-category source priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum StatCategory {
    /// Points and shooting splits.
    Scoring,
    /// Rebounds.
    Rebounding,
    /// Assists and turnovers.
    Playmaking,
    /// Steals and blocks.
    Defense,
    /// Minutes and plus/minus.
    Usage,
}

/// Map of stat values keyed by kind; absent keys mean "not reported".
pub type StatLine = BTreeMap<StatKind, Decimal>;

/// Side of the court for the game the record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeAway {
    /// Home team.
    Home,
    /// Visiting team.
    Away,
}

/// Game context of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRef {
    /// Calendar date of the game in US Eastern time.
    pub date: NaiveDate,
    /// Opponent team code, when known.
    pub opponent: Option<String>,
    /// Home/away side, when known.
    pub home_away: Option<HomeAway>,
    /// Source-native game identifier.
    pub game_id: Option<String>,
    /// Game status text (e.g. "Final", "7:30 pm ET").
    pub status: Option<String>,
}

impl GameRef {
    /// Game context with only a date.
    #[must_use]
    pub const fn on(date: NaiveDate) -> Self {
        Self {
            date,
            opponent: None,
            home_away: None,
            game_id: None,
            status: None,
        }
    }
}

/// One entity's line for one game, as produced by a source.
///
/// Records are never edited after creation; the engine derives re-keyed copies
/// with [`CanonicalRecord::rekeyed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Identifier; source-native until re-keyed to a canonical identity.
    pub entity_id: String,
    /// Team or player.
    pub kind: EntityKind,
    /// Name as displayed by the producing source.
    pub display_name: String,
    /// Team code the entity plays for (for teams, their own code).
    pub team_code: Option<String>,
    /// Reported stats.
    pub stats: StatLine,
    /// Game context.
    pub game: GameRef,
    /// Name of the producing source.
    pub source: String,
    /// When the source delivered the record.
    pub fetched_at: DateTime<Utc>,
}

impl CanonicalRecord {
    /// Copy of this record carrying a canonical entity id and team code.
    #[must_use]
    pub fn rekeyed(&self, entity_id: &str, team_code: Option<&str>) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            team_code: team_code.map(str::to_string).or_else(|| self.team_code.clone()),
            ..self.clone()
        }
    }

    /// Value of a stat, if reported.
    #[must_use]
    pub fn stat(&self, kind: StatKind) -> Option<Decimal> {
        self.stats.get(&kind).copied()
    }
}
