//! Stat-line thresholds for picking standout player performances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::{StatKind, StatLine};

/// How several thresholds combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdLogic {
    /// A line qualifies when it meets any threshold.
    #[default]
    Any,
    /// A line qualifies only when it meets every threshold.
    All,
}

/// Minimum points, assists or rebounds a player line must reach.
///
/// Only the thresholds that are set take part. With none set, a line
/// qualifies at 20 points, 5 assists or 7 rebounds, whatever `logic` says.
/// A stat missing from the line counts as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatThresholds {
    /// Minimum points.
    pub points: Option<Decimal>,
    /// Minimum assists.
    pub assists: Option<Decimal>,
    /// Minimum rebounds.
    pub rebounds: Option<Decimal>,
    /// How the set thresholds combine.
    pub logic: ThresholdLogic,
}

impl StatThresholds {
    /// No explicit thresholds: the 20 / 5 / 7 standout rule.
    #[must_use]
    pub fn standout() -> Self {
        Self::default()
    }

    /// Require at least `points` points.
    #[must_use]
    pub fn points(mut self, points: i64) -> Self {
        self.points = Some(Decimal::from(points));
        self
    }

    /// Require at least `assists` assists.
    #[must_use]
    pub fn assists(mut self, assists: i64) -> Self {
        self.assists = Some(Decimal::from(assists));
        self
    }

    /// Require at least `rebounds` rebounds.
    #[must_use]
    pub fn rebounds(mut self, rebounds: i64) -> Self {
        self.rebounds = Some(Decimal::from(rebounds));
        self
    }

    /// Combine the set thresholds with `logic`.
    #[must_use]
    pub const fn logic(mut self, logic: ThresholdLogic) -> Self {
        self.logic = logic;
        self
    }

    /// Whether `stats` meets the thresholds.
    #[must_use]
    pub fn qualifies(&self, stats: &StatLine) -> bool {
        let value = |kind: StatKind| stats.get(&kind).copied().unwrap_or(Decimal::ZERO);
        let checks: Vec<bool> = [
            (StatKind::Points, self.points),
            (StatKind::Assists, self.assists),
            (StatKind::Rebounds, self.rebounds),
        ]
        .into_iter()
        .filter_map(|(kind, min)| min.map(|m| value(kind) >= m))
        .collect();

        if checks.is_empty() {
            return value(StatKind::Points) >= Decimal::from(20)
                || value(StatKind::Assists) >= Decimal::from(5)
                || value(StatKind::Rebounds) >= Decimal::from(7);
        }
        match self.logic {
            ThresholdLogic::Any => checks.into_iter().any(|c| c),
            ThresholdLogic::All => checks.into_iter().all(|c| c),
        }
    }
}
