use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{CanonicalRecord, EntityKind, StatKind};

/// Upper bounds for single-game player stats.
///
/// Values above these are treated as upstream corruption rather than
/// historic performances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatBounds {
    max: BTreeMap<StatKind, Decimal>,
}

impl Default for StatBounds {
    fn default() -> Self {
        Self {
            max: BTreeMap::from([
                (StatKind::Points, Decimal::from(100)),
                (StatKind::Rebounds, Decimal::from(40)),
                (StatKind::Assists, Decimal::from(30)),
                (StatKind::Minutes, Decimal::from(70)),
            ]),
        }
    }
}

impl StatBounds {
    /// Check a record; returns the reason it is implausible.
    ///
    /// Negative values are rejected for every unsigned stat. Upper bounds only
    /// apply to players, since team totals routinely exceed them.
    ///
    /// # Errors
    /// Returns a human-readable description of the first failing check.
    pub fn check(&self, record: &CanonicalRecord) -> Result<(), String> {
        for (kind, value) in &record.stats {
            if value.is_sign_negative() && !value.is_zero() && !kind.is_signed() {
                return Err(format!("{kind:?} is negative ({value})"));
            }
            if record.kind == EntityKind::Player
                && let Some(max) = self.max.get(kind)
                && value > max
            {
                return Err(format!("{kind:?} {value} exceeds {max}"));
            }
        }
        Ok(())
    }
}
