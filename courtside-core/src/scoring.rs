use rust_decimal::{Decimal, RoundingStrategy};

use crate::{ScoringWeights, StatLine};

/// Fantasy points for a stat line: `Σ weight(stat) × value`, rounded to two decimals.
///
/// Stats without a weight, and weights without a reported stat, contribute nothing.
#[must_use]
pub fn fantasy_points(stats: &StatLine, weights: &ScoringWeights) -> Decimal {
    let total: Decimal = weights
        .weights
        .iter()
        .filter_map(|(kind, weight)| stats.get(kind).map(|v| *v * *weight))
        .sum();
    total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
