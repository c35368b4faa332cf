//! Wall-clock budget for a single engine call.
//!
//! A [`Budget`] fixes the deadline `D = start + window` when a request begins.
//! Before a source is scheduled, [`Budget::allocate`] compares the source's
//! declared [`SourceCost`] against the time left until `D` and decides whether
//! it may run in full, run truncated, or must be skipped. Sources that are
//! scheduled are still bounded by `D` at the call site, so nothing the engine
//! awaits can outlive the deadline.

use std::time::Duration;

use tokio::time::Instant;

use crate::BudgetConfig;
use crate::source::SourceCost;

/// Scheduling decision for one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// The full expected fetch fits; carries the expected item count.
    Full(usize),
    /// Only this many items fit.
    Truncated(usize),
    /// Not even one item fits.
    Skip,
}

impl Allocation {
    /// Item limit to hand to the source; `None` means unlimited.
    #[must_use]
    pub const fn item_limit(self) -> Option<usize> {
        match self {
            Self::Full(_) | Self::Skip => None,
            Self::Truncated(k) => Some(k),
        }
    }

    /// True when the source must not be called.
    #[must_use]
    pub const fn is_skip(self) -> bool {
        matches!(self, Self::Skip)
    }

    /// True when the source was cut short.
    #[must_use]
    pub const fn is_truncated(self) -> bool {
        matches!(self, Self::Truncated(_))
    }
}

/// Deadline tracker for one request.
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    started: Instant,
    deadline: Instant,
}

impl Budget {
    /// Start the clock now.
    #[must_use]
    pub fn start(cfg: &BudgetConfig) -> Self {
        let started = Instant::now();
        Self {
            started,
            deadline: started + cfg.window(),
        }
    }

    /// Absolute deadline `D`.
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left until `D`, zero once it has passed.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Whole milliseconds left until `D`.
    #[must_use]
    pub fn remaining_ms(&self) -> u64 {
        u64::try_from(self.remaining().as_millis()).unwrap_or(u64::MAX)
    }

    /// Whole milliseconds spent since the request started.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Budget ending `reserve` before this one, for a source that still has
    /// fallbacks queued behind it. Never ends before now.
    #[must_use]
    pub fn reserving(&self, reserve: Duration) -> Self {
        let now = Instant::now();
        let deadline = self
            .deadline
            .checked_sub(reserve)
            .map_or(now, |d| d.max(now));
        Self {
            started: self.started,
            deadline,
        }
    }

    /// Decide how much of `cost` fits in the remaining time.
    #[must_use]
    pub fn allocate(&self, cost: &SourceCost, allow_partial: bool) -> Allocation {
        allocate_within(self.remaining(), cost, allow_partial)
    }
}

/// Decide how much of `cost` fits in `available`.
///
/// - `available >= fixed + n·per_item` → `Full(n)`
/// - otherwise, when partial results are acceptable and at least one item fits
///   after the fixed cost → `Truncated(k)` with `k = floor((available - fixed) / per_item)`
/// - otherwise → `Skip`
#[must_use]
pub fn allocate_within(available: Duration, cost: &SourceCost, allow_partial: bool) -> Allocation {
    if cost.total() <= available {
        return Allocation::Full(cost.expected_items);
    }
    if !allow_partial || cost.per_item.is_zero() || cost.fixed >= available {
        return Allocation::Skip;
    }
    let spare = available - cost.fixed;
    let fits = spare.as_nanos() / cost.per_item.as_nanos();
    let fits = usize::try_from(fits)
        .unwrap_or(usize::MAX)
        .min(cost.expected_items);
    if fits >= 1 {
        Allocation::Truncated(fits)
    } else {
        Allocation::Skip
    }
}
