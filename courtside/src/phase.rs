//! Reconciliation pass lifecycle as a pure transition function.
//!
//! ```text
//! Idle -> FetchingPrimary -> FetchingFallback? -> Joining -> Merging? -> Done
//! ```
//!
//! The engine feeds events in as fetches complete; the phase decides whether
//! fallback sources are consulted. Under `CrossCheck` the fallback fetch is
//! already in flight alongside the primary, and `FetchingFallback` only waits
//! for it to settle.

use courtside_core::FallbackPolicy;

/// Where a reconciliation pass currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePhase {
    /// Nothing started.
    Idle,
    /// Waiting for the primary source.
    FetchingPrimary,
    /// Waiting for fallback sources.
    FetchingFallback,
    /// Resolving identities and joining records across sources.
    Joining,
    /// Merging reconciled records with a fantasy roster.
    Merging,
    /// Finished.
    Done,
}

/// How the primary fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryOutcome {
    /// Records arrived.
    Records,
    /// The source answered with nothing.
    Empty,
    /// Failure, timeout, rate limit, or skipped for lack of budget.
    Failed,
}

/// Input to [`ReconcilePhase::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// The pass begins.
    Begin,
    /// The primary fetch settled.
    PrimaryDone(PrimaryOutcome),
    /// Every fallback fetch settled.
    FallbackDone,
    /// The join finished.
    Joined,
    /// The fantasy merge finished.
    Merged,
}

/// Static facts about a pass that steer its transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassPlan {
    /// Fallback policy for the capability.
    pub policy: FallbackPolicy,
    /// Whether any fallback source is available.
    pub has_fallback: bool,
    /// Whether a fantasy merge follows the join.
    pub merge: bool,
}

impl PassPlan {
    /// Whether fallback sources are consulted after the primary ended with `outcome`.
    #[must_use]
    pub fn wants_fallback(&self, outcome: PrimaryOutcome) -> bool {
        if !self.has_fallback {
            return false;
        }
        match self.policy {
            FallbackPolicy::CrossCheck => true,
            FallbackPolicy::OnFailure => outcome == PrimaryOutcome::Failed,
            FallbackPolicy::OnFailureOrEmpty => outcome != PrimaryOutcome::Records,
            _ => false,
        }
    }
}

impl ReconcilePhase {
    /// Transition on `event`. Events that do not apply to the current phase
    /// leave it unchanged.
    #[must_use]
    pub fn next(self, event: PhaseEvent, plan: &PassPlan) -> Self {
        match (self, event) {
            (Self::Idle, PhaseEvent::Begin) => Self::FetchingPrimary,
            (Self::FetchingPrimary, PhaseEvent::PrimaryDone(outcome)) => {
                if plan.wants_fallback(outcome) {
                    Self::FetchingFallback
                } else {
                    Self::Joining
                }
            }
            (Self::FetchingFallback, PhaseEvent::FallbackDone) => Self::Joining,
            (Self::Joining, PhaseEvent::Joined) => {
                if plan.merge {
                    Self::Merging
                } else {
                    Self::Done
                }
            }
            (Self::Merging, PhaseEvent::Merged) => Self::Done,
            (phase, _) => phase,
        }
    }

    /// Whether the pass is over.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// A phase bound to its plan, advanced by the engine as events happen.
#[derive(Debug, Clone, Copy)]
pub struct PhaseTracker {
    plan: PassPlan,
    phase: ReconcilePhase,
}

impl PhaseTracker {
    /// Start in [`ReconcilePhase::Idle`].
    #[must_use]
    pub const fn new(plan: PassPlan) -> Self {
        Self {
            plan,
            phase: ReconcilePhase::Idle,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> ReconcilePhase {
        self.phase
    }

    /// Apply `event` and return the phase it leads to.
    pub fn advance(&mut self, event: PhaseEvent) -> ReconcilePhase {
        let next = self.phase.next(event, &self.plan);
        #[cfg(feature = "tracing")]
        if next != self.phase {
            tracing::debug!(from = ?self.phase, to = ?next, "courtside: phase");
        }
        self.phase = next;
        next
    }
}
