use std::collections::HashSet;
use std::sync::Arc;

use courtside_core::{
    Budget, CanonicalRecord, Capability, FetchRequest, ReconcileError, SourceError, StatsSource,
    TimeoutReason,
};

use crate::phase::PrimaryOutcome;

/// How one source fetch ended.
pub(crate) enum FetchOutcome {
    Records {
        records: Vec<CanonicalRecord>,
        truncated: bool,
    },
    Empty,
    Failed(ReconcileError),
}

impl FetchOutcome {
    pub(crate) const fn primary_outcome(&self) -> PrimaryOutcome {
        match self {
            Self::Records { .. } => PrimaryOutcome::Records,
            Self::Empty => PrimaryOutcome::Empty,
            Self::Failed(_) => PrimaryOutcome::Failed,
        }
    }
}

pub(crate) struct Fetched {
    pub(crate) source: &'static str,
    pub(crate) outcome: FetchOutcome,
}

impl Fetched {
    /// Records and whether they were truncated; failures are moved into `errors`.
    pub(crate) fn into_records(
        self,
        errors: &mut Vec<ReconcileError>,
    ) -> Option<(Vec<CanonicalRecord>, bool)> {
        match self.outcome {
            FetchOutcome::Records { records, truncated } => Some((records, truncated)),
            FetchOutcome::Empty => None,
            FetchOutcome::Failed(e) => {
                errors.push(e);
                None
            }
        }
    }
}

async fn call(
    source: &dyn StatsSource,
    capability: Capability,
    req: &FetchRequest,
) -> Result<Vec<CanonicalRecord>, SourceError> {
    match capability {
        Capability::BoxScores => match source.as_box_score_provider() {
            Some(p) => p.box_scores(req).await,
            None => Err(SourceError::EmptyButValid),
        },
        Capability::Schedule => match source.as_schedule_provider() {
            Some(p) => p.schedule(req).await,
            None => Err(SourceError::EmptyButValid),
        },
        _ => Err(SourceError::EmptyButValid),
    }
}

/// Whether a source handed `limit` games actually used all of them. Records
/// without a game id count as a cut.
fn reached_limit(records: &[CanonicalRecord], limit: usize) -> bool {
    let mut games = HashSet::new();
    for r in records {
        match r.game.game_id.as_deref() {
            Some(id) => {
                games.insert(id);
            }
            None => return true,
        }
    }
    games.len() >= limit
}

/// Fetch `capability` from one source inside the pass budget.
///
/// The source's declared cost is checked against the remaining time first; a
/// source that cannot fit is never called. A scheduled call is abandoned at the
/// pass deadline.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "courtside::router::fetch_one",
        skip(source, req, budget),
        fields(source = source.name(), capability = %capability),
    )
)]
pub(crate) async fn fetch_one(
    source: &Arc<dyn StatsSource>,
    capability: Capability,
    req: &FetchRequest,
    budget: &Budget,
    allow_partial: bool,
) -> Fetched {
    let name = source.name();
    let budget_ms = budget.remaining_ms();
    let cost = source.cost(capability, req);
    let allocation = budget.allocate(&cost, allow_partial);
    if allocation.is_skip() {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            source = name,
            budget_ms,
            cost_ms = u64::try_from(cost.total().as_millis()).unwrap_or(u64::MAX),
            "courtside: source skipped, cost exceeds remaining budget"
        );
        return Fetched {
            source: name,
            outcome: FetchOutcome::Failed(ReconcileError::timeout(
                name,
                budget_ms,
                TimeoutReason::Budget,
            )),
        };
    }

    let req = req.clone().with_item_limit(allocation.item_limit());
    let result =
        tokio::time::timeout_at(budget.deadline(), call(source.as_ref(), capability, &req)).await;

    let outcome = match result {
        Err(_) => FetchOutcome::Failed(ReconcileError::timeout(
            name,
            budget_ms,
            TimeoutReason::Deadline,
        )),
        Ok(Ok(records)) if records.is_empty() => FetchOutcome::Empty,
        Ok(Ok(records)) => FetchOutcome::Records {
            truncated: allocation
                .item_limit()
                .is_some_and(|limit| reached_limit(&records, limit)),
            records,
        },
        Ok(Err(SourceError::EmptyButValid)) => FetchOutcome::Empty,
        Ok(Err(SourceError::Timeout)) => FetchOutcome::Failed(ReconcileError::timeout(
            name,
            budget_ms,
            TimeoutReason::Upstream,
        )),
        Ok(Err(e)) => FetchOutcome::Failed(ReconcileError::unavailable(name, e)),
    };

    #[cfg(feature = "tracing")]
    if let FetchOutcome::Failed(e) = &outcome {
        tracing::warn!(source = name, error = %e, "courtside: source failed");
    }

    Fetched {
        source: name,
        outcome,
    }
}
