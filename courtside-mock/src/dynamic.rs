use std::collections::HashMap;
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use courtside_core::{
    BoxScoreProvider, CanonicalRecord, Capability, FetchRequest, ScheduleProvider, SourceCost,
    SourceError, StatsSource,
};

/// Instruction for how a capability should behave.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after a delay.
    Delay(Duration, T),
    /// Fail immediately with the provided error.
    Fail(SourceError),
    /// Hang indefinitely (simulate a stalled upstream).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<Capability, MockBehavior<Vec<CanonicalRecord>>>,
    requests: HashMap<Capability, Vec<FetchRequest>>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    cost: Arc<std::sync::Mutex<SourceCost>>,
}

impl DynamicMockController {
    /// Set the behavior for `box_scores` calls.
    pub async fn set_box_score_behavior(&self, behavior: MockBehavior<Vec<CanonicalRecord>>) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(Capability::BoxScores, behavior);
    }

    /// Set the behavior for `schedule` calls.
    pub async fn set_schedule_behavior(&self, behavior: MockBehavior<Vec<CanonicalRecord>>) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(Capability::Schedule, behavior);
    }

    /// Set the cost the source declares to the budget controller.
    pub fn set_cost(&self, cost: SourceCost) {
        *self.cost.lock().unwrap_or_else(PoisonError::into_inner) = cost;
    }

    /// Requests received for `capability`, in arrival order.
    pub async fn requests(&self, capability: Capability) -> Vec<FetchRequest> {
        let guard = self.state.lock().await;
        guard.requests.get(&capability).cloned().unwrap_or_default()
    }

    /// Number of calls received for `capability`.
    pub async fn calls(&self, capability: Capability) -> usize {
        self.requests(capability).await.len()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.requests.clear();
    }
}

/// A source that defers all behavior to an external controller.
///
/// Capabilities with no configured behavior answer `EmptyButValid`.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
    cost: Arc<std::sync::Mutex<SourceCost>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn StatsSource>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let cost = Arc::new(std::sync::Mutex::new(SourceCost::free()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
            cost: Arc::clone(&cost),
        };
        let me = Arc::new(Self { name, state, cost });
        (me as Arc<dyn StatsSource>, controller)
    }

    async fn run(
        &self,
        capability: Capability,
        req: &FetchRequest,
    ) -> Result<Vec<CanonicalRecord>, SourceError> {
        // Snapshot the rule without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard
                .requests
                .entry(capability)
                .or_default()
                .push(req.clone());
            guard.rules.get(&capability).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(records)) => Ok(records),
            Some(MockBehavior::Delay(after, records)) => {
                tokio::time::sleep(after).await;
                Ok(records)
            }
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(SourceError::EmptyButValid),
        }
    }
}

impl StatsSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn cost(&self, _capability: Capability, _req: &FetchRequest) -> SourceCost {
        *self.cost.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn as_box_score_provider(&self) -> Option<&dyn BoxScoreProvider> {
        Some(self as &dyn BoxScoreProvider)
    }

    fn as_schedule_provider(&self) -> Option<&dyn ScheduleProvider> {
        Some(self as &dyn ScheduleProvider)
    }
}

#[async_trait]
impl BoxScoreProvider for DynamicMockSource {
    async fn box_scores(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError> {
        self.run(Capability::BoxScores, req).await
    }
}

#[async_trait]
impl ScheduleProvider for DynamicMockSource {
    async fn schedule(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError> {
        self.run(Capability::Schedule, req).await
    }
}
