//! Quota-aware source wrapper.
//!
//! Counts outbound calls per fixed window and refuses calls beyond the limit
//! with [`SourceError::RateLimited`], carrying the time until the window resets.
//! The engine treats that exactly like an upstream 429 and moves on to the next
//! candidate.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use courtside_core::{
    BoxScoreProvider, CanonicalRecord, Capability, FetchRequest, Middleware, ScheduleProvider,
    SourceCost, SourceError, StatsSource,
};
use courtside_types::{QuotaConfig, QuotaState};
use tokio::time::Instant;

/// Wrapper that enforces a call quota.
pub struct QuotaAwareSource {
    inner: Arc<dyn StatsSource>,
    config: QuotaConfig,
    runtime: Mutex<QuotaRuntime>,
}

struct QuotaRuntime {
    calls_made_in_window: u64,
    last_reset: Instant,
}

impl QuotaAwareSource {
    /// Create a new quota-aware wrapper around an existing source.
    pub fn new(inner: Arc<dyn StatsSource>, config: QuotaConfig) -> Self {
        Self {
            inner,
            config,
            runtime: Mutex::new(QuotaRuntime {
                calls_made_in_window: 0,
                last_reset: Instant::now(),
            }),
        }
    }

    /// Access the inner source.
    pub fn inner(&self) -> &Arc<dyn StatsSource> {
        &self.inner
    }

    /// Current budget without consuming a call.
    pub fn state(&self) -> QuotaState {
        let mut rt = self.runtime.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        self.roll_window(&mut rt, now);
        QuotaState {
            limit: self.config.limit,
            remaining: self.config.limit.saturating_sub(rt.calls_made_in_window),
            reset_in: self.reset_in(&rt, now),
        }
    }

    /// Consume one call from the window.
    ///
    /// # Errors
    /// Returns `SourceError::RateLimited` with the time until the next window
    /// boundary when the window's budget is exhausted.
    pub fn should_allow_call(&self) -> Result<(), SourceError> {
        let mut rt = self.runtime.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        self.roll_window(&mut rt, now);

        if rt.calls_made_in_window < self.config.limit {
            rt.calls_made_in_window += 1;
            return Ok(());
        }

        let retry_after_ms = u64::try_from(self.reset_in(&rt, now).as_millis()).unwrap_or(u64::MAX);
        drop(rt);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            source = self.inner.name(),
            retry_after_ms,
            "quota exhausted for window"
        );
        Err(SourceError::RateLimited {
            retry_after_ms: Some(retry_after_ms),
        })
    }

    fn roll_window(&self, rt: &mut QuotaRuntime, now: Instant) {
        let window = self.config.window;
        let elapsed = now.duration_since(rt.last_reset);
        if window.is_zero() || elapsed < window {
            return;
        }
        rt.calls_made_in_window = 0;
        // Keep windows aligned to their original boundaries across idle gaps.
        let windows_passed = elapsed.as_nanos() / window.as_nanos();
        let boundary_offset = Duration::from_nanos(
            (windows_passed * window.as_nanos())
                .try_into()
                .unwrap_or(u64::MAX),
        );
        rt.last_reset += boundary_offset;
    }

    fn reset_in(&self, rt: &QuotaRuntime, now: Instant) -> Duration {
        self.config
            .window
            .saturating_sub(now.duration_since(rt.last_reset))
    }
}

impl StatsSource for QuotaAwareSource {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn cost(&self, capability: Capability, req: &FetchRequest) -> SourceCost {
        self.inner.cost(capability, req)
    }

    fn as_box_score_provider(&self) -> Option<&dyn BoxScoreProvider> {
        if self.inner.as_box_score_provider().is_some() {
            Some(self as &dyn BoxScoreProvider)
        } else {
            None
        }
    }

    fn as_schedule_provider(&self) -> Option<&dyn ScheduleProvider> {
        if self.inner.as_schedule_provider().is_some() {
            Some(self as &dyn ScheduleProvider)
        } else {
            None
        }
    }
}

#[async_trait]
impl BoxScoreProvider for QuotaAwareSource {
    async fn box_scores(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError> {
        let inner = self
            .inner
            .as_box_score_provider()
            .ok_or_else(|| SourceError::unreachable("box scores not supported by inner source"))?;
        self.should_allow_call()?;
        inner.box_scores(req).await
    }
}

#[async_trait]
impl ScheduleProvider for QuotaAwareSource {
    async fn schedule(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError> {
        let inner = self
            .inner
            .as_schedule_provider()
            .ok_or_else(|| SourceError::unreachable("schedule not supported by inner source"))?;
        self.should_allow_call()?;
        inner.schedule(req).await
    }
}

/// Middleware config for constructing a [`QuotaAwareSource`].
pub struct QuotaMiddleware {
    /// Quota applied to the wrapped source.
    pub config: QuotaConfig,
}

impl QuotaMiddleware {
    /// Middleware enforcing `config`.
    #[must_use]
    pub const fn new(config: QuotaConfig) -> Self {
        Self { config }
    }
}

impl Middleware for QuotaMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn StatsSource>) -> Arc<dyn StatsSource> {
        Arc::new(QuotaAwareSource::new(inner, self.config))
    }

    fn name(&self) -> &'static str {
        "QuotaAwareSource"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "limit": self.config.limit,
            "window_ms": self.config.window.as_millis(),
        })
    }
}
