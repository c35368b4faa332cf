use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use courtside_core::{
    BoxScoreProvider, CanonicalRecord, Capability, FetchRequest, Middleware, ScheduleProvider,
    SourceCost, SourceError, StatsSource,
};
use tokio::time::Instant;

/// Middleware that benches its inner source after it reports `RateLimited`.
///
/// While cooling down every call fails fast with `RateLimited` instead of
/// reaching the provider again, so a throttled upstream is not hammered by
/// subsequent requests.
pub struct CooldownSource {
    inner: Arc<dyn StatsSource>,
    state: Mutex<Option<Instant>>, // cooling down until; None means active
    default_duration: Duration,
}

impl CooldownSource {
    /// Wrap `inner`; `default_duration` applies when the provider gives no retry hint.
    pub fn new(inner: Arc<dyn StatsSource>, default_duration: Duration) -> Self {
        Self {
            inner,
            state: Mutex::new(None),
            default_duration,
        }
    }

    /// Time left in the current cooldown, if any.
    pub fn cooling_for(&self) -> Option<Duration> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        match *guard {
            Some(until) if now < until => Some(until - now),
            Some(_) => {
                *guard = None;
                None
            }
            None => None,
        }
    }

    fn check(&self) -> Result<(), SourceError> {
        match self.cooling_for() {
            Some(left) => Err(SourceError::RateLimited {
                retry_after_ms: Some(u64::try_from(left.as_millis()).unwrap_or(u64::MAX)),
            }),
            None => Ok(()),
        }
    }

    fn handle_error(&self, err: SourceError) -> SourceError {
        if let SourceError::RateLimited { retry_after_ms } = &err {
            let duration = retry_after_ms
                .filter(|ms| *ms > 0)
                .map_or(self.default_duration, Duration::from_millis);
            #[cfg(feature = "tracing")]
            tracing::warn!(
                source = self.inner.name(),
                cooldown_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                "source rate-limited; cooling down"
            );
            let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            *guard = Some(Instant::now() + duration);
        }
        err
    }
}

impl StatsSource for CooldownSource {
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
impl BoxScoreProvider for CooldownSource {
    async fn box_scores(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError> {
        self.check()?;
        let inner = self
            .inner
            .as_box_score_provider()
            .ok_or_else(|| SourceError::unreachable("box scores not supported by inner source"))?;
        inner
            .box_scores(req)
            .await
            .map_err(|e| self.handle_error(e))
    }
}

#[async_trait]
impl ScheduleProvider for CooldownSource {
    async fn schedule(&self, req: &FetchRequest) -> Result<Vec<CanonicalRecord>, SourceError> {
        self.check()?;
        let inner = self
            .inner
            .as_schedule_provider()
            .ok_or_else(|| SourceError::unreachable("schedule not supported by inner source"))?;
        inner.schedule(req).await.map_err(|e| self.handle_error(e))
    }
}

/// Middleware config for constructing a [`CooldownSource`].
pub struct CooldownMiddleware {
    default_duration: Duration,
}

impl CooldownMiddleware {
    /// Cooldown of `default_duration` when the provider gives no retry hint.
    #[must_use]
    pub const fn new(default_duration: Duration) -> Self {
        Self { default_duration }
    }
}

impl Middleware for CooldownMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn StatsSource>) -> Arc<dyn StatsSource> {
        Arc::new(CooldownSource::new(inner, self.default_duration))
    }

    fn name(&self) -> &'static str {
        "CooldownSource"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "default_duration_ms": self.default_duration.as_millis(),
        })
    }
}
