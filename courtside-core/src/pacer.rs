use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a provider's minimum interval between outbound calls.
///
/// One `Pacer` is shared by every request that reaches the same provider, so
/// concurrent requests queue behind each other instead of bursting. The lock is
/// held while waiting; a caller dropped mid-wait (e.g. at the request deadline)
/// releases its turn without recording a call.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl Pacer {
    /// Create a pacer with the given minimum interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: Mutex::new(None),
        }
    }

    /// Configured minimum interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until a call is allowed, then record it.
    pub async fn ready(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            tokio::time::sleep_until(prev + self.interval).await;
        }
        *last = Some(Instant::now());
    }
}
