use std::sync::Arc;
use std::time::Duration;

use courtside_core::{CourtsideError, StatsSource};
use courtside_middleware::SourceBuilder;
use courtside_types::QuotaConfig;

use crate::NbaStatsSource;

/// Builder type alias specialized for the NBA stats source.
pub type NbaSourceBuilder = SourceBuilder;

impl NbaStatsSource {
    /// Returns an unconfigured builder with the default source.
    ///
    /// Customize with the builder methods before calling `.build()`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP client cannot be built.
    pub fn builder() -> Result<NbaSourceBuilder, CourtsideError> {
        let raw: Arc<dyn StatsSource> = Arc::new(Self::try_new_default()?);
        Ok(SourceBuilder::new(raw))
    }

    /// Returns a builder with a conservative quota (60 calls a minute) and a
    /// five-minute cooldown after the provider rate limits us.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP client cannot be built.
    pub fn rate_limited() -> Result<NbaSourceBuilder, CourtsideError> {
        Ok(Self::builder()?
            .with_quota(QuotaConfig {
                limit: 60,
                window: Duration::from_secs(60),
            })
            .with_cooldown(Duration::from_secs(5 * 60)))
    }

    /// Expert-only: construct an unwrapped source for manual composition.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP client cannot be built.
    pub fn new_raw() -> Result<Self, CourtsideError> {
        Self::try_new_default()
    }
}
