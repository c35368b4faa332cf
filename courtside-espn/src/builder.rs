use std::sync::Arc;
use std::time::Duration;

use courtside_core::{CourtsideError, StatsSource};
use courtside_middleware::SourceBuilder;
use courtside_types::QuotaConfig;

use crate::EspnSource;

/// Builder type alias specialized for the ESPN source.
pub type EspnSourceBuilder = SourceBuilder;

impl EspnSource {
    /// Returns an unconfigured builder with the default source.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP client cannot be built.
    pub fn builder() -> Result<EspnSourceBuilder, CourtsideError> {
        let raw: Arc<dyn StatsSource> = Arc::new(Self::try_new_default()?);
        Ok(SourceBuilder::new(raw))
    }

    /// Returns a builder with a quota of 100 calls a minute and a two-minute
    /// cooldown after the provider rate limits us.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP client cannot be built.
    pub fn rate_limited() -> Result<EspnSourceBuilder, CourtsideError> {
        Ok(Self::builder()?
            .with_quota(QuotaConfig {
                limit: 100,
                window: Duration::from_secs(60),
            })
            .with_cooldown(Duration::from_secs(2 * 60)))
    }

    /// Expert-only: construct an unwrapped source for manual composition.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the HTTP client cannot be built.
    pub fn new_raw() -> Result<Self, CourtsideError> {
        Self::try_new_default()
    }
}
