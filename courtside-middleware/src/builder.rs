//! Builder for composing sources with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Middleware layers form an "onion" around the raw source:
//!
//! ```text
//! Engine
//!     ↓
//! Outermost Middleware (e.g., Cooldown - checks first, handles errors last)
//!     ↓
//! Inner Middleware (e.g., Quota - counts calls)
//!     ↓
//! Raw Source (e.g., NBA stats - makes actual API calls)
//! ```
//!
//! The `layers` vector stores middleware in **outermost-first** order (last
//! added = outermost); `build()` applies them in reverse.
//!
//! ```text
//! builder.with_quota(..).with_cooldown(..)
//!
//! Storage: [Cooldown, Quota]
//! Applied:  Raw -> Quota -> Cooldown
//! Result:   Cooldown(Quota(Raw))
//! ```

use std::sync::Arc;
use std::time::Duration;

use courtside_core::{Middleware, StatsSource};
use courtside_types::QuotaConfig;
use serde_json::json;

use crate::cooldown::CooldownMiddleware;
use crate::quota::QuotaMiddleware;

const QUOTA: &str = "QuotaAwareSource";
const COOLDOWN: &str = "CooldownSource";

/// Generic middleware builder for composing a source with layered wrappers.
pub struct SourceBuilder {
    raw: Arc<dyn StatsSource>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl SourceBuilder {
    /// Create a new builder from a raw, unwrapped source.
    #[must_use]
    pub fn new(raw: Arc<dyn StatsSource>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the call quota, as the outermost layer.
    #[must_use]
    pub fn with_quota(mut self, cfg: QuotaConfig) -> Self {
        self.layers.retain(|m| m.name() != QUOTA);
        self.layers.insert(0, Box::new(QuotaMiddleware::new(cfg)));
        self
    }

    /// Remove the quota if present.
    #[must_use]
    pub fn without_quota(mut self) -> Self {
        self.layers.retain(|m| m.name() != QUOTA);
        self
    }

    /// Add or replace the rate-limit cooldown, as the outermost layer.
    ///
    /// Placed outside a quota it also benches the source once the quota runs dry.
    #[must_use]
    pub fn with_cooldown(mut self, duration: Duration) -> Self {
        self.layers.retain(|m| m.name() != COOLDOWN);
        self.layers
            .insert(0, Box::new(CooldownMiddleware::new(duration)));
        self
    }

    /// Remove the cooldown if present.
    #[must_use]
    pub fn without_cooldown(mut self) -> Self {
        self.layers.retain(|m| m.name() != COOLDOWN);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Layer names, outermost first.
    #[must_use]
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|m| m.name()).collect()
    }

    /// Snapshot of the stack for logging, outermost first, raw source last.
    #[must_use]
    pub fn describe(&self) -> serde_json::Value {
        let mut layers: Vec<serde_json::Value> = self
            .layers
            .iter()
            .map(|m| json!({ "name": m.name(), "config": m.config_json() }))
            .collect();
        layers.push(json!({ "name": "RawSource", "config": { "name": self.raw.name() } }));
        serde_json::Value::Array(layers)
    }

    /// Build the wrapped source, applying layers innermost first.
    #[must_use]
    pub fn build(self) -> Arc<dyn StatsSource> {
        let mut acc: Arc<dyn StatsSource> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
