//! Configuration types shared across the engine and sources.

use std::collections::BTreeMap;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::capability::Capability;
use crate::record::{StatCategory, StatKind};
use crate::source::SourceKey;

/// Wall-clock budget for one engine call.
///
/// The usable window is `platform_timeout - safety_margin`; everything the
/// engine does for a request must finish inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Hard timeout enforced by the hosting platform.
    pub platform_timeout: Duration,
    /// Time reserved for serialization and response delivery.
    pub safety_margin: Duration,
}

impl BudgetConfig {
    /// Usable window between request start and deadline.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.platform_timeout.saturating_sub(self.safety_margin)
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            platform_timeout: Duration::from_secs(10),
            safety_margin: Duration::from_millis(1500),
        }
    }
}

/// When to consult sources after the primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FallbackPolicy {
    /// Query primary and fallback concurrently and join their records.
    CrossCheck,
    /// Query the fallback only when the primary fails, times out or is rate-limited.
    OnFailure,
    /// Like `OnFailure`, and also when the primary returns nothing.
    OnFailureOrEmpty,
    /// Never query anything but the primary.
    Never,
}

/// Fallback policy per capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Policy for box scores.
    pub box_scores: FallbackPolicy,
    /// Policy for schedules. An empty schedule is a valid "no games" answer.
    pub schedule: FallbackPolicy,
}

impl FallbackConfig {
    /// Policy configured for `capability`.
    #[must_use]
    pub const fn for_capability(&self, capability: Capability) -> FallbackPolicy {
        match capability {
            Capability::BoxScores => self.box_scores,
            Capability::Schedule => self.schedule,
        }
    }

    /// Replace the policy for `capability`.
    pub const fn set(&mut self, capability: Capability, policy: FallbackPolicy) {
        match capability {
            Capability::BoxScores => self.box_scores = policy,
            Capability::Schedule => self.schedule = policy,
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            box_scores: FallbackPolicy::CrossCheck,
            schedule: FallbackPolicy::OnFailure,
        }
    }
}

/// One tier of the identity matching ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Byte-for-byte alias equality.
    Exact,
    /// Alias equality ignoring case.
    CaseInsensitive,
    /// One normalized name contains the other, or abbreviates it token by token.
    Containment,
    /// The leading characters of one name equal the other's canonical code.
    Prefix,
}

/// Ordered matching ladder used by the identity resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPolicy {
    /// Tiers tried in order; the first tier with any match decides.
    pub strategies: Vec<MatchStrategy>,
    /// Number of leading characters compared by `Prefix`.
    pub prefix_len: usize,
    /// Shortest normalized name allowed to match by containment.
    pub min_containment_len: usize,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            strategies: vec![
                MatchStrategy::Exact,
                MatchStrategy::CaseInsensitive,
                MatchStrategy::Containment,
                MatchStrategy::Prefix,
            ],
            prefix_len: 3,
            min_containment_len: 2,
        }
    }
}

/// Fantasy scoring weights per stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight applied to each stat; unlisted stats score zero.
    pub weights: BTreeMap<StatKind, Decimal>,
}

impl ScoringWeights {
    /// Weight for `kind`, zero when unlisted.
    #[must_use]
    pub fn weight(&self, kind: StatKind) -> Decimal {
        self.weights.get(&kind).copied().unwrap_or(Decimal::ZERO)
    }

    /// Replace the weight for `kind`.
    #[must_use]
    pub fn with(mut self, kind: StatKind, weight: Decimal) -> Self {
        self.weights.insert(kind, weight);
        self
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        let weights = BTreeMap::from([
            (StatKind::Points, Decimal::ONE),
            (StatKind::Rebounds, Decimal::new(12, 1)),
            (StatKind::Assists, Decimal::new(15, 1)),
            (StatKind::Steals, Decimal::from(3)),
            (StatKind::Blocks, Decimal::from(3)),
            (StatKind::Turnovers, Decimal::NEGATIVE_ONE),
        ]);
        Self { weights }
    }
}

/// Configuration for a call quota over a fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Maximum number of calls within a single window.
    pub limit: u64,
    /// Duration of the accounting window.
    pub window: Duration,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            limit: 60,
            window: Duration::from_secs(60),
        }
    }
}

/// Snapshot of a quota budget at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuotaState {
    /// Configured maximum calls per window.
    pub limit: u64,
    /// Remaining calls available in the current window.
    pub remaining: u64,
    /// Time remaining until the current window resets.
    pub reset_in: Duration,
}

/// Global configuration for the `Courtside` engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtsideConfig {
    /// Wall-clock budget per call.
    pub budget: BudgetConfig,
    /// Fallback policy per capability.
    pub fallback: FallbackConfig,
    /// Source order per capability. The first listed capable source is the primary.
    ///
    /// Unknown keys are dropped during the builder's `build` step; unlisted
    /// sources follow the listed ones in registration order.
    pub capability_priority: BTreeMap<Capability, Vec<SourceKey>>,
    /// Source order per stat category, used to pick values when records are joined.
    /// Falls back to the capability order when a category is unlisted.
    pub category_priority: BTreeMap<StatCategory, Vec<SourceKey>>,
    /// Identity matching ladder.
    pub match_policy: MatchPolicy,
    /// Seed team identities from the built-in league directory.
    pub seed_team_directory: bool,
    /// Accept truncated fetches when the budget cannot cover a full one.
    pub allow_partial: bool,
    /// Fantasy scoring weights.
    pub scoring: ScoringWeights,
    /// Fraction of the season average below which a player is flagged as underperforming.
    pub underperformance_ratio: Decimal,
    /// Number of entries listed as top performers in the daily report.
    pub top_performers: usize,
}

impl Default for CourtsideConfig {
    fn default() -> Self {
        Self {
            budget: BudgetConfig::default(),
            fallback: FallbackConfig::default(),
            capability_priority: BTreeMap::new(),
            category_priority: BTreeMap::new(),
            match_policy: MatchPolicy::default(),
            seed_team_directory: true,
            allow_partial: true,
            scoring: ScoringWeights::default(),
            underperformance_ratio: Decimal::new(5, 1),
            top_performers: 10,
        }
    }
}
