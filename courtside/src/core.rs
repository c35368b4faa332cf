use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use courtside_core::{
    Budget, BudgetConfig, Capability, CourtsideConfig, CourtsideError, Decimal, FallbackPolicy,
    FetchRequest, MatchPolicy, ReconciledResult, ScoringWeights, SourceKey, SourceUsed,
    StatBounds, StatCategory, StatsSource,
};

use crate::phase::{PassPlan, PhaseEvent, PhaseTracker, PrimaryOutcome, ReconcilePhase};
use crate::router::fetch::{Fetched, fetch_one};
use crate::router::join::{Contribution, join};
use crate::router::util::{order_records, validate};

/// Engine that reconciles records across registered stat sources.
pub struct Courtside {
    pub(crate) sources: Vec<Arc<dyn StatsSource>>,
    pub(crate) cfg: CourtsideConfig,
}

/// Builder for constructing a `Courtside` engine with custom configuration.
pub struct CourtsideBuilder {
    sources: Vec<Arc<dyn StatsSource>>,
    cfg: CourtsideConfig,
}

impl Default for CourtsideBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn keys_of(sources: &[Arc<dyn StatsSource>]) -> Vec<SourceKey> {
    sources.iter().map(|s| s.key()).collect()
}

impl CourtsideBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no sources; register at least one via [`with_source`](Self::with_source).
    /// Defaults: 10 s platform timeout with a 1.5 s safety margin, cross-checked
    /// box scores, schedule fallback only on failure, seeded team directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: vec![],
            cfg: CourtsideConfig::default(),
        }
    }

    /// Register a stat source.
    ///
    /// Registration order decides the source order for capabilities without an
    /// explicit preference.
    #[must_use]
    pub fn with_source(mut self, s: Arc<dyn StatsSource>) -> Self {
        self.sources.push(s);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: CourtsideConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the source order for a capability. The first capable source listed is the primary.
    ///
    /// Unlisted capable sources still follow the listed ones in registration order.
    #[must_use]
    pub fn prefer_for_capability(
        mut self,
        capability: Capability,
        sources_desc: &[Arc<dyn StatsSource>],
    ) -> Self {
        self.cfg
            .capability_priority
            .insert(capability, keys_of(sources_desc));
        self
    }

    /// Set which source wins a stat category when records are joined.
    #[must_use]
    pub fn prefer_for_category(
        mut self,
        category: StatCategory,
        sources_desc: &[Arc<dyn StatsSource>],
    ) -> Self {
        self.cfg
            .category_priority
            .insert(category, keys_of(sources_desc));
        self
    }

    /// Select the fallback policy for a capability.
    #[must_use]
    pub const fn fallback_policy(mut self, capability: Capability, policy: FallbackPolicy) -> Self {
        self.cfg.fallback.set(capability, policy);
        self
    }

    /// Replace the wall-clock budget.
    #[must_use]
    pub const fn budget(mut self, budget: BudgetConfig) -> Self {
        self.cfg.budget = budget;
        self
    }

    /// Set the hard timeout of the hosting platform.
    #[must_use]
    pub const fn platform_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.budget.platform_timeout = timeout;
        self
    }

    /// Set the time reserved for serialization and response delivery.
    #[must_use]
    pub const fn safety_margin(mut self, margin: Duration) -> Self {
        self.cfg.budget.safety_margin = margin;
        self
    }

    /// Replace the identity matching ladder.
    #[must_use]
    pub fn match_policy(mut self, policy: MatchPolicy) -> Self {
        self.cfg.match_policy = policy;
        self
    }

    /// Toggle seeding of team identities from the built-in league directory.
    ///
    /// Without seeding, team spellings such as `"GS"` and `"GSW"` only join when
    /// the matching ladder relates them.
    #[must_use]
    pub const fn seed_team_directory(mut self, yes: bool) -> Self {
        self.cfg.seed_team_directory = yes;
        self
    }

    /// Accept truncated fetches when the remaining budget cannot cover a full one.
    #[must_use]
    pub const fn allow_partial(mut self, yes: bool) -> Self {
        self.cfg.allow_partial = yes;
        self
    }

    /// Replace the fantasy scoring weights.
    #[must_use]
    pub fn scoring(mut self, weights: ScoringWeights) -> Self {
        self.cfg.scoring = weights;
        self
    }

    /// Fraction of the season average below which a player counts as underperforming.
    #[must_use]
    pub const fn underperformance_ratio(mut self, ratio: Decimal) -> Self {
        self.cfg.underperformance_ratio = ratio;
        self
    }

    /// Number of top performers listed in the daily report.
    #[must_use]
    pub const fn top_performers(mut self, n: usize) -> Self {
        self.cfg.top_performers = n;
        self
    }

    /// Build the `Courtside` engine.
    ///
    /// Priority lists are cleaned up first: keys naming no registered source are
    /// dropped and duplicates removed.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when no source is registered, two sources share a
    /// name, the budget window is empty, the matching ladder is empty, or the
    /// underperformance ratio is negative.
    pub fn build(mut self) -> Result<Courtside, CourtsideError> {
        if self.sources.is_empty() {
            return Err(CourtsideError::invalid_config(
                "no sources registered; add at least one via with_source(...)",
            ));
        }

        let mut known: HashSet<&'static str> = HashSet::new();
        for s in &self.sources {
            if !known.insert(s.name()) {
                return Err(CourtsideError::invalid_config(format!(
                    "source '{}' registered twice",
                    s.name()
                )));
            }
        }

        let filter_keys = |v: &mut Vec<SourceKey>| {
            let mut seen: HashSet<SourceKey> = HashSet::new();
            v.retain(|k| known.contains(k.as_str()) && seen.insert(k.clone()));
        };
        for v in self.cfg.capability_priority.values_mut() {
            filter_keys(v);
        }
        for v in self.cfg.category_priority.values_mut() {
            filter_keys(v);
        }

        if self.cfg.budget.window().is_zero() {
            return Err(CourtsideError::invalid_config(
                "safety margin leaves no time before the platform timeout",
            ));
        }
        if self.cfg.match_policy.strategies.is_empty() {
            return Err(CourtsideError::invalid_config(
                "match policy needs at least one strategy",
            ));
        }
        if self.cfg.underperformance_ratio.is_sign_negative() {
            return Err(CourtsideError::invalid_config(
                "underperformance ratio must not be negative",
            ));
        }

        Ok(Courtside {
            sources: self.sources,
            cfg: self.cfg,
        })
    }
}

impl Courtside {
    /// Start building a new `Courtside` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use courtside::{Capability, Courtside, StatCategory};
    ///
    /// let nba = Arc::new(courtside_nba::NbaStatsSource::try_new_default()?);
    /// let espn = Arc::new(courtside_espn::EspnSource::try_new_default()?);
    ///
    /// let engine = Courtside::builder()
    ///     .with_source(nba.clone())
    ///     .with_source(espn.clone())
    ///     .prefer_for_capability(Capability::Schedule, &[espn.clone(), nba.clone()])
    ///     .prefer_for_category(StatCategory::Rebounding, &[espn, nba])
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> CourtsideBuilder {
        CourtsideBuilder::new()
    }

    /// Effective configuration after build-time cleanup.
    #[must_use]
    pub const fn config(&self) -> &CourtsideConfig {
        &self.cfg
    }

    pub(crate) fn source_named(&self, name: &str) -> Option<Arc<dyn StatsSource>> {
        self.sources.iter().find(|s| s.name() == name).cloned()
    }

    /// Capable sources for `capability`, best first.
    pub(crate) fn ordered(&self, capability: Capability) -> Vec<Arc<dyn StatsSource>> {
        let mut out: Vec<(usize, Arc<dyn StatsSource>)> = self
            .sources
            .iter()
            .filter(|s| s.supports(capability))
            .cloned()
            .enumerate()
            .collect();
        if let Some(pref) = self.cfg.capability_priority.get(&capability) {
            let pos: HashMap<_, _> = pref
                .iter()
                .enumerate()
                .map(|(i, k)| (k.as_str(), i))
                .collect();
            out.sort_by_key(|(orig_i, s)| {
                (pos.get(s.name()).copied().unwrap_or(usize::MAX), *orig_i)
            });
        }
        out.into_iter().map(|(_, s)| s).collect()
    }

    /// Sources to consult for `capability`, or just the forced one.
    pub(crate) fn candidates(
        &self,
        capability: Capability,
        force_source: Option<&str>,
    ) -> Result<Vec<Arc<dyn StatsSource>>, CourtsideError> {
        let Some(name) = force_source else {
            return Ok(self.ordered(capability));
        };
        match self.source_named(name) {
            Some(s) if s.supports(capability) => Ok(vec![s]),
            Some(_) => Err(CourtsideError::InvalidArg(format!(
                "source '{name}' does not serve {capability}"
            ))),
            None => Err(CourtsideError::InvalidArg(format!(
                "unknown source '{name}'"
            ))),
        }
    }

    /// Run one reconciliation pass over `candidates`, best first.
    ///
    /// Every fetch is bounded by the pass deadline, so the pass returns within
    /// the budget window no matter how the sources behave. The returned tracker
    /// sits in `Merging` when `merge` is set and in `Done` otherwise.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "courtside::core::reconcile",
            skip(self, req, candidates),
            fields(capability = %capability, date = %req.date, sources = candidates.len()),
        )
    )]
    pub(crate) async fn reconcile(
        &self,
        capability: Capability,
        req: FetchRequest,
        candidates: Vec<Arc<dyn StatsSource>>,
        merge: bool,
    ) -> (ReconciledResult, PhaseTracker) {
        let budget = Budget::start(&self.cfg.budget);
        let policy = self.cfg.fallback.for_capability(capability);
        let plan = PassPlan {
            policy,
            has_fallback: candidates.len() > 1,
            merge,
        };
        let mut pass = PhaseTracker::new(plan);
        pass.advance(PhaseEvent::Begin);

        let Some((primary, fallbacks)) = candidates.split_first() else {
            pass.advance(PhaseEvent::PrimaryDone(PrimaryOutcome::Failed));
            pass.advance(PhaseEvent::Joined);
            let mut result = ReconciledResult::empty(capability, req.date);
            result.elapsed_budget_ms = budget.elapsed_ms();
            return (result, pass);
        };
        let allow_partial = self.cfg.allow_partial;

        let mut fetched: Vec<Fetched> = Vec::with_capacity(candidates.len());
        if matches!(policy, FallbackPolicy::CrossCheck) && plan.has_fallback {
            let all = futures::future::join_all(
                candidates
                    .iter()
                    .map(|s| fetch_one(s, capability, &req, &budget, allow_partial)),
            )
            .await;
            if let Some(first) = all.first() {
                pass.advance(PhaseEvent::PrimaryDone(first.outcome.primary_outcome()));
            }
            fetched.extend(all);
            pass.advance(PhaseEvent::FallbackDone);
        } else {
            let slot = sequential_slot(&budget, &candidates, 0, capability, &req, allow_partial);
            let first = fetch_one(primary, capability, &req, &slot, allow_partial).await;
            let outcome = first.outcome.primary_outcome();
            fetched.push(first);
            if pass.advance(PhaseEvent::PrimaryDone(outcome)) == ReconcilePhase::FetchingFallback {
                for (i, s) in fallbacks.iter().enumerate() {
                    let slot =
                        sequential_slot(&budget, &candidates, i + 1, capability, &req, allow_partial);
                    let next = fetch_one(s, capability, &req, &slot, allow_partial).await;
                    let delivered = next.outcome.primary_outcome() == PrimaryOutcome::Records;
                    fetched.push(next);
                    if delivered {
                        break;
                    }
                }
                pass.advance(PhaseEvent::FallbackDone);
            }
        }

        let bounds = StatBounds::default();
        let mut errors = Vec::new();
        let mut truncated = false;
        let mut contributions = Vec::new();
        for f in fetched {
            let source = f.source;
            if let Some((records, cut)) = f.into_records(&mut errors) {
                truncated |= cut;
                let records = validate(source, records, &bounds, &mut errors);
                if !records.is_empty() {
                    contributions.push(Contribution { source, records });
                }
            }
        }

        let primary_name = primary.name();
        let source_used = source_used(primary_name, &contributions);
        let ranking: Vec<&'static str> = candidates.iter().map(|s| s.name()).collect();
        let joined = join(contributions, &ranking, &self.cfg);
        errors.extend(joined.errors);
        pass.advance(PhaseEvent::Joined);

        let (records, provenance) = order_records(joined.records, joined.provenance);
        let partial = records.is_empty() || truncated;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            records = records.len(),
            diagnostics = errors.len(),
            partial,
            elapsed_ms = budget.elapsed_ms(),
            "courtside: pass joined"
        );

        let result = ReconciledResult {
            capability,
            date: req.date,
            records,
            source_used,
            errors,
            partial,
            elapsed_budget_ms: budget.elapsed_ms(),
            provenance,
            superseded: joined.superseded,
        };
        (result, pass)
    }
}

/// Budget for the `at`-th candidate of a sequential pass.
///
/// The smallest useful fetch of every later candidate is held back, so a
/// stalled source cannot starve its fallbacks. When the candidate would no
/// longer fit after the hold-back it keeps the whole pass budget.
fn sequential_slot(
    budget: &Budget,
    candidates: &[Arc<dyn StatsSource>],
    at: usize,
    capability: Capability,
    req: &FetchRequest,
    allow_partial: bool,
) -> Budget {
    let reserve: Duration = candidates
        .iter()
        .skip(at + 1)
        .map(|s| s.cost(capability, req).minimum(allow_partial))
        .sum();
    if reserve.is_zero() {
        return *budget;
    }
    let own = candidates
        .get(at)
        .map_or(Duration::ZERO, |s| s.cost(capability, req).minimum(allow_partial));
    let slot = budget.reserving(reserve);
    if slot.remaining() > own { slot } else { *budget }
}

fn source_used(primary: &str, contributions: &[Contribution]) -> SourceUsed {
    let from_primary = contributions.iter().any(|c| c.source == primary);
    let from_fallback = contributions.iter().any(|c| c.source != primary);
    match (from_primary, from_fallback) {
        (true, true) => SourceUsed::MergedBoth,
        (true, false) => SourceUsed::Primary,
        (false, true) => SourceUsed::Fallback,
        (false, false) => SourceUsed::NoDataAvailable,
    }
}
