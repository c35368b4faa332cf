//! Cross-source join of canonical records.
//!
//! Teams are resolved first so every player can be scoped to a canonical
//! team. Records are then grouped by `(date, kind, identity)`; the
//! highest-ranked source forms the base of each group and every stat is taken
//! from the source ranked best for its category.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;
use courtside_core::identity::normalize::fold;
use courtside_core::{
    CanonicalRecord, CourtsideConfig, EntityKind, IdentityId, IdentityRegistry, Provenance,
    ReconcileError, Resolution, StatCategory, StatKind, TeamDirectory,
};

/// Records one source delivered for the pass, in source rank order.
pub(crate) struct Contribution {
    pub(crate) source: &'static str,
    pub(crate) records: Vec<CanonicalRecord>,
}

#[derive(Default)]
pub(crate) struct Joined {
    pub(crate) records: Vec<CanonicalRecord>,
    pub(crate) provenance: Vec<Provenance>,
    pub(crate) superseded: Vec<CanonicalRecord>,
    pub(crate) errors: Vec<ReconcileError>,
}

type GroupKey = (NaiveDate, EntityKind, String);

/// Join contributions. `ranking` is the capability order of every candidate source.
pub(crate) fn join(
    contributions: Vec<Contribution>,
    ranking: &[&'static str],
    cfg: &CourtsideConfig,
) -> Joined {
    if contributions.len() <= 1 {
        return passthrough(contributions);
    }

    let mut resolver = Resolver::new(cfg);
    let mut groups: BTreeMap<GroupKey, Vec<(&'static str, CanonicalRecord)>> = BTreeMap::new();
    let mut out = Joined::default();

    for kind in [EntityKind::Team, EntityKind::Player] {
        for c in &contributions {
            for r in c.records.iter().filter(|r| r.kind == kind) {
                match resolver.rekey(r, c.source) {
                    Ok(rec) => groups
                        .entry((rec.game.date, rec.kind, rec.entity_id.clone()))
                        .or_default()
                        .push((c.source, rec)),
                    Err(e) => out.errors.push(e),
                }
            }
        }
    }

    for entries in groups.into_values() {
        let mut entries = entries.into_iter();
        let Some((base_source, base)) = entries.next() else {
            continue;
        };
        let rest: Vec<(&'static str, CanonicalRecord)> = entries.collect();
        let (record, provenance) = merge_group(base_source, base, &rest, ranking, cfg);
        out.records.push(record);
        out.provenance.push(provenance);
        out.superseded.extend(rest.into_iter().map(|(_, r)| r));
    }
    out
}

fn passthrough(contributions: Vec<Contribution>) -> Joined {
    let mut out = Joined::default();
    for c in contributions {
        for r in c.records {
            out.provenance.push(Provenance {
                entity_id: r.entity_id.clone(),
                kind: r.kind,
                date: r.game.date,
                served_by: c.source.to_string(),
                overrides: BTreeMap::new(),
                discarded: Vec::new(),
            });
            out.records.push(r);
        }
    }
    out
}

/// Sources in the order they win `category`: the configured list first, then
/// the capability order.
fn category_order<'a>(
    cfg: &'a CourtsideConfig,
    category: StatCategory,
    ranking: &[&'a str],
) -> Vec<&'a str> {
    let mut order: Vec<&'a str> = cfg
        .category_priority
        .get(&category)
        .map(|keys| keys.iter().map(|k| k.as_str()).collect())
        .unwrap_or_default();
    for &name in ranking {
        if !order.contains(&name) {
            order.push(name);
        }
    }
    order
}

fn merge_group(
    base_source: &'static str,
    base: CanonicalRecord,
    rest: &[(&'static str, CanonicalRecord)],
    ranking: &[&'static str],
    cfg: &CourtsideConfig,
) -> (CanonicalRecord, Provenance) {
    let mut provenance = Provenance {
        entity_id: base.entity_id.clone(),
        kind: base.kind,
        date: base.game.date,
        served_by: base_source.to_string(),
        overrides: BTreeMap::new(),
        discarded: Vec::new(),
    };
    if rest.is_empty() {
        return (base, provenance);
    }

    let all: Vec<(&str, &CanonicalRecord)> = std::iter::once((base_source, &base))
        .chain(rest.iter().map(|(s, r)| (*s, r)))
        .collect();
    let kinds: BTreeSet<StatKind> = all
        .iter()
        .flat_map(|(_, r)| r.stats.keys().copied())
        .collect();

    let mut stats = base.stats.clone();
    let mut contributed: HashSet<&str> = HashSet::new();
    for kind in kinds {
        let order = category_order(cfg, kind.category(), ranking);
        let winner = order
            .iter()
            .find_map(|name| {
                all.iter()
                    .find(|(s, r)| s == name && r.stats.contains_key(&kind))
            })
            .or_else(|| all.iter().find(|(_, r)| r.stats.contains_key(&kind)));
        let Some((source, record)) = winner else {
            continue;
        };
        if let Some(value) = record.stat(kind) {
            stats.insert(kind, value);
        }
        if *source != base_source {
            contributed.insert(*source);
            provenance
                .overrides
                .entry(kind.category())
                .or_insert_with(|| (*source).to_string());
        }
    }

    provenance.discarded = rest
        .iter()
        .map(|(s, _)| *s)
        .filter(|s| !contributed.contains(s))
        .map(str::to_string)
        .collect();

    (CanonicalRecord { stats, ..base }, provenance)
}

struct Resolver {
    registry: IdentityRegistry,
    claimed: HashSet<(IdentityId, &'static str, NaiveDate)>,
}

impl Resolver {
    fn new(cfg: &CourtsideConfig) -> Self {
        let registry = if cfg.seed_team_directory {
            IdentityRegistry::seeded(cfg.match_policy.clone(), &TeamDirectory::nba())
        } else {
            IdentityRegistry::new(cfg.match_policy.clone())
        };
        Self {
            registry,
            claimed: HashSet::new(),
        }
    }

    /// An identity is taken once a source has a record for it on a date; a
    /// second record from the same source names someone else.
    fn is_free(&self, id: IdentityId, source: &'static str, date: NaiveDate) -> bool {
        !self.claimed.contains(&(id, source, date))
    }

    fn code(&self, id: IdentityId) -> String {
        self.registry
            .get(id)
            .map(|i| i.canonical_code.clone())
            .unwrap_or_default()
    }

    fn conflict(&self, kind: EntityKind, raw: &str, ids: &[IdentityId]) -> ReconcileError {
        #[cfg(feature = "tracing")]
        tracing::warn!(?kind, raw, candidates = ids.len(), "courtside: identity conflict");
        ReconcileError::IdentityConflict {
            kind,
            raw: raw.to_string(),
            candidates: ids.iter().map(|id| self.code(*id)).collect(),
        }
    }

    /// Record `alias` as a spelling of `id`. A spelling another identity
    /// already holds is a conflict between the two.
    fn claim(
        &mut self,
        kind: EntityKind,
        id: IdentityId,
        alias: &str,
    ) -> Result<(), ReconcileError> {
        self.registry
            .add_alias(id, alias)
            .map_err(|holder| self.conflict(kind, alias, &[id, holder]))
    }

    fn team(&mut self, code: Option<&str>, display: &str) -> Result<IdentityId, ReconcileError> {
        let mut conflict: Option<(&str, Vec<IdentityId>)> = None;
        for raw in code.into_iter().chain(std::iter::once(display)) {
            match self.registry.resolve(EntityKind::Team, raw, None) {
                Resolution::Resolved(id) => {
                    self.claim(EntityKind::Team, id, display)?;
                    return Ok(id);
                }
                Resolution::Conflict(ids) => {
                    conflict.get_or_insert((raw, ids));
                }
                Resolution::Unresolved => {}
            }
        }
        if let Some((raw, ids)) = conflict {
            return Err(self.conflict(EntityKind::Team, raw, &ids));
        }
        let canonical = code.unwrap_or(display);
        match self
            .registry
            .register(EntityKind::Team, canonical, display, None)
        {
            Ok(id) | Err(id) => Ok(id),
        }
    }

    fn player(
        &mut self,
        r: &CanonicalRecord,
        source: &'static str,
        scope: Option<&str>,
    ) -> Result<IdentityId, ReconcileError> {
        let date = r.game.date;
        match self
            .registry
            .resolve(EntityKind::Player, &r.display_name, scope)
        {
            Resolution::Resolved(id) if self.is_free(id, source, date) => {
                self.claim(EntityKind::Player, id, &r.display_name)?;
                return Ok(id);
            }
            Resolution::Conflict(ids) => {
                return Err(self.conflict(EntityKind::Player, &r.display_name, &ids));
            }
            Resolution::Resolved(_) | Resolution::Unresolved => {}
        }

        let mut slug = fold(&r.display_name).replace(' ', "-");
        if slug.is_empty() {
            slug.clone_from(&r.entity_id);
        }
        match self
            .registry
            .register(EntityKind::Player, &slug, &r.display_name, scope)
        {
            Ok(id) => Ok(id),
            Err(holder) if self.is_free(holder, source, date) => Ok(holder),
            Err(holder) => Err(self.conflict(EntityKind::Player, &r.display_name, &[holder])),
        }
    }

    fn canonical_opponent(&self, raw: &str) -> Option<String> {
        self.registry
            .resolve(EntityKind::Team, raw, None)
            .resolved()
            .map(|id| self.code(id))
    }

    /// Copy of `r` keyed by its canonical identity.
    fn rekey(
        &mut self,
        r: &CanonicalRecord,
        source: &'static str,
    ) -> Result<CanonicalRecord, ReconcileError> {
        let date = r.game.date;
        let (id, team_code) = match r.kind {
            EntityKind::Team => {
                let id = self.team(r.team_code.as_deref(), &r.display_name)?;
                (id, Some(self.code(id)))
            }
            EntityKind::Player => {
                let team_code = match r.team_code.as_deref() {
                    Some(code) => {
                        let team = self.team(Some(code), code)?;
                        Some(self.code(team))
                    }
                    None => None,
                };
                (self.player(r, source, team_code.as_deref())?, team_code)
            }
        };
        if !self.is_free(id, source, date) {
            return Err(self.conflict(r.kind, &r.display_name, &[id]));
        }
        self.claimed.insert((id, source, date));

        let entity_id = self
            .registry
            .get(id)
            .map(courtside_core::Identity::entity_id)
            .unwrap_or_else(|| r.entity_id.clone());
        let mut rec = r.rekeyed(&entity_id, team_code.as_deref());
        if let Some(opp) = r.game.opponent.as_deref() {
            let canonical = self.canonical_opponent(opp);
            rec.game.opponent = Some(canonical.unwrap_or_else(|| opp.to_string()));
        }
        Ok(rec)
    }
}
