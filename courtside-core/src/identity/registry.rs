use std::collections::{BTreeSet, HashMap};

use super::normalize::{abbreviates, code_prefix, common_prefix_len, fold};
use super::{Identity, IdentityId, Resolution};
use crate::teams::TeamDirectory;
use crate::{EntityKind, MatchPolicy, MatchStrategy};

type ClaimKey = (EntityKind, Option<String>, String);

/// Alias registry for one reconciliation pass.
///
/// Aliases are injective per `(kind, scope)`: once a spelling is claimed by an
/// identity, no other identity of the same kind and scope may claim it.
#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
    policy: MatchPolicy,
    identities: Vec<Identity>,
    claims: HashMap<ClaimKey, IdentityId>,
}

impl IdentityRegistry {
    /// Empty registry using `policy`.
    #[must_use]
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
            identities: Vec::new(),
            claims: HashMap::new(),
        }
    }

    /// Registry pre-populated with one team identity per franchise in `directory`.
    #[must_use]
    pub fn seeded(policy: MatchPolicy, directory: &TeamDirectory) -> Self {
        let mut reg = Self::new(policy);
        for info in directory.teams() {
            if let Ok(id) = reg.register(EntityKind::Team, info.code, &info.full_name(), None) {
                for spelling in info.spellings() {
                    let _ = reg.add_alias(id, &spelling);
                }
            }
        }
        reg
    }

    /// Matching policy in use.
    #[must_use]
    pub const fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Number of identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Whether no identity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Look up an identity by handle.
    #[must_use]
    pub fn get(&self, id: IdentityId) -> Option<&Identity> {
        self.identities.get(id.0 as usize)
    }

    /// All identities in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.identities.iter()
    }

    /// Register a new identity claiming `canonical_code` and `display_name`.
    ///
    /// # Errors
    /// Returns the current holder when either spelling is already claimed
    /// within the same kind and scope; nothing is registered in that case.
    pub fn register(
        &mut self,
        kind: EntityKind,
        canonical_code: &str,
        display_name: &str,
        scope: Option<&str>,
    ) -> Result<IdentityId, IdentityId> {
        let scope = scope.map(str::to_string);
        for spelling in [canonical_code, display_name] {
            if let Some(holder) = self.claims.get(&(kind, scope.clone(), spelling.to_string())) {
                return Err(*holder);
            }
        }
        let id = IdentityId(u32::try_from(self.identities.len()).unwrap_or(u32::MAX));
        let aliases: BTreeSet<String> = [canonical_code, display_name]
            .into_iter()
            .map(str::to_string)
            .collect();
        for alias in &aliases {
            self.claims
                .insert((kind, scope.clone(), alias.clone()), id);
        }
        self.identities.push(Identity {
            id,
            kind,
            canonical_code: canonical_code.to_string(),
            display_name: display_name.to_string(),
            scope,
            aliases,
        });
        Ok(id)
    }

    /// Claim `alias` for `id`. Re-claiming an alias the identity already owns is a no-op.
    ///
    /// # Errors
    /// Returns the other identity holding `alias` in the same kind and scope.
    /// An unknown `id` is reported as holding nothing and is ignored.
    pub fn add_alias(&mut self, id: IdentityId, alias: &str) -> Result<(), IdentityId> {
        let Some(identity) = self.identities.get_mut(id.0 as usize) else {
            return Ok(());
        };
        let key = (identity.kind, identity.scope.clone(), alias.to_string());
        match self.claims.get(&key) {
            Some(holder) if *holder != id => Err(*holder),
            Some(_) => Ok(()),
            None => {
                identity.aliases.insert(alias.to_string());
                self.claims.insert(key, id);
                Ok(())
            }
        }
    }

    /// Resolve `raw` to an identity of `kind`.
    ///
    /// With `scope = Some(team)` only identities scoped to that team or
    /// unscoped ones are candidates; `None` considers every identity of `kind`.
    #[must_use]
    pub fn resolve(&self, kind: EntityKind, raw: &str, scope: Option<&str>) -> Resolution {
        let raw = raw.trim();
        if raw.is_empty() {
            return Resolution::Unresolved;
        }
        let candidates: Vec<&Identity> = self
            .identities
            .iter()
            .filter(|i| i.kind == kind && in_scope(i, scope))
            .collect();
        for strategy in &self.policy.strategies {
            let hits = match strategy {
                MatchStrategy::Exact => filter_ids(&candidates, |i| i.aliases.contains(raw)),
                MatchStrategy::CaseInsensitive => {
                    let lower = raw.to_lowercase();
                    filter_ids(&candidates, |i| {
                        i.aliases.iter().any(|a| a.to_lowercase() == lower)
                    })
                }
                MatchStrategy::Containment => self.containment(&candidates, raw),
                MatchStrategy::Prefix => self.prefix(&candidates, raw),
            };
            match hits.len() {
                0 => {}
                1 => return Resolution::Resolved(hits[0]),
                _ => return Resolution::Conflict(hits),
            }
        }
        Resolution::Unresolved
    }

    /// Substring or abbreviation match on folded spellings; ties on the
    /// longest shared prefix survive as a conflict.
    fn containment(&self, candidates: &[&Identity], raw: &str) -> Vec<IdentityId> {
        let min = self.policy.min_containment_len;
        let needle = fold(raw);
        if needle.chars().count() < min {
            return Vec::new();
        }
        let scored: Vec<(IdentityId, usize)> = candidates
            .iter()
            .filter_map(|i| {
                i.aliases
                    .iter()
                    .map(|a| fold(a))
                    .filter(|a| a.chars().count() >= min)
                    .filter(|a| {
                        a.contains(needle.as_str())
                            || needle.contains(a.as_str())
                            || abbreviates(a, &needle)
                    })
                    .map(|a| common_prefix_len(&a, &needle))
                    .max()
                    .map(|score| (i.id, score))
            })
            .collect();
        let Some(best) = scored.iter().map(|(_, s)| *s).max() else {
            return Vec::new();
        };
        scored
            .into_iter()
            .filter(|(_, s)| *s == best)
            .map(|(id, _)| id)
            .collect()
    }

    /// The first `prefix_len` characters of one side equal the other side's code.
    fn prefix(&self, candidates: &[&Identity], raw: &str) -> Vec<IdentityId> {
        let len = self.policy.prefix_len;
        let raw_prefix = code_prefix(raw, len);
        let raw_upper = raw.to_uppercase();
        filter_ids(candidates, |i| {
            raw_prefix
                .as_deref()
                .is_some_and(|p| p.eq_ignore_ascii_case(&i.canonical_code))
                || (raw_upper.chars().count() == len
                    && i.aliases
                        .iter()
                        .filter_map(|a| code_prefix(a, len))
                        .any(|p| p == raw_upper))
        })
    }
}

fn in_scope(identity: &Identity, scope: Option<&str>) -> bool {
    match scope {
        None => true,
        Some(s) => identity.scope.as_deref().is_none_or(|own| own == s),
    }
}

fn filter_ids(candidates: &[&Identity], pred: impl Fn(&Identity) -> bool) -> Vec<IdentityId> {
    candidates
        .iter()
        .filter(|i| pred(i))
        .map(|i| i.id)
        .collect()
}
