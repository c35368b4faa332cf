//! Canonical identities for teams and players, and the resolver that maps raw
//! source spellings onto them.
//!
//! A fresh [`IdentityRegistry`] is built for every reconciliation pass. Each
//! raw name is run through the configured [`MatchPolicy`](crate::MatchPolicy)
//! ladder; the first tier that matches anything decides. Several identities
//! matching at one tier is a [`Resolution::Conflict`]: the resolver never
//! guesses.

pub mod normalize;
mod registry;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EntityKind;

pub use registry::IdentityRegistry;

/// Handle of an identity inside one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityId(pub(crate) u32);

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A provider-independent team or player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Registry handle.
    pub id: IdentityId,
    /// Team or player.
    pub kind: EntityKind,
    /// Canonical code: the team abbreviation, or a slug of the player's name.
    pub canonical_code: String,
    /// Name from the first registration.
    pub display_name: String,
    /// Team a player identity is scoped to; always `None` for teams.
    pub scope: Option<String>,
    /// Every spelling claimed by this identity, including the canonical code.
    pub aliases: BTreeSet<String>,
}

impl Identity {
    /// Identifier used for the `entity_id` of re-keyed records.
    ///
    /// Teams use their code (`"BOS"`); scoped players are prefixed with their
    /// team (`"LAL:lebron-james"`).
    #[must_use]
    pub fn entity_id(&self) -> String {
        match (&self.kind, &self.scope) {
            (EntityKind::Player, Some(team)) => format!("{team}:{}", self.canonical_code),
            _ => self.canonical_code.clone(),
        }
    }
}

/// Outcome of resolving one raw spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one identity matched at the deciding tier.
    Resolved(IdentityId),
    /// No tier matched.
    Unresolved,
    /// More than one identity matched at the same tier.
    Conflict(Vec<IdentityId>),
}

impl Resolution {
    /// The resolved handle, if any.
    #[must_use]
    pub const fn resolved(&self) -> Option<IdentityId> {
        match self {
            Self::Resolved(id) => Some(*id),
            _ => None,
        }
    }
}
