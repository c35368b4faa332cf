use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, diagnostics, and telemetry.
///
/// These map one-to-one with engine entry points and allow consistent
/// Display formatting when tagging errors and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Per-player and per-team box scores for a date.
    BoxScores,
    /// Games and scores for a date.
    Schedule,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BoxScores => "box-scores",
            Self::Schedule => "schedule",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
