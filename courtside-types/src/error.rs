use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::EntityKind;

/// Failure reported by a stat source adapter.
///
/// Adapters normalize every upstream outcome into one of these variants so the
/// engine can decide on fallback without inspecting transport details.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceError {
    /// The provider refused the call because of rate limiting.
    #[error("rate limited (retry_after_ms={retry_after_ms:?})")]
    RateLimited {
        /// Provider hint for when the next call may succeed, if any.
        retry_after_ms: Option<u64>,
    },

    /// The provider did not answer within the transport timeout.
    #[error("upstream timed out")]
    Timeout,

    /// The provider answered with a non-success HTTP status.
    #[error("upstream error: status {code}")]
    UpstreamError {
        /// HTTP status code returned by the provider.
        code: u16,
    },

    /// The provider answered successfully but had nothing for the request.
    #[error("empty but valid response")]
    EmptyButValid,

    /// The payload could not be decoded into the expected shape.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Decoder message describing what was missing or invalid.
        message: String,
    },

    /// The provider could not be reached at all (DNS, connect, TLS).
    #[error("upstream unreachable: {message}")]
    Unreachable {
        /// Transport-level description of the failure.
        message: String,
    },
}

impl SourceError {
    /// Helper: build a `MalformedResponse` error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Helper: build an `Unreachable` error.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// True when the error only signals absence of data.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::EmptyButValid)
    }
}

/// Why a source did not deliver within the time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutReason {
    /// The shared request deadline elapsed while the call was outstanding.
    Deadline,
    /// The remaining budget could not cover the source's declared cost, so it was skipped.
    Budget,
    /// The source itself reported a transport timeout.
    Upstream,
}

/// Non-fatal diagnostic carried in a reconciled result.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ReconcileError {
    /// A source failed with a non-timeout error.
    #[error("{source_id} unavailable: {cause}")]
    SourceUnavailable {
        /// Source that failed.
        source_id: String,
        /// Normalized adapter failure.
        cause: SourceError,
    },

    /// A source timed out or was skipped for lack of budget.
    #[error("{source_id} timed out ({reason:?}, budget_ms={budget_ms})")]
    SourceTimeout {
        /// Source that timed out.
        source_id: String,
        /// Budget (milliseconds) that was available when the source was scheduled.
        budget_ms: u64,
        /// Whether the deadline, the budget allocator, or the upstream caused it.
        reason: TimeoutReason,
    },

    /// A name matched more than one canonical identity at the same tier.
    #[error("identity conflict for {kind:?} '{raw}': {candidates:?}")]
    IdentityConflict {
        /// Entity kind that was being resolved.
        kind: EntityKind,
        /// Raw name as produced by the source or roster.
        raw: String,
        /// Canonical codes of the competing identities.
        candidates: Vec<String>,
    },

    /// A record failed plausibility checks and was dropped.
    #[error("{source_id} record for '{entity}' rejected: {reason}")]
    RejectedRecord {
        /// Source that produced the record.
        source_id: String,
        /// Display name of the rejected entity.
        entity: String,
        /// Which check failed.
        reason: String,
    },
}

impl ReconcileError {
    /// Helper: build a `SourceUnavailable` diagnostic.
    pub fn unavailable(source_id: impl Into<String>, cause: SourceError) -> Self {
        Self::SourceUnavailable {
            source_id: source_id.into(),
            cause,
        }
    }

    /// Helper: build a `SourceTimeout` diagnostic.
    pub fn timeout(source_id: impl Into<String>, budget_ms: u64, reason: TimeoutReason) -> Self {
        Self::SourceTimeout {
            source_id: source_id.into(),
            budget_ms,
            reason,
        }
    }

    /// Returns the source this diagnostic refers to, if any.
    #[must_use]
    pub fn source_id(&self) -> Option<&str> {
        match self {
            Self::SourceUnavailable { source_id, .. }
            | Self::SourceTimeout { source_id, .. }
            | Self::RejectedRecord { source_id, .. } => Some(source_id),
            Self::IdentityConflict { .. } => None,
        }
    }
}

/// Hard failure of an engine entry point.
///
/// Only invalid input and invalid configuration abort a request; everything an
/// upstream can do wrong is reported through [`ReconcileError`] instead.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourtsideError {
    /// Invalid input argument (malformed date, unknown team filter, unknown source).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Builder or configuration validation failed.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Human-readable description of the validation failure.
        message: String,
    },
}

impl CourtsideError {
    /// Helper: build an `InvalidConfig` error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
