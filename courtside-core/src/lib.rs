//! courtside-core
//!
//! Core types, traits, and utilities shared across the courtside workspace.
//!
//! - `types`: canonical records, diagnostics and configuration (re-exported from `courtside-types`).
//! - `source`: the `StatsSource` trait and its capability role traits.
//! - `budget`: the wall-clock budget controller that schedules sources against a deadline.
//! - `pacer`: per-provider minimum-interval limiter shared across requests.
//! - `identity`: the alias registry and matching ladder used to join records.
//! - `teams`: the built-in league team directory.
//! - `scoring`: fantasy point computation.
//!
//! Async runtime (Tokio)
//! ---------------------
//! This crate assumes the Tokio ecosystem as the async runtime. `Budget` and
//! `Pacer` are built on `tokio::time::Instant` and `tokio::sync::Mutex`, so
//! deadlines honor Tokio's paused clock in tests and code that uses them must
//! run under a Tokio 1.x runtime.
//!
#![warn(missing_docs)]

/// Wall-clock budget controller.
pub mod budget;
/// Calendar helpers for game dates.
pub mod calendar;
/// Identity registry and resolver.
pub mod identity;
/// Middleware trait implemented by source wrappers.
pub mod middleware;
/// Per-provider pacing.
pub mod pacer;
/// Fantasy scoring.
pub mod scoring;
/// Source capability traits and the primary `StatsSource` interface.
pub mod source;
/// Built-in league team directory.
pub mod teams;
pub mod types;
/// Plausibility checks for source records.
pub mod validate;

pub use budget::{Allocation, Budget};
pub use identity::{Identity, IdentityId, IdentityRegistry, Resolution};
pub use middleware::Middleware;
pub use pacer::Pacer;
pub use scoring::fantasy_points;
pub use source::{BoxScoreProvider, FetchRequest, ScheduleProvider, SourceCost, StatsSource};
pub use teams::{TeamDirectory, TeamInfo};
pub use types::*;
pub use validate::StatBounds;
