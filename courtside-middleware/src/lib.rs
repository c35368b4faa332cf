#![doc = include_str!("../README.md")]
//! courtside-middleware
//!
//! Source wrappers and the builder that stacks them.

mod builder;
mod cooldown;
mod quota;

pub use crate::builder::SourceBuilder;
pub use crate::cooldown::{CooldownMiddleware, CooldownSource};
pub use crate::quota::{QuotaAwareSource, QuotaMiddleware};
