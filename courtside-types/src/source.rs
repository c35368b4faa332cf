//! Source metadata types usable across crates.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Typed key for identifying stat sources in priority configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceKey(Cow<'static, str>);

impl SourceKey {
    /// Construct a new typed source key from a static name.
    ///
    /// This is useful when configuring per-capability or per-category priorities.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for SourceKey {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}
