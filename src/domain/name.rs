//! Normalized registry name type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel stored when a library or label is not supplied.
const NONE_SENTINEL: &str = "none";

/// Case-folded string used for entry keys, libraries, and labels.
///
/// Names compare case-insensitively by construction: every constructor
/// lower-cases its input, so `Name::new("Lib1") == Name::new("lib1")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Creates a normalized name.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().to_lowercase())
    }

    /// Creates a name from an optional value, falling back to [`Name::none`].
    #[must_use]
    pub fn or_none(value: Option<&str>) -> Self {
        value.map_or_else(Self::none, Self::new)
    }

    /// Returns the sentinel used for an absent library or label.
    #[must_use]
    pub fn none() -> Self {
        Self(NONE_SENTINEL.to_owned())
    }

    /// Returns `true` when this is the absent-value sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0 == NONE_SENTINEL
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when `raw` normalizes to this name.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw.to_lowercase()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
