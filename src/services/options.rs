//! Registry configuration.

use serde::{Deserialize, Serialize};

/// How cached typed views react to registrations made after they were built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Drop every cached view the new entry belongs to, so the next query
    /// recomputes it.
    #[default]
    Invalidate,
    /// Keep cached views as first computed. Entries registered after a
    /// capability was first queried never appear in that capability's view.
    Stable,
}

/// Options controlling registry behaviour.
///
/// Options deserialize from any serde format, with every field optional:
///
/// ```
/// use samovar::services::{CacheMode, RegistryOptions};
///
/// let options: RegistryOptions = serde_json::from_str(r#"{"cache_mode":"stable"}"#)?;
/// assert_eq!(options.cache_mode, CacheMode::Stable);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    /// Typed view caching policy.
    pub cache_mode: CacheMode,
}

impl RegistryOptions {
    /// Creates options with the given cache mode.
    #[must_use]
    pub const fn with_cache_mode(mut self, cache_mode: CacheMode) -> Self {
        self.cache_mode = cache_mode;
        self
    }
}
