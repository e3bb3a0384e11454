//! Registry entry value type.

use super::{Capability, Constructor, Name};

/// One discoverable implementation binding.
///
/// Entries are immutable once built. Two entries are equal when key,
/// constructor identity, library, and label all match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: Name,
    constructor: Constructor,
    library: Name,
    label: Name,
}

impl Entry {
    /// Creates an entry, substituting [`Name::none`] for an absent library or
    /// label.
    #[must_use]
    pub fn new(
        key: impl AsRef<str>,
        constructor: Constructor,
        library: Option<&str>,
        label: Option<&str>,
    ) -> Self {
        Self {
            key: Name::new(key),
            constructor,
            library: Name::or_none(library),
            label: Name::or_none(label),
        }
    }

    /// Returns the normalized key.
    #[must_use]
    pub const fn key(&self) -> &Name {
        &self.key
    }

    /// Returns the constructor reference.
    #[must_use]
    pub const fn constructor(&self) -> &Constructor {
        &self.constructor
    }

    /// Returns the normalized library.
    #[must_use]
    pub const fn library(&self) -> &Name {
        &self.library
    }

    /// Returns the normalized label.
    #[must_use]
    pub const fn label(&self) -> &Name {
        &self.label
    }

    /// Returns a copy of this entry built by `constructor` instead.
    #[must_use]
    pub fn with_constructor(&self, constructor: Constructor) -> Self {
        Self {
            constructor,
            ..self.clone()
        }
    }

    /// Returns `true` when the constructor satisfies `capability`.
    #[must_use]
    pub fn satisfies(&self, capability: &Capability) -> bool {
        self.constructor.satisfies(capability)
    }
}
