//! Error types for component resolution and construction.

use crate::domain::BoxError;
use thiserror::Error;

/// Result type for factory operations.
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Errors returned while resolving or instantiating a component.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// No entry is registered under the key.
    #[error("the key '{key}' is not present")]
    KeyNotFound {
        /// Requested key.
        key: String,
    },

    /// Entries exist for the key, but none in the requested library.
    #[error("the library '{library}' is not present for key '{key}'")]
    LibraryNotFound {
        /// Requested key.
        key: String,
        /// Requested library.
        library: String,
    },

    /// Entries exist for the key and library, but none with the label.
    #[error("the label '{label}' is not present for key '{key}'")]
    LabelNotFound {
        /// Requested key.
        key: String,
        /// Requested label.
        label: String,
    },

    /// More than one entry survived every filter.
    #[error(
        "the combination of key '{key}', library '{}' and label '{}' did not return a unique result: {count} possible entries were found",
        .library.as_deref().unwrap_or("none"),
        .label.as_deref().unwrap_or("none")
    )]
    Ambiguous {
        /// Requested key.
        key: String,
        /// Requested library, if any.
        library: Option<String>,
        /// Requested label, if any.
        label: Option<String>,
        /// Number of entries that remained.
        count: usize,
    },

    /// The resolved constructor failed; its error is passed through as is.
    #[error(transparent)]
    Construction(BoxError),

    /// A typed factory could not coerce the instance into its capability.
    #[error("component {component} cannot be used as {capability}")]
    CapabilityMismatch {
        /// Concrete component type name.
        component: &'static str,
        /// Declared capability type name.
        capability: &'static str,
    },
}

impl FactoryError {
    /// Returns `true` for the key, library, and label not-found variants.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::KeyNotFound { .. } | Self::LibraryNotFound { .. } | Self::LabelNotFound { .. }
        )
    }

    /// Returns `true` when more than one entry matched.
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }
}
