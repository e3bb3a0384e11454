//! Loader port: the collaborator that discovers components for a registry.

use crate::domain::Constructor;
use std::sync::Arc;
use thiserror::Error;

/// Result type for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Discovery contract implemented by component loaders.
///
/// A loader yields every component of one discovery pass. The pass is
/// all-or-nothing: an implementation must return an error rather than a
/// partial list when any unit fails to load.
pub trait Loader {
    /// Enumerates the components of one discovery pass, in registration
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] when any module or component cannot be
    /// loaded or introspected.
    fn discover(&self) -> DiscoveryResult<Vec<DiscoveredComponent>>;
}

/// A component found during discovery, ready for registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredComponent {
    key: String,
    constructor: Constructor,
    module: String,
    library: String,
    label: Option<String>,
}

impl DiscoveredComponent {
    /// Creates a discovered component declared in `module`.
    ///
    /// The library defaults to the first segment of the module path and the
    /// label is left unset.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidModulePath`] when a module path
    /// segment is not an identifier, or
    /// [`DiscoveryError::InvalidComponentName`] when `key` is not one.
    pub fn new(
        module: impl Into<String>,
        key: impl Into<String>,
        constructor: Constructor,
    ) -> DiscoveryResult<Self> {
        let module_path = module.into();
        let component_key = key.into();
        let root = validate_module_path(&module_path)?.to_owned();

        if !is_identifier(&component_key) {
            return Err(DiscoveryError::InvalidComponentName {
                module: module_path,
                name: component_key,
            });
        }

        Ok(Self {
            key: component_key,
            constructor,
            module: module_path,
            library: root,
            label: None,
        })
    }

    /// Overrides the module-derived library.
    #[must_use]
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = library.into();
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the registration key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the constructor reference.
    #[must_use]
    pub const fn constructor(&self) -> &Constructor {
        &self.constructor
    }

    /// Returns the module path the component was declared in.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the library the component registers under.
    #[must_use]
    pub fn library(&self) -> &str {
        &self.library
    }

    /// Returns the label, if one was supplied.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Errors that abort a discovery pass.
#[derive(Debug, Clone, Error)]
pub enum DiscoveryError {
    /// A module path is empty or has a segment that is not an identifier.
    #[error("invalid module path '{0}'")]
    InvalidModulePath(String),

    /// A component name is not an identifier.
    #[error("invalid component name '{name}' in module '{module}'")]
    InvalidComponentName {
        /// Module the component was declared in.
        module: String,
        /// Rejected component name.
        name: String,
    },

    /// Loading or introspecting a module failed.
    #[error("failed to load module '{module}': {source}")]
    Failed {
        /// Module that failed to load.
        module: String,
        /// Underlying loader error.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl DiscoveryError {
    /// Wraps a loader-specific failure for `module`.
    pub fn failed(
        module: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Failed {
            module: module.into(),
            source: Arc::new(err),
        }
    }
}

/// Validates a `::`- or `.`-separated module path and returns its root
/// segment.
pub(crate) fn validate_module_path(path: &str) -> DiscoveryResult<&str> {
    let mut segments = path.split("::").flat_map(|part| part.split('.'));
    match segments.next() {
        Some(root) if is_identifier(root) && segments.all(is_identifier) => Ok(root),
        _ => Err(DiscoveryError::InvalidModulePath(path.to_owned())),
    }
}

/// Returns `true` for `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
