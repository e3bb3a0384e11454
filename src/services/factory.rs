//! Plain component factory and the resolution rules it shares with
//! [`TypedFactory`](super::TypedFactory).

use super::{FactoryError, FactoryResult, Registry};
use crate::domain::{Configuration, Entry, Instance, Name};
use std::sync::Arc;
use tracing::{debug, error};

/// Request to resolve and build one component.
///
/// A bare key converts into a request, so `factory.create("circle")` and
/// `factory.create(CreateRequest::new("circle"))` are equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRequest {
    key: String,
    library: Option<String>,
    label: Option<String>,
    configuration: Configuration,
}

impl CreateRequest {
    /// Creates a request for `key` with no filters and empty configuration.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Restricts candidates to `library`. An empty library is ignored.
    #[must_use]
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }

    /// Restricts candidates to `label`. An empty label is ignored.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the named construction parameters.
    #[must_use]
    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Returns the requested key as given.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the library filter, if a non-empty one was given.
    #[must_use]
    pub fn library(&self) -> Option<&str> {
        self.library.as_deref().filter(|library| !library.is_empty())
    }

    /// Returns the label filter, if a non-empty one was given.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }

    /// Returns the construction parameters.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }
}

impl From<&str> for CreateRequest {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for CreateRequest {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

/// Resolves components by key, library, and label across every entry.
#[derive(Debug, Clone)]
pub struct Factory {
    registry: Arc<Registry>,
}

impl Factory {
    /// Creates a factory reading from `registry`.
    #[must_use]
    pub const fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Returns the registry this factory reads from.
    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Finds the single entry matching the request without building it.
    ///
    /// # Errors
    ///
    /// Returns a not-found [`FactoryError`] when the key, library, or label
    /// filter leaves no candidates, or [`FactoryError::Ambiguous`] when more
    /// than one entry remains.
    pub fn resolve(&self, request: &CreateRequest) -> FactoryResult<Entry> {
        self.registry.with_entries(|entries| select(entries, request))
    }

    /// Resolves and builds the component described by `request`.
    ///
    /// # Errors
    ///
    /// Returns the resolution errors of [`Factory::resolve`], or
    /// [`FactoryError::Construction`] carrying the constructor's own error.
    pub fn create(&self, request: impl Into<CreateRequest>) -> FactoryResult<Instance> {
        let create_request = request.into();
        let entry = self.resolve(&create_request)?;
        construct(&entry, &create_request)
    }
}

/// Narrows `candidates` to the one entry matching `request`.
///
/// Each failure is logged before it is returned.
pub(super) fn select(candidates: &[Entry], request: &CreateRequest) -> FactoryResult<Entry> {
    let key = Name::new(request.key());
    let mut matches: Vec<&Entry> = candidates
        .iter()
        .filter(|entry| *entry.key() == key)
        .collect();
    if matches.is_empty() {
        return Err(logged(FactoryError::KeyNotFound {
            key: request.key().to_owned(),
        }));
    }

    if let Some(library) = request.library() {
        matches.retain(|entry| entry.library().matches(library));
        if matches.is_empty() {
            return Err(logged(FactoryError::LibraryNotFound {
                key: request.key().to_owned(),
                library: library.to_owned(),
            }));
        }
    }

    if let Some(label) = request.label() {
        matches.retain(|entry| entry.label().matches(label));
        if matches.is_empty() {
            return Err(logged(FactoryError::LabelNotFound {
                key: request.key().to_owned(),
                label: label.to_owned(),
            }));
        }
    }

    match matches.as_slice() {
        [entry] => Ok((*entry).clone()),
        _ => Err(logged(FactoryError::Ambiguous {
            key: request.key().to_owned(),
            library: request.library().map(str::to_owned),
            label: request.label().map(str::to_owned),
            count: matches.len(),
        })),
    }
}

/// Invokes the entry's constructor with the request configuration.
pub(super) fn construct(entry: &Entry, request: &CreateRequest) -> FactoryResult<Instance> {
    debug!(
        key = %entry.key(),
        library = %entry.library(),
        label = %entry.label(),
        component = entry.constructor().type_name(),
        "constructing component"
    );
    entry
        .constructor()
        .construct(request.configuration())
        .map_err(FactoryError::Construction)
}

fn logged(err: FactoryError) -> FactoryError {
    error!(error = %err, "component resolution failed");
    err
}
