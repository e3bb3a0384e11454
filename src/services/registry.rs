//! Shared component registry.
//!
//! Provides [`Registry`], the store factories resolve components from. The
//! registry is meant to be populated by one or more discovery passes at
//! startup and then shared read-mostly behind an [`Arc`].

use super::{CacheMode, RegistryOptions};
use crate::domain::{Capability, Constructor, Entry};
use crate::ports::{DiscoveryResult, Loader};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error, info};

/// Thread-safe store of registry entries with cached typed views.
#[derive(Debug, Default)]
pub struct Registry {
    options: RegistryOptions,
    state: RwLock<RegistryState>,
}

#[derive(Debug, Default)]
struct RegistryState {
    entries: Vec<Entry>,
    typed_index: HashMap<Capability, Arc<[Entry]>>,
}

/// What [`RegistryState::insert`] did with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Insertion {
    Added,
    Extended,
    Duplicate,
}

impl RegistryState {
    /// Appends `entry` unless an equal entry exists.
    ///
    /// An equal entry whose constructor declares fewer capabilities is
    /// replaced by one carrying both capability sets.
    fn insert(&mut self, entry: Entry, cache_mode: CacheMode) -> Insertion {
        let Some(slot) = self.entries.iter_mut().find(|known| **known == entry) else {
            self.invalidate(&entry, cache_mode);
            self.entries.push(entry);
            return Insertion::Added;
        };
        let Some(constructor) = slot.constructor().extended_with(entry.constructor()) else {
            return Insertion::Duplicate;
        };
        *slot = slot.with_constructor(constructor);
        self.invalidate(&entry, cache_mode);
        Insertion::Extended
    }

    fn invalidate(&mut self, entry: &Entry, cache_mode: CacheMode) {
        if cache_mode == CacheMode::Invalidate {
            self.typed_index
                .retain(|capability, _| !entry.satisfies(capability));
        }
    }
}

impl Registry {
    /// Creates an empty registry with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given options.
    #[must_use]
    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            state: RwLock::default(),
        }
    }

    /// Returns the registry options.
    #[must_use]
    pub const fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Registers a constructor under `key`, `library`, and `label`.
    ///
    /// All three names are case-folded and an absent library or label is
    /// stored as the `none` sentinel. Registering an equal entry twice is a
    /// no-op, except that capabilities the second constructor declares are
    /// added to the stored entry.
    pub fn register(
        &self,
        key: &str,
        constructor: Constructor,
        library: Option<&str>,
        label: Option<&str>,
    ) {
        let entry = Entry::new(key, constructor, library, label);
        let cache_mode = self.options.cache_mode;
        let mut state = self.write();
        log_registration(&entry, state.insert(entry.clone(), cache_mode));
    }

    /// Returns a snapshot of every entry in registration order.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        self.read().entries.clone()
    }

    /// Runs `visit` over every entry in registration order under the read
    /// lock, without copying the entries.
    pub(crate) fn with_entries<R>(&self, visit: impl FnOnce(&[Entry]) -> R) -> R {
        visit(&self.read().entries)
    }

    /// Returns the entries whose constructor satisfies `capability`.
    ///
    /// The view is computed on first query and cached. Under
    /// [`CacheMode::Invalidate`] a later registration that satisfies the
    /// capability drops the cached view; under [`CacheMode::Stable`] it
    /// does not.
    #[must_use]
    pub fn typed_entries(&self, capability: &Capability) -> Arc<[Entry]> {
        if let Some(view) = self.read().typed_index.get(capability) {
            return Arc::clone(view);
        }

        let mut state = self.write();
        let RegistryState {
            entries,
            typed_index,
        } = &mut *state;
        let view = typed_index.entry(*capability).or_insert_with(|| {
            debug!(%capability, "building typed registry view");
            entries
                .iter()
                .filter(|entry| entry.satisfies(capability))
                .cloned()
                .collect()
        });
        Arc::clone(view)
    }

    /// Returns the number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    /// Runs one discovery pass and registers everything it finds.
    ///
    /// The pass is all-or-nothing: when the loader fails nothing from the
    /// pass is registered. Components of a successful pass are registered
    /// under a single write lock, so readers never observe half a pass.
    /// Returns the number of components the loader discovered.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`DiscoveryError`](crate::ports::DiscoveryError)
    /// after logging it.
    pub fn fill<L>(&self, loader: &L) -> DiscoveryResult<usize>
    where
        L: Loader + ?Sized,
    {
        let discovered = loader.discover().inspect_err(|err| {
            error!(error = %err, "component discovery failed");
        })?;

        let cache_mode = self.options.cache_mode;
        let mut state = self.write();
        for component in &discovered {
            let entry = Entry::new(
                component.key(),
                component.constructor().clone(),
                Some(component.library()),
                component.label(),
            );
            log_registration(&entry, state.insert(entry.clone(), cache_mode));
        }
        drop(state);

        info!(
            discovered = discovered.len(),
            total = self.len(),
            "component discovery pass complete"
        );
        Ok(discovered.len())
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn log_registration(entry: &Entry, insertion: Insertion) {
    match insertion {
        Insertion::Added => debug!(
            key = %entry.key(),
            library = %entry.library(),
            label = %entry.label(),
            component = entry.constructor().type_name(),
            "registered component"
        ),
        Insertion::Extended => debug!(
            key = %entry.key(),
            component = entry.constructor().type_name(),
            "extended capabilities of registered component"
        ),
        Insertion::Duplicate => debug!(key = %entry.key(), "skipped duplicate registration"),
    }
}
