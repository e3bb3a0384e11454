//! Capability-constrained factory.

use super::factory::{construct, select};
use super::{CreateRequest, FactoryError, FactoryResult, Registry};
use crate::domain::{Capability, Entry};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Factory restricted to entries whose constructor satisfies `T`.
///
/// `T` is usually a trait object. The constraint is fixed when the factory
/// is built; resolution otherwise follows [`Factory`](super::Factory)
/// exactly, and the built component is returned already coerced to `Box<T>`.
/// The default `TypedFactory` (over `dyn Any`) is unconstrained.
pub struct TypedFactory<T: ?Sized + 'static = dyn Any> {
    registry: Arc<Registry>,
    declared: PhantomData<fn() -> Box<T>>,
}

impl<T: ?Sized + 'static> TypedFactory<T> {
    /// Creates a factory reading from `registry`.
    #[must_use]
    pub const fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            declared: PhantomData,
        }
    }

    /// Returns the capability this factory is constrained to.
    ///
    /// An unconstrained factory reports [`Capability::universal`].
    #[must_use]
    pub fn declared_type(&self) -> Capability {
        Capability::of::<T>()
    }

    /// Finds the single entry satisfying `T` that matches the request.
    ///
    /// # Errors
    ///
    /// Same as [`Factory::resolve`](super::Factory::resolve), evaluated over
    /// the typed view only.
    pub fn resolve(&self, request: &CreateRequest) -> FactoryResult<Entry> {
        let candidates = self.registry.typed_entries(&self.declared_type());
        select(&candidates, request)
    }

    /// Resolves, builds, and coerces the component described by `request`.
    ///
    /// # Errors
    ///
    /// Returns the resolution errors of [`TypedFactory::resolve`],
    /// [`FactoryError::Construction`] when the constructor fails, or
    /// [`FactoryError::CapabilityMismatch`] when the declared coercion does
    /// not produce a `Box<T>`.
    pub fn create(&self, request: impl Into<CreateRequest>) -> FactoryResult<Box<T>> {
        let create_request = request.into();
        let entry = self.resolve(&create_request)?;
        let instance = construct(&entry, &create_request)?;

        let capability = self.declared_type();
        let mismatch = || FactoryError::CapabilityMismatch {
            component: entry.constructor().type_name(),
            capability: capability.type_name(),
        };
        entry
            .constructor()
            .upcast(&capability, instance)
            .map_err(|_| mismatch())?
            .downcast::<Box<T>>()
            .map(|component| *component)
            .map_err(|_| mismatch())
    }
}

impl<T: ?Sized + 'static> Clone for TypedFactory<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.registry))
    }
}

impl<T: ?Sized + 'static> fmt::Debug for TypedFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedFactory")
            .field("declared_type", &self.declared_type())
            .finish_non_exhaustive()
    }
}
