//! Loader over components registered at link time.
//!
//! Crates submit [`ComponentDescriptor`] statics into the [`COMPONENTS`]
//! distributed slice; [`DistributedLoader`] enumerates them at runtime.
//!
//! ```ignore
//! use samovar::adapters::distributed::{COMPONENTS, ComponentDescriptor};
//! use samovar::domain::Constructor;
//!
//! #[linkme::distributed_slice(COMPONENTS)]
//! static CIRCLE: ComponentDescriptor = ComponentDescriptor {
//!     name: None,
//!     module: module_path!(),
//!     library: None,
//!     label: None,
//!     constructor: || Constructor::deserialize::<Circle>().implements::<dyn Shape>(|c| c).build(),
//! };
//! ```

use crate::domain::Constructor;
use crate::ports::{DiscoveredComponent, DiscoveryResult, Loader};
use linkme::distributed_slice;

/// Link-time declaration of one component.
#[derive(Debug)]
pub struct ComponentDescriptor {
    /// Registration key; the constructor's type name when `None`.
    pub name: Option<&'static str>,
    /// Declaring module path, usually `module_path!()`.
    pub module: &'static str,
    /// Library override; the module path's root when `None`.
    pub library: Option<&'static str>,
    /// Optional label.
    pub label: Option<&'static str>,
    /// Builds the constructor reference.
    pub constructor: fn() -> Constructor,
}

impl ComponentDescriptor {
    fn discover(&self) -> DiscoveryResult<DiscoveredComponent> {
        let constructor = (self.constructor)();
        let key = self.name.unwrap_or_else(|| constructor.short_name());
        let mut component = DiscoveredComponent::new(self.module, key, constructor)?;
        if let Some(library) = self.library {
            component = component.with_library(library);
        }
        if let Some(label) = self.label {
            component = component.with_label(label);
        }
        Ok(component)
    }
}

/// Components submitted with `#[linkme::distributed_slice(COMPONENTS)]`.
#[distributed_slice]
pub static COMPONENTS: [ComponentDescriptor] = [..];

/// Discovers link-time registered components.
///
/// Link order is unspecified, so descriptors are discovered sorted by module
/// path and then by key.
#[derive(Debug, Clone)]
pub struct DistributedLoader {
    descriptors: &'static [ComponentDescriptor],
    namespace: Option<String>,
}

impl DistributedLoader {
    /// Creates a loader over the crate-wide [`COMPONENTS`] slice.
    #[must_use]
    pub fn new() -> Self {
        Self::from_slice(COMPONENTS.static_slice())
    }

    /// Creates a loader over any descriptor slice, such as a distributed
    /// slice private to one application.
    #[must_use]
    pub const fn from_slice(descriptors: &'static [ComponentDescriptor]) -> Self {
        Self {
            descriptors,
            namespace: None,
        }
    }

    /// Restricts discovery to modules at or below `namespace`.
    #[must_use]
    pub fn within(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    fn in_namespace(&self, module: &str) -> bool {
        self.namespace.as_deref().is_none_or(|namespace| {
            module == namespace
                || module
                    .strip_prefix(namespace)
                    .is_some_and(|rest| rest.starts_with("::"))
        })
    }
}

impl Default for DistributedLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for DistributedLoader {
    fn discover(&self) -> DiscoveryResult<Vec<DiscoveredComponent>> {
        let mut discovered = self
            .descriptors
            .iter()
            .filter(|descriptor| self.in_namespace(descriptor.module))
            .map(ComponentDescriptor::discover)
            .collect::<DiscoveryResult<Vec<_>>>()?;
        discovered.sort_by(|left, right| {
            left.module()
                .cmp(right.module())
                .then_with(|| left.key().cmp(right.key()))
        });
        Ok(discovered)
    }
}
