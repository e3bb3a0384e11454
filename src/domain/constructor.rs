//! Type-erased constructor references.
//!
//! A [`Constructor`] knows how to build one concrete component type from a
//! [`Configuration`] and which capabilities that type satisfies. It is the
//! registry's stand-in for a class reference: opaque beyond being invocable
//! with named parameters.

use super::Capability;
use serde::de::DeserializeOwned;
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Named construction parameters, passed through to constructors verbatim.
pub type Configuration = serde_json::Map<String, serde_json::Value>;

/// A constructed component with its concrete type erased.
pub type Instance = Box<dyn Any>;

/// Error type raised by constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type BuildFn = dyn Fn(&Configuration) -> Result<Instance, BoxError> + Send + Sync;
type UpcastFn = dyn Fn(Instance) -> Result<Instance, Instance> + Send + Sync;

/// Coercion from the concrete component into one declared capability.
///
/// The upcast result is a `Box<Box<T>>` erased to [`Instance`], so callers
/// that know `T` can recover a `Box<T>` with a downcast.
#[derive(Clone)]
struct Binding {
    capability: Capability,
    upcast: Arc<UpcastFn>,
}

impl Binding {
    fn universal() -> Self {
        Self {
            capability: Capability::universal(),
            upcast: Arc::new(|instance: Instance| -> Result<Instance, Instance> {
                Ok(Box::new(instance) as Instance)
            }),
        }
    }
}

/// Reference to a constructible component type.
///
/// Equality is identity of the concrete component type: two constructors for
/// the same type compare equal regardless of how they build it.
#[derive(Clone)]
pub struct Constructor {
    component: TypeId,
    type_name: &'static str,
    build: Arc<BuildFn>,
    bindings: Arc<[Binding]>,
}

impl Constructor {
    /// Starts a constructor that deserializes the configuration into `C`.
    ///
    /// Configuration keys map onto the fields of `C`, so an empty
    /// configuration builds `C` from its serde defaults. A unit struct
    /// accepts an empty configuration too.
    #[must_use]
    pub fn deserialize<C>() -> ConstructorBuilder<C>
    where
        C: DeserializeOwned + Any,
    {
        ConstructorBuilder::new(Arc::new(
            |configuration: &Configuration| -> Result<Instance, BoxError> {
                let component: C = from_configuration(configuration)?;
                Ok(Box::new(component))
            },
        ))
    }

    /// Starts a constructor backed by an explicit build function.
    #[must_use]
    pub fn from_fn<C, F>(build: F) -> ConstructorBuilder<C>
    where
        C: Any,
        F: Fn(&Configuration) -> Result<C, BoxError> + Send + Sync + 'static,
    {
        ConstructorBuilder::new(Arc::new(move |configuration: &Configuration| {
            build(configuration).map(|component| Box::new(component) as Instance)
        }))
    }

    /// Returns the [`TypeId`] of the concrete component type.
    #[must_use]
    pub const fn component_type_id(&self) -> TypeId {
        self.component
    }

    /// Returns the fully qualified component type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the component type name without its module path or generic
    /// arguments, e.g. `Circle` for `shapes::round::Circle<f32>`.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let base = self
            .type_name
            .split_once('<')
            .map_or(self.type_name, |(head, _)| head);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Returns the capabilities this constructor satisfies, universal first.
    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.bindings.iter().map(|binding| binding.capability)
    }

    /// Returns `true` when the component satisfies `capability`.
    #[must_use]
    pub fn satisfies(&self, capability: &Capability) -> bool {
        self.bindings
            .iter()
            .any(|binding| binding.capability == *capability)
    }

    /// Returns this constructor with the capabilities `other` declares and
    /// this one lacks, or `None` when `other` adds nothing.
    ///
    /// Both constructors must build the same component type; the build
    /// function of `self` is kept.
    #[must_use]
    pub fn extended_with(&self, other: &Self) -> Option<Self> {
        if self.component != other.component {
            return None;
        }
        let added: Vec<Binding> = other
            .bindings
            .iter()
            .filter(|binding| !self.satisfies(&binding.capability))
            .cloned()
            .collect();
        if added.is_empty() {
            return None;
        }
        Some(Self {
            bindings: self.bindings.iter().cloned().chain(added).collect(),
            ..self.clone()
        })
    }

    /// Builds a new component instance.
    ///
    /// # Errors
    ///
    /// Returns whatever error the underlying build function raises; for
    /// deserializing constructors this is the `serde_json` error describing
    /// the configuration mismatch.
    pub fn construct(&self, configuration: &Configuration) -> Result<Instance, BoxError> {
        (self.build)(configuration)
    }

    /// Coerces an instance built by this constructor into `capability`.
    ///
    /// On success the returned instance holds a `Box<T>` for the capability
    /// type `T`. The original instance is handed back when the capability is
    /// not declared or the instance was built by a different constructor.
    ///
    /// # Errors
    ///
    /// Returns the unchanged instance when the coercion is not possible.
    pub fn upcast(&self, capability: &Capability, instance: Instance) -> Result<Instance, Instance> {
        let Some(binding) = self
            .bindings
            .iter()
            .find(|binding| binding.capability == *capability)
        else {
            return Err(instance);
        };
        (binding.upcast)(instance)
    }
}

/// Deserializes `C` from named fields, falling back to `null` when the
/// configuration is empty and `C` does not take a map.
fn from_configuration<C: DeserializeOwned>(
    configuration: &Configuration,
) -> Result<C, serde_json::Error> {
    let fields = serde_json::Value::Object(configuration.clone());
    serde_json::from_value(fields).or_else(|err| {
        if configuration.is_empty() {
            serde_json::from_value(serde_json::Value::Null).map_err(|_| err)
        } else {
            Err(err)
        }
    })
}

impl PartialEq for Constructor {
    fn eq(&self, other: &Self) -> bool {
        self.component == other.component
    }
}

impl Eq for Constructor {}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("type_name", &self.type_name)
            .field(
                "capabilities",
                &self
                    .capabilities()
                    .map(|capability| capability.type_name())
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// Builder that declares the capabilities of a component type `C`.
pub struct ConstructorBuilder<C> {
    build: Arc<BuildFn>,
    bindings: Vec<Binding>,
    component: PhantomData<fn() -> C>,
}

impl<C: Any> ConstructorBuilder<C> {
    fn new(build: Arc<BuildFn>) -> Self {
        Self {
            build,
            bindings: vec![Binding::universal()],
            component: PhantomData,
        }
    }

    /// Declares that `C` satisfies capability `T`.
    ///
    /// The coercion is usually the identity closure, relying on unsized
    /// coercion: `.implements::<dyn Shape>(|circle| circle)`. Declaring the
    /// same capability twice keeps the first coercion.
    #[must_use]
    pub fn implements<T: ?Sized + 'static>(mut self, upcast: fn(Box<C>) -> Box<T>) -> Self {
        let capability = Capability::of::<T>();
        if self
            .bindings
            .iter()
            .any(|binding| binding.capability == capability)
        {
            return self;
        }
        self.bindings.push(Binding {
            capability,
            upcast: Arc::new(move |instance: Instance| -> Result<Instance, Instance> {
                let component = instance.downcast::<C>()?;
                Ok(Box::new(upcast(component)) as Instance)
            }),
        });
        self
    }

    /// Finishes the constructor.
    #[must_use]
    pub fn build(self) -> Constructor {
        Constructor {
            component: TypeId::of::<C>(),
            type_name: std::any::type_name::<C>(),
            build: self.build,
            bindings: self.bindings.into(),
        }
    }
}

impl<C: Any> From<ConstructorBuilder<C>> for Constructor {
    fn from(builder: ConstructorBuilder<C>) -> Self {
        builder.build()
    }
}
