//! Capability constraints used to narrow candidate constructors.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A type or trait-object requirement a constructor can satisfy.
///
/// Capabilities are identified by [`TypeId`]. The type name is carried only
/// for diagnostics and does not take part in equality.
#[derive(Debug, Clone, Copy)]
pub struct Capability {
    type_id: TypeId,
    type_name: &'static str,
}

impl Capability {
    /// Returns the capability describing `T`, typically a trait object such
    /// as `dyn Shape`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns the top capability, satisfied by every constructor.
    #[must_use]
    pub fn universal() -> Self {
        Self::of::<dyn Any>()
    }

    /// Returns `true` for the top capability.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.type_id == TypeId::of::<dyn Any>()
    }

    /// Returns the underlying type identifier.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the fully qualified type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl Default for Capability {
    fn default() -> Self {
        Self::universal()
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Capability {}

impl Hash for Capability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}
