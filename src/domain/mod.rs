//! Domain model for component registration.
//!
//! The domain holds the value types the registry stores and the factories
//! resolve: normalized names, capability constraints, type-erased
//! constructors, and the entries binding them together. Nothing here knows
//! how components are discovered or how lookups are shared across threads.

mod capability;
mod constructor;
mod entry;
mod name;

pub use capability::Capability;
pub use constructor::{BoxError, Configuration, Constructor, ConstructorBuilder, Instance};
pub use entry::Entry;
pub use name::Name;
