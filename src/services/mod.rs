//! Registry and factory services.
//!
//! [`Registry`] stores entries and serves plain and capability-filtered
//! views. [`Factory`] and [`TypedFactory`] resolve exactly one entry from
//! those views and build it.

mod error;
mod factory;
mod options;
mod registry;
mod typed;

pub use error::{FactoryError, FactoryResult};
pub use factory::{CreateRequest, Factory};
pub use options::{CacheMode, RegistryOptions};
pub use registry::Registry;
pub use typed::TypedFactory;
