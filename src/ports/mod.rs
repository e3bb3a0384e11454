//! Port contracts for component discovery.
//!
//! Ports define the interface the registry needs from whatever mechanism
//! enumerates component types, without committing to how they are found.

pub mod loader;

pub use loader::{DiscoveredComponent, DiscoveryError, DiscoveryResult, Loader};
