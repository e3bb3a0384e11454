//! Loader implementations.
//!
//! - [`manifest`]: walks an explicitly declared module tree
//! - [`distributed`]: enumerates components registered at link time

pub mod distributed;
pub mod manifest;

pub use distributed::{COMPONENTS, ComponentDescriptor, DistributedLoader};
pub use manifest::{ManifestLoader, Module};
