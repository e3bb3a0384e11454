//! Samovar: a runtime component registry and factory.
//!
//! Components are discovered by loaders, recorded under a composite key of
//! `(key, library, label)`, and later resolved and instantiated on demand
//! with named configuration parameters. A factory can additionally be
//! constrained to components satisfying a capability such as a trait object.
//!
//! # Architecture
//!
//! Samovar follows hexagonal architecture principles:
//!
//! - **Domain**: entries, names, capabilities, and type-erased constructors
//! - **Ports**: the loader contract discovery mechanisms implement
//! - **Adapters**: module-tree and link-time loaders
//! - **Services**: the shared registry and the factories reading from it
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use samovar::domain::Constructor;
//! use samovar::services::{CreateRequest, Registry, TypedFactory};
//!
//! trait Shape {
//!     fn area(&self) -> u64;
//! }
//!
//! #[derive(serde::Deserialize)]
//! struct Square {
//!     side: u64,
//! }
//!
//! impl Shape for Square {
//!     fn area(&self) -> u64 {
//!         self.side * self.side
//!     }
//! }
//!
//! let registry = Arc::new(Registry::new());
//! let square = Constructor::deserialize::<Square>()
//!     .implements::<dyn Shape>(|square| square)
//!     .build();
//! registry.register("square", square, Some("geometry"), None);
//!
//! let shapes = TypedFactory::<dyn Shape>::new(registry);
//! let mut configuration = serde_json::Map::new();
//! configuration.insert("side".to_owned(), 3.into());
//! let shape = shapes.create(CreateRequest::new("Square").with_configuration(configuration))?;
//! assert_eq!(shape.area(), 9);
//! # Ok::<(), samovar::services::FactoryError>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
