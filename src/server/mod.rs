//! HTTP server assembly
//!
//! [`ServerBuilder`] registers the dish and order resources, adds the health
//! routes and fallbacks, and serves the result with graceful shutdown.

pub mod builder;
pub mod entity_registry;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
