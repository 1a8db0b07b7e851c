//! Registry of resource descriptors and their CRUD routes

use axum::Router;
use std::collections::BTreeMap;

/// Describes how one resource mounts its routes
///
/// Dish and Order each implement this; the server merges whatever is
/// registered.
pub trait EntityDescriptor: Send + Sync {
    /// Singular name (e.g. "dish")
    fn entity_type(&self) -> &str;

    /// Plural name, also the collection path segment (e.g. "dishes")
    fn plural(&self) -> &str;

    /// Routes for `/{plural}` and `/{plural}/{id}`, state already applied
    fn build_routes(&self) -> Router;
}

/// All resources served by the application, keyed by entity type
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor; a second one for the same type replaces the first
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        if self.descriptors.contains_key(&entity_type) {
            tracing::warn!(entity_type = %entity_type, "replacing registered resource");
        }
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Merge the routes of every registered resource
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                tracing::debug!(resource = descriptor.plural(), "mounting resource routes");
                router.merge(descriptor.build_routes())
            })
    }

    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }

    /// Collection path segments, sorted by entity type
    pub fn resources(&self) -> Vec<&str> {
        self.descriptors.values().map(|d| d.plural()).collect()
    }
}
