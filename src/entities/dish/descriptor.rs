//! Entity descriptor for Dish

use super::handlers::{DishAppState, create_dish, list_dishes, read_dish, update_dish};
use super::DishStore;
use super::model::Dish;
use crate::core::store::Record;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::router::method_not_allowed;
use axum::{Router, routing::get};

/// Descriptor for the Dish entity
///
/// Dishes cannot be deleted; `DELETE` answers 405 like any other
/// unsupported method.
pub struct DishDescriptor {
    pub store: DishStore,
}

impl DishDescriptor {
    pub fn new(store: DishStore) -> Self {
        Self { store }
    }
}

impl EntityDescriptor for DishDescriptor {
    fn entity_type(&self) -> &str {
        "dish"
    }

    fn plural(&self) -> &str {
        Dish::resource_name()
    }

    fn build_routes(&self) -> Router {
        let state = DishAppState::new(self.store.clone());

        Router::new()
            .route(
                "/dishes",
                get(list_dishes)
                    .post(create_dish)
                    .fallback(method_not_allowed),
            )
            .route(
                "/dishes/{dish_id}",
                get(read_dish)
                    .put(update_dish)
                    .fallback(method_not_allowed),
            )
            .with_state(state)
    }
}
