//! Dish entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::DishDescriptor;
pub use handlers::*;
pub use model::{Dish, DishDraft};

use crate::core::store::RecordStore;

/// In-memory store for Dish records
pub type DishStore = RecordStore<Dish>;
