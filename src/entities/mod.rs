//! Entities module - the restaurant's resources

#[macro_use]
pub mod macros;

pub mod dish;
pub mod order;

// Re-export models for convenience
pub use dish::{Dish, DishStore};
pub use order::{Order, OrderLine, OrderStatus, OrderStore};
