//! Order entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::OrderDescriptor;
pub use handlers::*;
pub use model::{Order, OrderDraft, OrderLine, OrderStatus};

use crate::core::store::RecordStore;

/// In-memory store for Order records
pub type OrderStore = RecordStore<Order>;
