//! # bistro-api
//!
//! An in-memory REST API for a restaurant's dishes and orders.
//!
//! Every endpoint runs an ordered [`Pipeline`](core::pipeline::Pipeline) of
//! validation and lookup [`Step`](core::pipeline::Step)s before its handler
//! touches the store. The first failing step answers the request with a
//! typed [`BistroError`](core::error::BistroError); later steps and the
//! handler never run.
//!
//! ## Resources
//!
//! - **Dishes**: list, create, read, update. Dishes are never deleted.
//! - **Orders**: list, create, read, update, and delete while still pending.
//!
//! Request bodies are wrapped as `{ "data": { ... } }` and successful
//! responses as `{ "data": ... }`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bistro::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::from_env()?;
//!     ServerBuilder::new()
//!         .with_config(&config)?
//!         .serve(&config.address())
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            BistroError, BistroResult, ConfigError, EntityError, ErrorResponse, QuantityProblem,
            RequestError, ValidationError,
        },
        id::{IdGenerator, RecordId},
        payload::{Envelope, Payload},
        pipeline::{Pipeline, RequestContext, Step},
        store::{Collection, Record, RecordStore, ResourceExists},
        validation::*,
    };

    // === Macros ===
    pub use crate::impl_record;

    // === Resources ===
    pub use crate::entities::{
        dish::{Dish, DishDescriptor, DishDraft, DishStore},
        order::{Order, OrderDescriptor, OrderDraft, OrderLine, OrderStatus, OrderStore},
    };

    // === Config ===
    pub use crate::config::{CONFIG_ENV_VAR, SeedData, ServerConfig, ServiceConfig};

    // === Server ===
    pub use crate::server::{
        EntityDescriptor, EntityRegistry, ServerBuilder,
        router::{SERVICE_NAME, handle_panic, method_not_allowed, route_not_found},
    };
}
