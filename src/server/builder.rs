//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::router::{handle_panic, health_routes, route_not_found};
use crate::config::ServiceConfig;
use crate::core::error::BistroResult;
use crate::core::id::SharedIdGenerator;
use crate::core::store::Record;
use crate::entities::dish::{DishDescriptor, DishStore};
use crate::entities::order::{OrderDescriptor, OrderStore};
use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Builder for the bistro HTTP application
///
/// Dishes and orders draw their ids from one shared generator, so no two
/// records of either kind ever share an id.
///
/// # Example
///
/// ```ignore
/// let config = ServiceConfig::from_env()?;
/// ServerBuilder::new()
///     .with_config(&config)?
///     .serve(&config.address())
///     .await?;
/// ```
pub struct ServerBuilder {
    dishes: DishStore,
    orders: OrderStore,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a builder with empty stores
    pub fn new() -> Self {
        let ids = SharedIdGenerator::new();
        Self {
            dishes: DishStore::with_shared_ids(Vec::new(), ids.clone()),
            orders: OrderStore::with_shared_ids(Vec::new(), ids),
            custom_routes: Vec::new(),
        }
    }

    /// Validate the configuration and seed both stores from it
    pub fn with_config(self, config: &ServiceConfig) -> BistroResult<Self> {
        config.validate()?;

        tracing::info!(
            dishes = config.seed.dishes.len(),
            orders = config.seed.orders.len(),
            "seeding stores"
        );

        let highest = config
            .seed
            .dishes
            .iter()
            .map(Record::id)
            .chain(config.seed.orders.iter().map(Record::id))
            .max()
            .unwrap_or_default();
        let ids = SharedIdGenerator::starting_after(highest);

        Ok(self
            .with_dish_store(DishStore::with_shared_ids(
                config.seed.dishes.clone(),
                ids.clone(),
            ))
            .with_order_store(OrderStore::with_shared_ids(
                config.seed.orders.clone(),
                ids,
            )))
    }

    /// Serve dishes from an existing store handle
    ///
    /// The store keeps its own id generator.
    pub fn with_dish_store(mut self, store: DishStore) -> Self {
        self.dishes = store;
        self
    }

    /// Serve orders from an existing store handle
    ///
    /// The store keeps its own id generator.
    pub fn with_order_store(mut self, store: OrderStore) -> Self {
        self.orders = store;
        self
    }

    /// Add routes that are not part of a resource
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    pub fn dish_store(&self) -> &DishStore {
        &self.dishes
    }

    pub fn order_store(&self) -> &OrderStore {
        &self.orders
    }

    fn registry(&self) -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(DishDescriptor::new(self.dishes.clone())));
        registry.register(Box::new(OrderDescriptor::new(self.orders.clone())));
        registry
    }

    /// Build the final router
    ///
    /// Resource routes, health routes and custom routes are merged; unknown
    /// paths fall back to a 404, every request gets a trace span, and handler
    /// panics are turned into 500 responses.
    pub fn build(self) -> Result<Router> {
        let registry = self.registry();
        tracing::debug!(resources = ?registry.resources(), "building router");

        let mut app = health_routes().merge(registry.build_routes());
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app
            .fallback(route_not_found)
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
