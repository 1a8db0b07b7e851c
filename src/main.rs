//! bistro-api server binary
//!
//! Reads the optional YAML file named by `BISTRO_CONFIG`, seeds the stores
//! and serves the dish and order API until Ctrl+C or SIGTERM.

use anyhow::Result;
use bistro::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServiceConfig::from_env()?;
    let addr = config.address();

    println!("🍽️  Starting {}", SERVICE_NAME);
    println!("\n📚 Routes:");
    println!("    GET    /dishes              - List all dishes");
    println!("    POST   /dishes              - Create a dish");
    println!("    GET    /dishes/{{dishId}}     - Get a dish");
    println!("    PUT    /dishes/{{dishId}}     - Update a dish");
    println!("    GET    /orders              - List all orders");
    println!("    POST   /orders              - Create an order");
    println!("    GET    /orders/{{orderId}}    - Get an order");
    println!("    PUT    /orders/{{orderId}}    - Update an order");
    println!("    DELETE /orders/{{orderId}}    - Delete a pending order");
    println!("    GET    /health              - Health check");
    println!("\n🌐 Server running on http://{}", addr);

    ServerBuilder::new()
        .with_config(&config)?
        .serve(&addr)
        .await
}
