//! Configuration loading and management
//!
//! Everything is optional: an empty file, or no file at all, yields a server
//! on `127.0.0.1:5000` with empty stores.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! seed:
//!   dishes:
//!     - id: 1
//!       name: Taco
//!       description: Corn tortilla, carnitas
//!       price: 5
//!       image_url: https://example.com/taco.png
//!   orders:
//!     - id: 1
//!       deliverTo: 308 Negra Arroyo Lane
//!       mobileNumber: (505) 143-3369
//!       status: pending
//!       dishes:
//!         - quantity: 2
//!           id: 1
//!           name: Taco
//! ```

use crate::core::error::{BistroError, BistroResult, ConfigError};
use crate::entities::{Dish, Order};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Environment variable holding the path of the YAML config file
pub const CONFIG_ENV_VAR: &str = "BISTRO_CONFIG";

/// Listening address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Records loaded into the stores at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub dishes: Vec<Dish>,

    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Complete configuration of the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub seed: SeedData,
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> BistroResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: format!("{}: {}", path.display(), e),
        })?;

        Self::parse(&content).map_err(|e| {
            BistroError::Config(ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            })
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> BistroResult<Self> {
        Ok(Self::parse(yaml)?)
    }

    /// Load from the file named by `BISTRO_CONFIG`, or fall back to defaults
    pub fn from_env() -> BistroResult<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => {
                tracing::info!(path = %path, "loading configuration");
                Self::from_yaml_file(path)
            }
            _ => {
                tracing::info!("no {} set, using default configuration", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }

    fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // serde_yaml reads an empty document as null
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Check seed data against the rules the API itself enforces
    pub fn validate(&self) -> BistroResult<()> {
        unique_ids("seed.dishes", self.seed.dishes.iter().map(|d| d.id))?;
        unique_ids("seed.orders", self.seed.orders.iter().map(|o| o.id))?;
        // dishes and orders share one id sequence
        unique_ids(
            "seed",
            self.seed
                .dishes
                .iter()
                .map(|d| d.id)
                .chain(self.seed.orders.iter().map(|o| o.id)),
        )?;

        for dish in &self.seed.dishes {
            if dish.price == 0 {
                return Err(invalid(
                    format!("seed.dishes[id={}].price", dish.id),
                    "0",
                    "price must be an integer greater than 0",
                ));
            }
        }

        for order in &self.seed.orders {
            if order.dishes.is_empty() {
                return Err(invalid(
                    format!("seed.orders[id={}].dishes", order.id),
                    "[]",
                    "an order must include at least one dish",
                ));
            }
            if let Some(index) = order.dishes.iter().position(|line| line.quantity == 0) {
                return Err(invalid(
                    format!("seed.orders[id={}].dishes[{}].quantity", order.id, index),
                    "0",
                    "quantity must be an integer greater than 0",
                ));
            }
        }

        Ok(())
    }

    /// `host:port` for binding the listener
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn unique_ids(field: &str, ids: impl Iterator<Item = u64>) -> BistroResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(invalid(field.to_string(), &id.to_string(), "duplicate id"));
        }
    }
    Ok(())
}

fn invalid(field: String, value: &str, message: &str) -> BistroError {
    BistroError::Config(ConfigError::InvalidValue {
        field,
        value: value.to_string(),
        message: message.to_string(),
    })
}
