//! Seed catalog loading from config.toml
//!
//! This module loads the services and products used to seed an empty database.
//! The file is optional: when it is missing, the built-in price list from
//! [`default_services`] is used and no products are seeded.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Services to seed into an empty price list
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
    /// Products to seed into an empty inventory
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

/// Configuration for a single catalog service
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Vehicle category (e.g., "Sport")
    pub category: String,
    /// Service name (e.g., "Premium Sport")
    pub name: String,
    /// Starting price
    pub price: f64,
}

/// Configuration for a single inventory product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Product name
    pub name: String,
    /// Unit of measure
    pub unit: String,
    /// Stock on hand when seeded
    #[serde(default)]
    pub stock: f64,
    /// Cost of one purchase
    pub purchase_cost: f64,
    /// Units per purchase
    pub purchase_quantity: f64,
    /// Mean units used by one wash
    pub usage_per_wash: f64,
    /// Reorder threshold
    #[serde(default = "default_reorder_point")]
    pub reorder_point: f64,
}

const fn default_reorder_point() -> f64 {
    crate::core::inventory::DEFAULT_REORDER_POINT
}

/// The price list the shop opens with.
#[must_use]
pub fn default_services() -> Vec<ServiceConfig> {
    [
        ("Naked", "Standard Naked", 50.0),
        ("Naked", "Premium Naked", 90.0),
        ("Sport", "Standard Sport", 70.0),
        ("Sport", "Premium Sport", 120.0),
        ("Custom", "Standard Custom", 80.0),
        ("Custom", "Premium Custom", 150.0),
        ("BigTrail", "Standard Trail", 60.0),
        ("BigTrail", "Premium Trail", 110.0),
    ]
    .into_iter()
    .map(|(category, name, price)| ServiceConfig {
        category: category.to_string(),
        name: name.to_string(),
        price,
    })
    .collect()
}

/// Loads the seed catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads ./config.toml if present, otherwise the built-in defaults.
///
/// An empty `services` list in the file also falls back to the defaults, so the
/// price list is never seeded empty.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    let mut config = if path.exists() {
        debug!("Loading seed catalog from {}", path.display());
        load_config(path)?
    } else {
        info!("No config.toml found, using built-in price list");
        Config::default()
    };

    if config.services.is_empty() {
        config.services = default_services();
    }
    Ok(config)
}
