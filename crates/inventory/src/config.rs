//! Inventory service configuration loaded from environment variables.

use common::ServerConfig;

use crate::error::ConfigError;
use crate::stock::{DEFAULT_STOCK, StockTable};

/// Inventory service configuration.
///
/// Besides the shared listener settings, reads `INVENTORY_STOCK` as a
/// comma-separated list of `SKU=quantity` pairs (default: `SKU123=10,SKU456=5`).
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub initial_stock: Vec<(String, u32)>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let initial_stock = match std::env::var("INVENTORY_STOCK") {
            Ok(raw) => parse_stock(&raw)?,
            Err(_) => default_stock(),
        };
        Ok(Self {
            server: ServerConfig::from_env("inventory-service", 8081),
            initial_stock,
        })
    }

    /// Builds the stock table this configuration describes.
    pub fn stock_table(&self) -> StockTable {
        self.initial_stock
            .iter()
            .map(|(sku, qty)| (sku.as_str(), *qty))
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::new("inventory-service", 8081),
            initial_stock: default_stock(),
        }
    }
}

fn default_stock() -> Vec<(String, u32)> {
    DEFAULT_STOCK
        .iter()
        .map(|(sku, qty)| ((*sku).to_string(), *qty))
        .collect()
}

/// Parses `SKU=quantity` pairs separated by commas. Blank entries are skipped.
pub fn parse_stock(raw: &str) -> Result<Vec<(String, u32)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = || ConfigError::InvalidStockEntry(entry.to_string());
            let (sku, qty) = entry.split_once('=').ok_or_else(invalid)?;
            let sku = sku.trim();
            if sku.is_empty() {
                return Err(invalid());
            }
            let qty = qty.trim().parse().map_err(|_| invalid())?;
            Ok((sku.to_string(), qty))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.service_name, "inventory-service");

        let stock = config.stock_table();
        assert_eq!(stock.available("SKU123"), Some(10));
        assert_eq!(stock.available("SKU456"), Some(5));
    }

    #[test]
    fn test_parse_stock() {
        let parsed = parse_stock(" A=1, B = 20 ,,").unwrap();
        assert_eq!(parsed, vec![("A".to_string(), 1), ("B".to_string(), 20)]);
    }

    #[test]
    fn test_parse_stock_rejects_bad_entries() {
        for raw in ["A", "A=x", "=3", "A=-1"] {
            assert!(
                matches!(parse_stock(raw), Err(ConfigError::InvalidStockEntry(_))),
                "accepted {raw:?}"
            );
        }
    }
}
