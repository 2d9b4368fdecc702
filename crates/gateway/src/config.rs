//! Application configuration loaded from environment variables.

use common::ServerConfig;

/// Default in-cluster address of the inventory service.
pub const DEFAULT_INVENTORY_SERVICE_URL: &str = "http://inventory-service:8081";
/// Default in-cluster address of the order service.
pub const DEFAULT_ORDER_SERVICE_URL: &str = "http://order-service:8082";
/// Default in-cluster address of the notification service.
pub const DEFAULT_NOTIFICATION_SERVICE_URL: &str = "http://notification-service:8083";

/// Gateway configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`, `PORT` (default `8080`), `SERVICE_NAME` (default `"api-gateway"`),
///   `OTLP_EXPORTER_ENDPOINT` — see [`ServerConfig`]
/// - `INVENTORY_SERVICE_URL` — inventory base URL
/// - `ORDER_SERVICE_URL` — order service base URL
/// - `NOTIFICATION_SERVICE_URL` — notification service base URL
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub inventory_service_url: String,
    pub order_service_url: String,
    pub notification_service_url: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env("api-gateway", 8080),
            inventory_service_url: env_or("INVENTORY_SERVICE_URL", DEFAULT_INVENTORY_SERVICE_URL),
            order_service_url: env_or("ORDER_SERVICE_URL", DEFAULT_ORDER_SERVICE_URL),
            notification_service_url: env_or(
                "NOTIFICATION_SERVICE_URL",
                DEFAULT_NOTIFICATION_SERVICE_URL,
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::new("api-gateway", 8080),
            inventory_service_url: DEFAULT_INVENTORY_SERVICE_URL.to_string(),
            order_service_url: DEFAULT_ORDER_SERVICE_URL.to_string(),
            notification_service_url: DEFAULT_NOTIFICATION_SERVICE_URL.to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
