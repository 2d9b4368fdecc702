//! Listener configuration and graceful-shutdown serving shared by every service binary.

use axum::Router;
use tokio::signal;

/// Listener settings common to every service.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: per service)
/// - `SERVICE_NAME` — name reported in logs and traces (default: per service)
/// - `OTLP_EXPORTER_ENDPOINT` — trace collector endpoint (default: `"http://jaeger:4317"`)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    pub otlp_endpoint: String,
}

/// Default trace collector endpoint.
pub const DEFAULT_OTLP_ENDPOINT: &str = "http://jaeger:4317";

impl ServerConfig {
    /// Built-in defaults for a service, ignoring the environment.
    pub fn new(service_name: &str, port: u16) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port,
            service_name: service_name.to_string(),
            otlp_endpoint: DEFAULT_OTLP_ENDPOINT.to_string(),
        }
    }

    /// Loads configuration from environment variables, falling back to the
    /// given service defaults.
    pub fn from_env(default_service_name: &str, default_port: u16) -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(default_port),
            service_name: std::env::var("SERVICE_NAME")
                .unwrap_or_else(|_| default_service_name.to_string()),
            otlp_endpoint: std::env::var("OTLP_EXPORTER_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_OTLP_ENDPOINT.to_string()),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Binds the configured address and serves `app` until SIGINT or SIGTERM.
pub async fn serve(config: &ServerConfig, app: Router) -> std::io::Result<()> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, service = %config.service_name, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(service = %config.service_name, "server shut down gracefully");
    Ok(())
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_defaults() {
        let config = ServerConfig::new("inventory-service", 8081);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8081);
        assert_eq!(config.service_name, "inventory-service");
        assert_eq!(config.otlp_endpoint, DEFAULT_OTLP_ENDPOINT);
    }

    #[test]
    fn test_addr_formatting() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..ServerConfig::new("api-gateway", 8080)
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
