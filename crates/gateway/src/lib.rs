//! API gateway for order placement.
//!
//! Exposes `POST /api/orders`, which fans a single request out to the
//! inventory, order and notification services in sequence, plus `/health`
//! and Prometheus `/metrics`.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use orchestrator::{
    DownstreamClient, HttpInventoryService, HttpNotificationService, HttpOrderService,
    OrderOrchestrator,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/health", get(common::health::check))
        .route("/api/orders", post(routes::orders::place))
        .with_state(state)
        .merge(common::metrics::router(metrics_handle))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state with HTTP clients for every downstream service.
pub fn create_state(config: &Config) -> Arc<AppState> {
    let client = DownstreamClient::new();
    let orchestrator = OrderOrchestrator::new(
        HttpInventoryService::new(client.clone(), config.inventory_service_url.clone()),
        HttpOrderService::new(client.clone(), config.order_service_url.clone()),
        HttpNotificationService::new(client, config.notification_service_url.clone()),
    );

    Arc::new(AppState { orchestrator })
}
