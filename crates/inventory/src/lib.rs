//! Inventory service.
//!
//! Holds the stock table and decides, item by item, whether a reservation
//! batch can be honoured. See [`StockTable::reserve`] for the exact policy.

pub mod config;
pub mod error;
pub mod routes;
pub mod stock;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{ConfigError, ReservationError};
pub use stock::{DEFAULT_STOCK, OUT_OF_STOCK_SKU, StockTable};

/// Creates the inventory router over a shared stock table.
pub fn create_app(stock: Arc<StockTable>) -> Router {
    Router::new()
        .route("/health", get(common::health::check))
        .route("/inventory/reserve", post(routes::reserve))
        .with_state(stock)
        .layer(TraceLayer::new_for_http())
}
