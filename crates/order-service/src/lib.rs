//! Order service.
//!
//! Accepts orders whose inventory has already been reserved and assigns each
//! one a unique ID.

pub mod book;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub use book::{CreatedOrder, OrderBook};

/// Creates the order service router.
pub fn create_app(book: Arc<OrderBook>) -> Router {
    Router::new()
        .route("/health", get(common::health::check))
        .route("/orders", post(routes::create))
        .with_state(book)
        .layer(TraceLayer::new_for_http())
}
