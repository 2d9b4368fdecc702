//! Notification service.

pub mod outbox;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub use outbox::{Outbox, SentNotification};

/// Creates the notification service router.
pub fn create_app(outbox: Arc<Outbox>) -> Router {
    Router::new()
        .route("/health", get(common::health::check))
        .route("/notify", post(routes::notify))
        .with_state(outbox)
        .layer(TraceLayer::new_for_http())
}
