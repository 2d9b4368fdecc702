//! Inventory error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::Sku;
use thiserror::Error;

/// Why a reservation batch was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// The named SKU is unknown, exhausted, short of the requested
    /// quantity, or the always-failing sentinel.
    #[error("Item {sku} out of stock")]
    OutOfStock { sku: Sku },
}

impl ReservationError {
    /// The SKU that caused the rejection.
    pub fn sku(&self) -> &Sku {
        match self {
            Self::OutOfStock { sku } => sku,
        }
    }
}

/// Errors reading the service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid INVENTORY_STOCK entry '{0}', expected SKU=quantity")]
    InvalidStockEntry(String),
}

impl IntoResponse for ReservationError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "message": self.to_string() });
        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}
