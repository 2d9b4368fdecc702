//! Liveness endpoint shared by every service.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health — always reports `UP` while the process serves requests.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}
