//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orchestrator::OrchestrationError;
use serde::Serialize;

/// API-level error type that maps to HTTP responses.
///
/// Every variant carries the trace ID so the body never omits it.
#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be read as an order.
    BadRequest { message: String, trace_id: String },
    /// A downstream step failed.
    Orchestration(OrchestrationError),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
    pub error: String,
    pub trace_id: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest { message, trace_id } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message,
                    error: "Invalid request body".to_string(),
                    trace_id,
                },
            ),
            ApiError::Orchestration(err) => {
                let status = StatusCode::from_u16(err.status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (
                    status,
                    ErrorBody {
                        message: err.message(),
                        error: format!("Order processing failed at {}", err.step),
                        trace_id: err.trace_id,
                    },
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<OrchestrationError> for ApiError {
    fn from(err: OrchestrationError) -> Self {
        ApiError::Orchestration(err)
    }
}
