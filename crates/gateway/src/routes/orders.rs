//! Order placement endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use common::{LineItem, OrderId, TraceContext, UserId};
use orchestrator::{
    HttpInventoryService, HttpNotificationService, HttpOrderService, OrderOrchestrator, PlaceOrder,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Orchestrator wired to the downstream services over HTTP.
pub type GatewayOrchestrator =
    OrderOrchestrator<HttpInventoryService, HttpOrderService, HttpNotificationService>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub orchestrator: GatewayOrchestrator,
}

// -- Request types --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub user_id: UserId,
    pub items: Vec<LineItem>,
    pub email: String,
}

impl From<PlaceOrderRequest> for PlaceOrder {
    fn from(req: PlaceOrderRequest) -> Self {
        PlaceOrder {
            user_id: req.user_id,
            items: req.items,
            email: req.email,
        }
    }
}

// -- Response types --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlacedResponse {
    pub order_id: OrderId,
    pub status: &'static str,
    pub trace_id: String,
}

// -- Handlers --

/// POST /api/orders — reserve stock, create the order, notify the customer.
#[tracing::instrument(skip_all, fields(trace_id = %trace.trace_id()))]
pub async fn place(
    State(state): State<Arc<AppState>>,
    trace: TraceContext,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderPlacedResponse>), ApiError> {
    let Json(req) = payload.map_err(|rejection| ApiError::BadRequest {
        message: rejection.body_text(),
        trace_id: trace.trace_id().to_string(),
    })?;

    let placed = state
        .orchestrator
        .place_order(&trace, &PlaceOrder::from(req))
        .await?;

    let response = OrderPlacedResponse {
        order_id: placed.order_id,
        status: "CREATED",
        trace_id: placed.trace_id,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
