//! Order creation endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::{LineItem, OrderId, TraceContext, UserId};
use serde::{Deserialize, Serialize};

use crate::book::OrderBook;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    pub order_id: OrderId,
    pub status: &'static str,
}

/// POST /orders — create an order and return its assigned ID.
#[tracing::instrument(
    name = "process_order",
    skip_all,
    fields(
        trace_id = %trace.trace_id(),
        user.id = tracing::field::Empty,
        order.id = tracing::field::Empty,
    )
)]
pub async fn create(
    State(book): State<Arc<OrderBook>>,
    trace: TraceContext,
    Json(req): Json<CreateOrderRequest>,
) -> Json<OrderCreatedResponse> {
    let span = tracing::Span::current();
    span.record("user.id", tracing::field::display(&req.user_id));

    let order = book.create(req.user_id, req.items);
    span.record("order.id", tracing::field::display(&order.order_id));

    metrics::counter!("orders_created_total").increment(1);
    tracing::info!(items = order.items.len(), "order_processed");

    Json(OrderCreatedResponse {
        order_id: order.order_id,
        status: "CREATED",
    })
}
