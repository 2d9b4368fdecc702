//! Notification endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::{OrderId, TraceContext};
use serde::{Deserialize, Serialize};

use crate::outbox::Outbox;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    pub email: String,
    pub order_id: OrderId,
}

#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub status: &'static str,
    pub email: String,
}

/// POST /notify — send the order confirmation email.
#[tracing::instrument(
    name = "send_notification",
    skip_all,
    fields(
        trace_id = %trace.trace_id(),
        notification.type = "email",
        notification.recipient = tracing::field::Empty,
    )
)]
pub async fn notify(
    State(outbox): State<Arc<Outbox>>,
    trace: TraceContext,
    Json(req): Json<NotifyRequest>,
) -> Json<NotifyResponse> {
    tracing::Span::current().record("notification.recipient", req.email.as_str());
    tracing::info!(order_id = %req.order_id, "sending order confirmation");

    let sent = outbox.send(req.email, req.order_id);
    metrics::counter!("notifications_sent_total").increment(1);

    Json(NotifyResponse {
        status: "SENT",
        email: sent.email,
    })
}
