//! Reservation endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::{LineItem, TraceContext};
use serde::{Deserialize, Serialize};

use crate::error::ReservationError;
use crate::stock::StockTable;

#[derive(Debug, Deserialize)]
pub struct ReserveRequest {
    pub items: Vec<LineItem>,
}

#[derive(Debug, Serialize)]
pub struct ReservedResponse {
    pub status: &'static str,
}

/// POST /inventory/reserve — reserve every requested item or report the first
/// one that is out of stock.
#[tracing::instrument(name = "reserve_inventory", skip_all, fields(trace_id = %trace.trace_id()))]
pub async fn reserve(
    State(stock): State<Arc<StockTable>>,
    trace: TraceContext,
    Json(req): Json<ReserveRequest>,
) -> Result<Json<ReservedResponse>, ReservationError> {
    tracing::info!(items.count = req.items.len(), "inventory_checked");

    match stock.reserve(&req.items) {
        Ok(()) => {
            metrics::counter!("inventory_reservations_total", "outcome" => "reserved").increment(1);
            Ok(Json(ReservedResponse { status: "RESERVED" }))
        }
        Err(e) => {
            metrics::counter!("inventory_reservations_total", "outcome" => "rejected").increment(1);
            tracing::error!(error = true, sku = %e.sku(), "{e}");
            Err(e)
        }
    }
}
