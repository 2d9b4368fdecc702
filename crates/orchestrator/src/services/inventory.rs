//! Inventory service trait, HTTP client and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::{LineItem, TraceContext};
use inventory::StockTable;
use parking_lot::RwLock;
use reqwest::StatusCode;
use serde::Serialize;

use super::http::{DownstreamClient, endpoint};
use crate::error::CallError;

/// Trait for inventory reservation.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Reserves stock for every item, or fails naming why.
    async fn reserve(&self, ctx: &TraceContext, items: &[LineItem]) -> Result<(), CallError>;
}

#[derive(Serialize)]
struct ReserveBody<'a> {
    items: &'a [LineItem],
}

/// Inventory service reached over HTTP at `POST {base_url}/inventory/reserve`.
#[derive(Debug, Clone)]
pub struct HttpInventoryService {
    client: DownstreamClient,
    base_url: String,
}

impl HttpInventoryService {
    pub fn new(client: DownstreamClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl InventoryService for HttpInventoryService {
    async fn reserve(&self, ctx: &TraceContext, items: &[LineItem]) -> Result<(), CallError> {
        let url = endpoint(&self.base_url, "/inventory/reserve");
        let response = self
            .client
            .post_json(&url, ctx, &ReserveBody { items })
            .await?;

        // Only a plain 200 confirms the reservation.
        if response.status() != StatusCode::OK {
            return Err(CallError::MalformedResponse(
                "Inventory reservation failed".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    calls: usize,
    fail_with: Option<CallError>,
}

/// In-process inventory service backed by a real [`StockTable`].
#[derive(Debug, Clone)]
pub struct InMemoryInventoryService {
    stock: Arc<StockTable>,
    state: Arc<RwLock<InMemoryInventoryState>>,
}

impl InMemoryInventoryService {
    pub fn new(stock: Arc<StockTable>) -> Self {
        Self {
            stock,
            state: Arc::default(),
        }
    }

    /// Service over the default seeded stock.
    pub fn seeded() -> Self {
        Self::new(Arc::new(StockTable::seeded()))
    }

    pub fn stock(&self) -> &StockTable {
        &self.stock
    }

    /// Makes every following call fail with `error`, or restores normal
    /// behaviour with `None`.
    pub fn set_failure(&self, error: Option<CallError>) {
        self.state.write().fail_with = error;
    }

    /// Number of reserve calls received.
    pub fn call_count(&self) -> usize {
        self.state.read().calls
    }
}

#[async_trait]
impl InventoryService for InMemoryInventoryService {
    async fn reserve(&self, _ctx: &TraceContext, items: &[LineItem]) -> Result<(), CallError> {
        let fail_with = {
            let mut state = self.state.write();
            state.calls += 1;
            state.fail_with.clone()
        };
        if let Some(err) = fail_with {
            return Err(err);
        }

        self.stock
            .reserve(items)
            .map_err(|e| CallError::Rejected {
                status: StatusCode::BAD_REQUEST.as_u16(),
                message: e.to_string(),
            })
    }
}
