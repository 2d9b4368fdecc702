//! Order service trait, HTTP client and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::{LineItem, OrderId, TraceContext, UserId};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::http::{DownstreamClient, endpoint};
use crate::error::CallError;

/// Trait for order creation.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Creates an order and returns the ID the service assigned to it.
    async fn create_order(
        &self,
        ctx: &TraceContext,
        user_id: &UserId,
        items: &[LineItem],
    ) -> Result<OrderId, CallError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderBody<'a> {
    user_id: &'a UserId,
    items: &'a [LineItem],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderCreated {
    order_id: OrderId,
}

/// Order service reached over HTTP at `POST {base_url}/orders`.
#[derive(Debug, Clone)]
pub struct HttpOrderService {
    client: DownstreamClient,
    base_url: String,
}

impl HttpOrderService {
    pub fn new(client: DownstreamClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl OrderService for HttpOrderService {
    async fn create_order(
        &self,
        ctx: &TraceContext,
        user_id: &UserId,
        items: &[LineItem],
    ) -> Result<OrderId, CallError> {
        let url = endpoint(&self.base_url, "/orders");
        let response = self
            .client
            .post_json(&url, ctx, &CreateOrderBody { user_id, items })
            .await?;

        let created = response
            .json::<OrderCreated>()
            .await
            .map_err(|e| CallError::MalformedResponse(format!("malformed order response: {e}")))?;
        Ok(created.order_id)
    }
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: Vec<(OrderId, UserId, Vec<LineItem>)>,
    calls: usize,
    next_id: u32,
    fail_with: Option<CallError>,
}

/// In-memory order service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderService {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail with `error`, or restores normal
    /// behaviour with `None`.
    pub fn set_failure(&self, error: Option<CallError>) {
        self.state.write().fail_with = error;
    }

    /// Number of create calls received, failed ones included.
    pub fn call_count(&self) -> usize {
        self.state.read().calls
    }

    /// Number of orders actually created.
    pub fn order_count(&self) -> usize {
        self.state.read().orders.len()
    }

    /// Returns true if an order exists with the given ID.
    pub fn has_order(&self, order_id: &OrderId) -> bool {
        self.state
            .read()
            .orders
            .iter()
            .any(|(id, _, _)| id == order_id)
    }
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    async fn create_order(
        &self,
        _ctx: &TraceContext,
        user_id: &UserId,
        items: &[LineItem],
    ) -> Result<OrderId, CallError> {
        let mut state = self.state.write();
        state.calls += 1;

        if let Some(err) = state.fail_with.clone() {
            return Err(err);
        }

        state.next_id += 1;
        let order_id = OrderId::new(format!("ORD-{:04}", state.next_id));
        state
            .orders
            .push((order_id.clone(), user_id.clone(), items.to_vec()));

        Ok(order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sequential_order_ids() {
        let service = InMemoryOrderService::new();
        let ctx = TraceContext::none();

        let user = UserId::new("u1");

        let o1 = service.create_order(&ctx, &user, &[]).await.unwrap();
        let o2 = service.create_order(&ctx, &user, &[]).await.unwrap();

        assert_eq!(o1, OrderId::new("ORD-0001"));
        assert_eq!(o2, OrderId::new("ORD-0002"));
        assert!(service.has_order(&o1));
        assert_eq!(service.order_count(), 2);
    }

    #[tokio::test]
    async fn test_fail_on_create() {
        let service = InMemoryOrderService::new();
        service.set_failure(Some(CallError::Rejected {
            status: 503,
            message: "order store unavailable".to_string(),
        }));

        let result = service
            .create_order(&TraceContext::none(), &UserId::new("u1"), &[])
            .await;

        assert!(result.is_err());
        assert_eq!(service.call_count(), 1);
        assert_eq!(service.order_count(), 0);
    }
}
