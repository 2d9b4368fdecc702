//! Notification service trait, HTTP client and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, TraceContext};
use parking_lot::RwLock;
use serde::Serialize;

use super::http::{DownstreamClient, endpoint};
use crate::error::CallError;

/// Trait for order confirmation delivery.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Notifies `email` that `order_id` was placed.
    async fn notify(
        &self,
        ctx: &TraceContext,
        email: &str,
        order_id: &OrderId,
    ) -> Result<(), CallError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotifyBody<'a> {
    email: &'a str,
    order_id: &'a OrderId,
}

/// Notification service reached over HTTP at `POST {base_url}/notify`.
#[derive(Debug, Clone)]
pub struct HttpNotificationService {
    client: DownstreamClient,
    base_url: String,
}

impl HttpNotificationService {
    pub fn new(client: DownstreamClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl NotificationService for HttpNotificationService {
    async fn notify(
        &self,
        ctx: &TraceContext,
        email: &str,
        order_id: &OrderId,
    ) -> Result<(), CallError> {
        let url = endpoint(&self.base_url, "/notify");
        self.client
            .post_json(&url, ctx, &NotifyBody { email, order_id })
            .await?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    sent: Vec<(String, OrderId)>,
    calls: usize,
    fail_with: Option<CallError>,
}

/// In-memory notification service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationService {
    state: Arc<RwLock<InMemoryNotificationState>>,
}

impl InMemoryNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail with `error`, or restores normal
    /// behaviour with `None`.
    pub fn set_failure(&self, error: Option<CallError>) {
        self.state.write().fail_with = error;
    }

    /// Number of notify calls received, failed ones included.
    pub fn call_count(&self) -> usize {
        self.state.read().calls
    }

    /// Notifications delivered, oldest first.
    pub fn sent(&self) -> Vec<(String, OrderId)> {
        self.state.read().sent.clone()
    }
}

#[async_trait]
impl NotificationService for InMemoryNotificationService {
    async fn notify(
        &self,
        _ctx: &TraceContext,
        email: &str,
        order_id: &OrderId,
    ) -> Result<(), CallError> {
        let mut state = self.state.write();
        state.calls += 1;

        if let Some(err) = state.fail_with.clone() {
            return Err(err);
        }

        state.sent.push((email.to_string(), order_id.clone()));
        Ok(())
    }
}
