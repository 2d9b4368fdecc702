//! Notification delivery.

use std::sync::atomic::{AtomicUsize, Ordering};

use common::OrderId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub email: String,
    pub order_id: OrderId,
}

/// Delivers confirmations. Only a running count is retained.
#[derive(Debug, Default)]
pub struct Outbox {
    sent: AtomicUsize,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an email confirmation for an order.
    pub fn send(&self, email: String, order_id: OrderId) -> SentNotification {
        self.sent.fetch_add(1, Ordering::Relaxed);
        SentNotification { email, order_id }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}
