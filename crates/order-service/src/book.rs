//! Order creation and bookkeeping.

use std::sync::atomic::{AtomicUsize, Ordering};

use common::{LineItem, OrderId, UserId};

/// An order as accepted by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedOrder {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub items: Vec<LineItem>,
}

/// Mints order IDs. Orders are handed back to the caller, not retained; only
/// the number created since startup is kept.
#[derive(Debug, Default)]
pub struct OrderBook {
    created: AtomicUsize,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a fresh order ID for the order.
    pub fn create(&self, user_id: UserId, items: Vec<LineItem>) -> CreatedOrder {
        self.created.fetch_add(1, Ordering::Relaxed);
        CreatedOrder {
            order_id: OrderId::generate(),
            user_id,
            items,
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
}
