//! Downstream service traits with HTTP and in-memory implementations.

pub mod http;
pub mod inventory;
pub mod notification;
pub mod order;

pub use http::DownstreamClient;
pub use inventory::{HttpInventoryService, InMemoryInventoryService, InventoryService};
pub use notification::{
    HttpNotificationService, InMemoryNotificationService, NotificationService,
};
pub use order::{HttpOrderService, InMemoryOrderService, OrderService};
