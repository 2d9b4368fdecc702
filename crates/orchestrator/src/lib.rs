//! Order placement orchestration.
//!
//! One inbound "place order" request becomes a strictly sequential chain of
//! downstream calls:
//! 1. Reserve inventory
//! 2. Create the order
//! 3. Send the confirmation notification
//!
//! The chain stops at the first failure and reports which step failed, with
//! the upstream status and message. There is no compensation: work done by
//! earlier steps stays done.

pub mod error;
pub mod orchestrator;
pub mod services;
pub mod steps;

pub use error::{CallError, DEFAULT_FAILURE_STATUS, OrchestrationError};
pub use orchestrator::{OrderOrchestrator, PlaceOrder, PlacedOrder};
pub use services::{
    DownstreamClient, HttpInventoryService, HttpNotificationService, HttpOrderService,
    InMemoryInventoryService, InMemoryNotificationService, InMemoryOrderService, InventoryService,
    NotificationService, OrderService,
};
pub use steps::Step;
