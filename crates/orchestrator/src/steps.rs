//! The fixed steps of an order placement run.

use std::fmt;

/// One downstream call in an orchestration run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Reserve stock for every requested item.
    ReserveInventory,
    /// Create the order record and obtain its ID.
    CreateOrder,
    /// Send the order confirmation.
    SendNotification,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::ReserveInventory => "reserve_inventory",
            Step::CreateOrder => "create_order",
            Step::SendNotification => "send_notification",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
