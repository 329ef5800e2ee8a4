use crate::domain::{Order, OrderStatus};

/// Custom actions for Order documents. The status transition runs inside
/// the orders actor, so the monotonicity check and the mutation are one
/// step; a concurrent transition cannot slip between them.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Advance the fulfillment status. Moving to `Delivered` records the
    /// delivery timestamp and the acting user's name.
    UpdateStatus {
        status: OrderStatus,
        actor_name: String,
    },
}

#[derive(Debug, Clone)]
pub enum OrderActionResult {
    StatusChanged(Order),
}
