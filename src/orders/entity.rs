use jiff::Timestamp;

use crate::collection::Document;
use crate::domain::{Order, OrderItem, OrderStatus, PaymentInfo, ShippingInfo};
use crate::orders::actions::{OrderAction, OrderActionResult};
use crate::orders::error::OrderError;

/// Payload for persisting a new order. Items and the price breakdown are
/// assembled by the order client from the validated product snapshots.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub shipping_info: ShippingInfo,
    pub items: Vec<OrderItem>,
    pub payment_info: PaymentInfo,
    pub items_price: f64,
    pub tax_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
    pub user_id: String,
}

/// Predicate for order listings.
#[derive(Debug, Clone)]
pub enum OrderFilter {
    Any,
    PlacedBy(String),
}

impl Document for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = ();
    type Filter = OrderFilter;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError(
                "an order needs at least one item".to_string(),
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            shipping_info: params.shipping_info,
            items: params.items,
            payment_info: params.payment_info,
            items_price: params.items_price,
            tax_price: params.tax_price,
            shipping_price: params.shipping_price,
            total_price: params.total_price,
            status: OrderStatus::Processing,
            user_id: params.user_id,
            created_at: now,
            paid_at: now,
            delivered_at: None,
            delivered_by: None,
        })
    }

    // Orders are immutable once placed; only status moves, via an action.
    fn apply_patch(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        match filter {
            OrderFilter::Any => true,
            OrderFilter::PlacedBy(user_id) => self.user_id == *user_id,
        }
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::UpdateStatus { status, actor_name } => {
                if self.status == OrderStatus::Delivered {
                    return Err(OrderError::AlreadyDelivered(self.id.clone()));
                }
                if status <= self.status {
                    return Err(OrderError::InvalidTransition { from: self.status, to: status });
                }

                self.status = status;
                if status == OrderStatus::Delivered {
                    self.delivered_at = Some(Timestamp::now());
                    self.delivered_by = Some(actor_name);
                }
                Ok(OrderActionResult::StatusChanged(self.clone()))
            }
        }
    }

    /// Deletion reverses the stock taken at creation, so it is gated to
    /// orders that are settled. Runs inside the actor; the gate cannot
    /// race with a concurrent status transition.
    fn before_delete(&self) -> Result<(), OrderError> {
        if self.status != OrderStatus::Delivered {
            return Err(OrderError::NotYetDelivered(self.id.clone()));
        }
        Ok(())
    }

    fn not_found(id: &String) -> OrderError {
        OrderError::NotFound(id.clone())
    }

    fn store_unavailable(context: &str) -> OrderError {
        OrderError::StoreUnavailable(context.to_string())
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    pub fn sample_create(user_id: &str, items: Vec<OrderItem>) -> OrderCreate {
        let items_price: f64 = items.iter().map(|item| item.price * f64::from(item.quantity)).sum();
        OrderCreate {
            shipping_info: ShippingInfo {
                address: "1 Test Lane".to_string(),
                city: "Testville".to_string(),
                country: "Testland".to_string(),
                pin_code: "000001".to_string(),
                phone_number: "5550000".to_string(),
            },
            items,
            payment_info: PaymentInfo { id: "pay_1".to_string(), status: "succeeded".to_string() },
            items_price,
            tax_price: 0.0,
            shipping_price: 0.0,
            total_price: items_price,
            user_id: user_id.to_string(),
        }
    }

    pub fn item(product_id: &str, quantity: u32, price: f64) -> OrderItem {
        OrderItem {
            product_id: product_id.to_string(),
            name: format!("Product {product_id}"),
            quantity,
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{item, sample_create};
    use super::*;

    fn sample_order(id: &str) -> Order {
        Order::from_create_params(
            id.to_string(),
            sample_create("user_1", vec![item("p1", 2, 50.0)]),
        )
        .unwrap()
    }

    #[test]
    fn new_orders_start_processing() {
        let order = sample_order("o1");
        assert_eq!(order.status, OrderStatus::Processing);
        assert!(order.delivered_at.is_none());
        assert!(order.delivered_by.is_none());
    }

    #[test]
    fn empty_orders_are_rejected() {
        let err =
            Order::from_create_params("o1".to_string(), sample_create("user_1", vec![])).unwrap_err();
        assert!(matches!(err, OrderError::ValidationError(_)));
    }

    #[test]
    fn status_moves_forward_only() {
        let mut order = sample_order("o1");

        order
            .handle_action(OrderAction::UpdateStatus {
                status: OrderStatus::Shipped,
                actor_name: "Admin".to_string(),
            })
            .unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);

        let err = order
            .handle_action(OrderAction::UpdateStatus {
                status: OrderStatus::Processing,
                actor_name: "Admin".to_string(),
            })
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition { from: OrderStatus::Shipped, to: OrderStatus::Processing }
        );

        let err = order
            .handle_action(OrderAction::UpdateStatus {
                status: OrderStatus::Shipped,
                actor_name: "Admin".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
    }

    #[test]
    fn delivery_stamps_time_and_deliverer() {
        let mut order = sample_order("o1");

        let result = order
            .handle_action(OrderAction::UpdateStatus {
                status: OrderStatus::Delivered,
                actor_name: "Courier Carla".to_string(),
            })
            .unwrap();

        let OrderActionResult::StatusChanged(updated) = result;
        assert_eq!(updated.status, OrderStatus::Delivered);
        assert!(updated.delivered_at.is_some());
        assert_eq!(updated.delivered_by.as_deref(), Some("Courier Carla"));

        // Delivered is terminal: any further update is a conflict and
        // mutates nothing.
        let before = order.clone();
        let err = order
            .handle_action(OrderAction::UpdateStatus {
                status: OrderStatus::Delivered,
                actor_name: "Someone Else".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, OrderError::AlreadyDelivered("o1".to_string()));
        assert_eq!(order.delivered_by, before.delivered_by);
    }

    #[test]
    fn only_delivered_orders_may_be_deleted() {
        let mut order = sample_order("o1");
        assert_eq!(order.before_delete(), Err(OrderError::NotYetDelivered("o1".to_string())));

        order
            .handle_action(OrderAction::UpdateStatus {
                status: OrderStatus::Delivered,
                actor_name: "Admin".to_string(),
            })
            .unwrap();
        assert_eq!(order.before_delete(), Ok(()));
    }
}
