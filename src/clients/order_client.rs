use tracing::{debug, error, info, instrument, warn};

use crate::catalog::error::ProductError;
use crate::clients::ProductClient;
use crate::collection::CollectionClient;
use crate::domain::{Identity, Order, OrderItem, OrderStatus, PaymentInfo, ShippingInfo};
use crate::orders::{OrderAction, OrderActionResult, OrderCreate, OrderError, OrderFilter};

/// An incoming order before prices are snapshotted and stock is taken.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub shipping_info: ShippingInfo,
    pub payment_info: PaymentInfo,
    pub lines: Vec<OrderLine>,
    pub tax_price: f64,
    pub shipping_price: f64,
}

#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: u32,
}

/// Result record for the admin order listing.
#[derive(Debug, Clone)]
pub struct OrderLedger {
    pub orders: Vec<Order>,
    pub total_orders: usize,
    pub total_amount: f64,
}

/// Client for the orders collection actor.
///
/// Carries a [`ProductClient`] because order creation and deletion are
/// cross-aggregate: stock moves on the product side as a consequence of the
/// order lifecycle. Stock is taken when the order is created and given back
/// when a delivered order is deleted.
#[derive(Clone)]
pub struct OrderClient {
    inner: CollectionClient<Order>,
    product_client: ProductClient,
}

impl OrderClient {
    pub fn new(inner: CollectionClient<Order>, product_client: ProductClient) -> Self {
        Self { inner, product_client }
    }

    /// Place an order: validate every referenced product and snapshot its
    /// name and unit price, reserve stock for all lines concurrently, then
    /// persist the order.
    ///
    /// The reservation fan-out is all-or-nothing: when any line fails,
    /// every line that did reserve is released again before the error is
    /// returned, so a failed creation never leaves stock partially
    /// adjusted.
    #[instrument(skip(self, identity, draft), fields(user_id = %identity.user_id))]
    pub async fn create_order(
        &self,
        identity: &Identity,
        draft: OrderDraft,
    ) -> Result<String, OrderError> {
        info!("Processing create_order request");

        if draft.lines.is_empty() {
            return Err(OrderError::ValidationError(
                "an order needs at least one item".to_string(),
            ));
        }

        // Step 1: validate products and snapshot the order items.
        let mut items = Vec::with_capacity(draft.lines.len());
        for line in &draft.lines {
            let product = self
                .product_client
                .get_product(line.product_id.clone())
                .await
                .map_err(|e| order_error_from_product(&line.product_id, e))?
                .ok_or_else(|| OrderError::InvalidProduct(line.product_id.clone()))?;
            info!(product_name = %product.name, "Product validation successful");

            items.push(OrderItem {
                product_id: product.id,
                name: product.name,
                quantity: line.quantity,
                price: product.price,
            });
        }

        // Step 2: reserve stock for every line, fan-out/fan-in.
        self.reserve_items(&items).await?;
        info!("Stock reserved for all items");

        // Step 3: price breakdown from the snapshots.
        let items_price: f64 =
            items.iter().map(|item| item.price * f64::from(item.quantity)).sum();
        let total_price = items_price + draft.tax_price + draft.shipping_price;

        let params = OrderCreate {
            shipping_info: draft.shipping_info,
            items: items.clone(),
            payment_info: draft.payment_info,
            items_price,
            tax_price: draft.tax_price,
            shipping_price: draft.shipping_price,
            total_price,
            user_id: identity.user_id.clone(),
        };

        // Step 4: persist; a failure here releases the reserved stock.
        match self.inner.create(params).await {
            Ok(id) => {
                info!(order_id = %id, "Order created successfully");
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, "Order persistence failed, releasing reserved stock");
                let entries =
                    items.iter().map(|item| (item.product_id.clone(), item.quantity)).collect();
                for (product_id, release_err) in self.release_quantities(entries).await {
                    warn!(product_id = %product_id, error = %release_err, "Compensating release failed");
                }
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: String) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        self.inner.get(id).await
    }

    /// Orders placed by one user. An empty list is a valid answer, not an
    /// error.
    #[instrument(skip(self))]
    pub async fn my_orders(&self, user_id: String) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner.find(OrderFilter::PlacedBy(user_id), 0, usize::MAX).await
    }

    /// Every order plus the totals the admin surface reports.
    #[instrument(skip(self))]
    pub async fn all_orders(&self) -> Result<OrderLedger, OrderError> {
        debug!("Sending request");
        let orders = self.inner.find(OrderFilter::Any, 0, usize::MAX).await?;
        let total_amount = orders.iter().map(|order| order.total_price).sum();
        Ok(OrderLedger { total_orders: orders.len(), total_amount, orders })
    }

    /// Advance the fulfillment status. The orders actor enforces the
    /// forward-only transition and stamps delivery metadata.
    #[instrument(skip(self, identity), fields(actor = %identity.name))]
    pub async fn update_order_status(
        &self,
        id: String,
        status: OrderStatus,
        identity: &Identity,
    ) -> Result<Order, OrderError> {
        info!(%status, "Processing status update");
        let action = OrderAction::UpdateStatus { status, actor_name: identity.name.clone() };
        let OrderActionResult::StatusChanged(order) =
            self.inner.perform_action(id, action).await?;
        Ok(order)
    }

    /// Delete a delivered order and give its stock back, item by item.
    ///
    /// The Delivered gate lives in the orders actor's delete hook, so it
    /// cannot race with a concurrent status change. A restock that fails
    /// afterwards (product removed in the meantime) is reported, never
    /// swallowed.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: String) -> Result<(), OrderError> {
        info!("Processing delete_order request");

        let order = self
            .inner
            .get(id.clone())
            .await?
            .ok_or_else(|| OrderError::NotFound(id.clone()))?;
        self.inner.delete(id.clone()).await?;

        let entries =
            order.items.iter().map(|item| (item.product_id.clone(), item.quantity)).collect();
        let failures = self.release_quantities(entries).await;
        if failures.is_empty() {
            info!("Order deleted and stock restored");
            return Ok(());
        }

        let detail = failures
            .iter()
            .map(|(product_id, e)| format!("{product_id}: {e}"))
            .collect::<Vec<_>>()
            .join("; ");
        error!(%detail, "Stock restore incomplete after order deletion");
        Err(OrderError::RestockFailed(detail))
    }

    async fn reserve_items(&self, items: &[OrderItem]) -> Result<(), OrderError> {
        let mut tasks = Vec::with_capacity(items.len());
        for item in items {
            let client = self.product_client.clone();
            let product_id = item.product_id.clone();
            let quantity = item.quantity;
            tasks.push(tokio::spawn(async move {
                let outcome = client.reserve_stock(product_id.clone(), quantity).await;
                (product_id, quantity, outcome)
            }));
        }

        let mut reserved = Vec::new();
        let mut failure: Option<OrderError> = None;
        for task in tasks {
            match task.await {
                Ok((product_id, quantity, Ok(_))) => reserved.push((product_id, quantity)),
                Ok((product_id, _, Err(e))) => {
                    error!(product_id = %product_id, error = %e, "Stock reservation failed");
                    failure.get_or_insert(order_error_from_product(&product_id, e));
                }
                Err(e) => {
                    failure.get_or_insert(OrderError::StoreUnavailable(format!(
                        "reservation task failed: {e}"
                    )));
                }
            }
        }

        match failure {
            None => Ok(()),
            Some(e) => {
                // Undo the lines that did go through before surfacing the
                // error.
                for (product_id, release_err) in self.release_quantities(reserved).await {
                    warn!(product_id = %product_id, error = %release_err, "Compensating release failed");
                }
                Err(e)
            }
        }
    }

    /// Fan-out stock increments; returns the lines that could not be
    /// restored.
    async fn release_quantities(
        &self,
        entries: Vec<(String, u32)>,
    ) -> Vec<(String, ProductError)> {
        let mut tasks = Vec::with_capacity(entries.len());
        for (product_id, quantity) in entries {
            let client = self.product_client.clone();
            tasks.push(tokio::spawn(async move {
                let outcome = client.release_stock(product_id.clone(), quantity).await;
                (product_id, outcome)
            }));
        }

        let mut failures = Vec::new();
        for task in tasks {
            match task.await {
                Ok((_, Ok(_))) => {}
                Ok((product_id, Err(e))) => failures.push((product_id, e)),
                Err(e) => failures.push((
                    "<join>".to_string(),
                    ProductError::StoreUnavailable(format!("release task failed: {e}")),
                )),
            }
        }
        failures
    }
}

fn order_error_from_product(product_id: &str, error: ProductError) -> OrderError {
    match error {
        ProductError::NotFound(_) => OrderError::InvalidProduct(product_id.to_string()),
        ProductError::InsufficientStock { .. } => OrderError::InsufficientStock(error.to_string()),
        ProductError::ValidationError(_)
        | ProductError::InvalidRating(_)
        | ProductError::InvalidFilter(_) => OrderError::ValidationError(error.to_string()),
        ProductError::PageOutOfRange { .. }
        | ProductError::ReviewNotFound(_)
        | ProductError::StoreUnavailable(_) => OrderError::StoreUnavailable(error.to_string()),
    }
}
