use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info};

use crate::clients::{OrderClient, ProductClient};
use crate::collection::CollectionActor;
use crate::domain::{Order, Product};

/// The main application system that wires up the collection actors.
///
/// Responsible for starting the catalog and orders actors, handing the
/// product client to the order client for the cross-aggregate workflow,
/// and shutting everything down.
pub struct StoreSystem {
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    pub fn new() -> Self {
        // 1. Catalog collection.
        let product_id_counter = Arc::new(AtomicU64::new(1));
        let next_product_id = move || {
            let id = product_id_counter.fetch_add(1, Ordering::SeqCst);
            format!("product_{}", id)
        };
        let (product_actor, product_collection) = CollectionActor::<Product>::new(32, next_product_id);
        let product_client = ProductClient::new(product_collection);
        let product_handle = tokio::spawn(product_actor.run());

        // 2. Orders collection. The order client gets its own handle to the
        // catalog for stock reservation and restocking.
        let order_id_counter = Arc::new(AtomicU64::new(1));
        let next_order_id = move || {
            let id = order_id_counter.fetch_add(1, Ordering::SeqCst);
            format!("order_{}", id)
        };
        let (order_actor, order_collection) = CollectionActor::<Order>::new(32, next_order_id);
        let order_client = OrderClient::new(order_collection, product_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        Self {
            product_client,
            order_client,
            handles: vec![product_handle, order_handle],
        }
    }

    /// Drop the clients (closing the request channels) and wait for the
    /// actors to drain and stop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store system...");

        drop(self.product_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Collection actor task failed: {:?}", e);
                return Err(format!("Collection actor task failed: {:?}", e));
            }
        }

        info!("Store system shutdown complete.");
        Ok(())
    }
}

impl Default for StoreSystem {
    fn default() -> Self {
        Self::new()
    }
}
