use std::collections::BTreeMap;
use tracing::{info, Instrument};

use storefront::app_system::{setup_tracing, StoreSystem};
use storefront::catalog::ProductCreate;
use storefront::clients::{OrderDraft, OrderLine};
use storefront::domain::{Identity, OrderStatus, PaymentInfo, Role, ShippingInfo};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting storefront with catalog and order workflow");

    let system = StoreSystem::new();

    // Identities normally come from the credential layer; the demo fakes
    // a seller, a customer, and an admin.
    let seller = Identity::new("user_1", "Sally Seller", Role::Customer);
    let customer = Identity::new("user_2", "Carl Customer", Role::Customer);
    let admin = Identity::new("user_3", "Ada Admin", Role::Admin);

    let span = tracing::info_span!("catalog_setup");
    let (shirt_id, mug_id) = async {
        info!("Listing demo products");
        let shirt_id = system
            .product_client
            .create_product(
                &seller,
                ProductCreate {
                    name: "Linen Shirt".to_string(),
                    description: "A breathable linen shirt".to_string(),
                    price: 45.0,
                    stock: 20,
                    category: "apparel".to_string(),
                    images: Vec::new(),
                    created_by: String::new(),
                },
            )
            .await
            .map_err(|e| e.to_string())?;
        let mug_id = system
            .product_client
            .create_product(
                &seller,
                ProductCreate {
                    name: "Enamel Mug".to_string(),
                    description: "A camping mug".to_string(),
                    price: 12.5,
                    stock: 50,
                    category: "kitchen".to_string(),
                    images: Vec::new(),
                    created_by: String::new(),
                },
            )
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>((shirt_id, mug_id))
    }
    .instrument(span)
    .await?;

    info!(%shirt_id, %mug_id, "Products listed");

    // Search the catalog the way a request would: raw query parameters in,
    // a bounded page out.
    let mut params = BTreeMap::new();
    params.insert("keyword".to_string(), "shirt".to_string());
    params.insert("price[lte]".to_string(), "50".to_string());
    let page = system.product_client.list_products(&params).await.map_err(|e| e.to_string())?;
    info!(
        matches = page.product_count,
        total_pages = page.total_pages,
        "Catalog search complete"
    );

    // Leave a review and show the derived aggregates move.
    let summary = system
        .product_client
        .upsert_review(shirt_id.clone(), &customer, 4, "Fits well".to_string())
        .await
        .map_err(|e| e.to_string())?;
    info!(ratings = summary.ratings, reviews = summary.num_of_reviews, "Review recorded");

    // Place an order across both products; stock is reserved here.
    let span = tracing::info_span!("order_processing");
    let order_id = async {
        info!("Placing order through the order workflow");
        system
            .order_client
            .create_order(
                &customer,
                OrderDraft {
                    shipping_info: ShippingInfo {
                        address: "12 Demo Street".to_string(),
                        city: "Springfield".to_string(),
                        country: "USA".to_string(),
                        pin_code: "49007".to_string(),
                        phone_number: "5551234".to_string(),
                    },
                    payment_info: PaymentInfo {
                        id: "pay_demo".to_string(),
                        status: "succeeded".to_string(),
                    },
                    lines: vec![
                        OrderLine { product_id: shirt_id.clone(), quantity: 2 },
                        OrderLine { product_id: mug_id.clone(), quantity: 1 },
                    ],
                    tax_price: 9.0,
                    shipping_price: 5.0,
                },
            )
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(%order_id, "Order placed");

    // Walk the order forward and retire it.
    system
        .order_client
        .update_order_status(order_id.clone(), OrderStatus::Shipped, &admin)
        .await
        .map_err(|e| e.to_string())?;
    let delivered = system
        .order_client
        .update_order_status(order_id.clone(), OrderStatus::Delivered, &admin)
        .await
        .map_err(|e| e.to_string())?;
    info!(delivered_by = ?delivered.delivered_by, "Order delivered");

    system.order_client.delete_order(order_id).await.map_err(|e| e.to_string())?;
    let shirt_stock =
        system.product_client.check_stock(shirt_id).await.map_err(|e| e.to_string())?;
    info!(shirt_stock, "Delivered order deleted, stock restored");

    system.shutdown().await?;

    info!("Storefront demo completed successfully");
    Ok(())
}
