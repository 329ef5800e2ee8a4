//! Typed clients over the collection actors. The product client wraps the
//! catalog pipeline; the order client orchestrates the cross-aggregate
//! order/stock workflow.

pub mod macros;
pub mod order_client;
pub mod product_client;

pub use order_client::{OrderClient, OrderDraft, OrderLedger, OrderLine};
pub use product_client::{ProductClient, ProductPage, ReviewSummary};
