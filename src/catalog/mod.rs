//! Product catalog: query building, pagination, and the product document
//! with its stock and review-aggregation actions.

mod actions;
pub mod entity;
pub mod error;
pub mod pagination;
pub mod query;

pub use actions::*;
pub use entity::{ProductCreate, ProductPatch};
pub use error::*;
