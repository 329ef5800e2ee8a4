//! Order fulfillment: the order document, its forward-only status
//! transition, and the delete gate that protects stock reversal.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::{OrderCreate, OrderFilter};
pub use error::*;
