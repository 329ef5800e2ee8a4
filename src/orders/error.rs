use crate::domain::OrderStatus;
use crate::error::{ErrorKind, Fault};
use thiserror::Error;

/// Errors surfaced by order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order already delivered: {0}")]
    AlreadyDelivered(String),
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Only delivered orders can be deleted: {0}")]
    NotYetDelivered(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Stock restore incomplete: {0}")]
    RestockFailed(String),
    #[error("Order store unavailable: {0}")]
    StoreUnavailable(String),
}

impl Fault for OrderError {
    fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) | OrderError::InvalidProduct(_) => ErrorKind::NotFound,
            OrderError::AlreadyDelivered(_)
            | OrderError::InvalidTransition { .. }
            | OrderError::NotYetDelivered(_)
            | OrderError::InsufficientStock(_) => ErrorKind::Conflict,
            OrderError::ValidationError(_) => ErrorKind::Validation,
            OrderError::RestockFailed(_) | OrderError::StoreUnavailable(_) => ErrorKind::Internal,
        }
    }
}
