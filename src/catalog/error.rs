use crate::error::{ErrorKind, Fault};
use thiserror::Error;

/// Errors surfaced by catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Page not found: requested page {requested} of {total_pages}")]
    PageOutOfRange { requested: usize, total_pages: usize },
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    #[error("Invalid rating {0}: must be between 1 and 5")]
    InvalidRating(u8),
    #[error("Product validation error: {0}")]
    ValidationError(String),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("No review by user {0} on this product")]
    ReviewNotFound(String),
    #[error("Product store unavailable: {0}")]
    StoreUnavailable(String),
}

impl Fault for ProductError {
    fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NotFound(_)
            | ProductError::PageOutOfRange { .. }
            | ProductError::ReviewNotFound(_) => ErrorKind::NotFound,
            ProductError::InsufficientStock { .. } => ErrorKind::Conflict,
            ProductError::InvalidFilter(_)
            | ProductError::InvalidRating(_)
            | ProductError::ValidationError(_) => ErrorKind::Validation,
            ProductError::StoreUnavailable(_) => ErrorKind::Internal,
        }
    }
}
