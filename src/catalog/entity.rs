use jiff::Timestamp;

use crate::catalog::actions::{ProductAction, ProductActionResult, ReviewDraft};
use crate::catalog::error::ProductError;
use crate::catalog::query::ProductQuery;
use crate::collection::Document;
use crate::domain::{Product, ProductImage, Review};

// Schema bounds carried over from the catalog data model: price at most
// 7 digits, stock at most 5.
const MAX_PRICE: f64 = 9_999_999.0;
const MAX_STOCK: u32 = 99_999;

/// Payload for listing a new product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub category: String,
    pub images: Vec<ProductImage>,
    /// Id of the user listing the product, taken from the request identity.
    pub created_by: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub category: Option<String>,
}

impl Document for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Filter = ProductQuery;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        require_text("name", &params.name)?;
        require_text("description", &params.description)?;
        require_text("category", &params.category)?;
        check_price(params.price)?;
        check_stock(params.stock)?;

        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            stock: params.stock,
            category: params.category,
            images: params.images,
            ratings: 0.0,
            num_of_reviews: 0,
            reviews: Vec::new(),
            created_by: params.created_by,
            created_at: Timestamp::now(),
        })
    }

    fn apply_patch(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(name) = patch.name {
            require_text("name", &name)?;
            self.name = name;
        }
        if let Some(description) = patch.description {
            require_text("description", &description)?;
            self.description = description;
        }
        if let Some(price) = patch.price {
            check_price(price)?;
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            check_stock(stock)?;
            self.stock = stock;
        }
        if let Some(category) = patch.category {
            require_text("category", &category)?;
            self.category = category;
        }
        Ok(())
    }

    fn matches(&self, filter: &ProductQuery) -> bool {
        filter.accepts(self)
    }

    /// Stock and review mutations. Each runs to completion inside the
    /// catalog actor before the next request is picked up.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::ReserveStock(quantity) => {
                if quantity == 0 {
                    return Err(ProductError::ValidationError(
                        "cannot reserve zero units".to_string(),
                    ));
                }
                if self.stock < quantity {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                Ok(ProductActionResult::StockReserved { remaining: self.stock })
            }
            ProductAction::ReleaseStock(quantity) => {
                let level = self.stock.saturating_add(quantity).min(MAX_STOCK);
                let truncated = self.stock as u64 + quantity as u64 - level as u64;
                if truncated > 0 {
                    tracing::warn!(
                        product_id = %self.id,
                        truncated,
                        "Release exceeded the stock cap"
                    );
                }
                self.stock = level;
                Ok(ProductActionResult::StockReleased { level: self.stock })
            }
            ProductAction::UpsertReview(draft) => {
                if !(1..=5).contains(&draft.rating) {
                    return Err(ProductError::InvalidRating(draft.rating));
                }
                require_text("review comment", &draft.comment)?;

                match self.reviews.iter_mut().find(|rev| rev.user_id == draft.user_id) {
                    Some(existing) => {
                        // Repeat submission overwrites in place; the
                        // review keeps its position in the sequence.
                        existing.rating = draft.rating;
                        existing.comment = draft.comment;
                    }
                    None => self.reviews.push(Review {
                        user_id: draft.user_id,
                        name: draft.name,
                        rating: draft.rating,
                        comment: draft.comment,
                    }),
                }

                self.recompute_review_totals();
                Ok(ProductActionResult::ReviewRecorded {
                    ratings: self.ratings,
                    num_of_reviews: self.num_of_reviews,
                })
            }
            ProductAction::RemoveReview { reviewer_id } => {
                let position = self
                    .reviews
                    .iter()
                    .position(|rev| rev.user_id == reviewer_id)
                    .ok_or(ProductError::ReviewNotFound(reviewer_id))?;
                self.reviews.remove(position);

                self.recompute_review_totals();
                Ok(ProductActionResult::ReviewRemoved {
                    ratings: self.ratings,
                    num_of_reviews: self.num_of_reviews,
                })
            }
        }
    }

    fn not_found(id: &String) -> ProductError {
        ProductError::NotFound(id.clone())
    }

    fn store_unavailable(context: &str) -> ProductError {
        ProductError::StoreUnavailable(context.to_string())
    }
}

impl Product {
    // Restores the invariants ratings == mean(review.rating) and
    // num_of_reviews == reviews.len(); the empty sequence yields 0, never
    // a division by zero.
    fn recompute_review_totals(&mut self) {
        self.num_of_reviews = self.reviews.len() as u32;
        self.ratings = if self.reviews.is_empty() {
            0.0
        } else {
            let sum: f64 = self.reviews.iter().map(|rev| f64::from(rev.rating)).sum();
            sum / self.reviews.len() as f64
        };
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ProductError> {
    if value.trim().is_empty() {
        Err(ProductError::ValidationError(format!("{field} is required")))
    } else {
        Ok(())
    }
}

fn check_price(price: f64) -> Result<(), ProductError> {
    if !(0.0..=MAX_PRICE).contains(&price) {
        return Err(ProductError::ValidationError(format!(
            "price must be between 0 and {MAX_PRICE}"
        )));
    }
    Ok(())
}

fn check_stock(stock: u32) -> Result<(), ProductError> {
    if stock > MAX_STOCK {
        return Err(ProductError::ValidationError(format!(
            "stock cannot exceed {MAX_STOCK}"
        )));
    }
    Ok(())
}
