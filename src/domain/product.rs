use jiff::Timestamp;

/// A catalog product. Top-level aggregate: reviews have no lifecycle of
/// their own outside the product that owns them.
///
/// `ratings` and `num_of_reviews` are derived fields; after any review
/// mutation completes, `ratings == mean(review.rating)` and
/// `num_of_reviews == reviews.len()`. The mean of zero reviews is 0.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub category: String,
    pub images: Vec<ProductImage>,
    pub ratings: f64,
    pub num_of_reviews: u32,
    pub reviews: Vec<Review>,
    /// Owning user (the seller who listed the product).
    pub created_by: String,
    pub created_at: Timestamp,
}

/// Reference to an externally hosted product image.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductImage {
    pub public_id: String,
    pub url: String,
}

/// A customer review owned by its product.
///
/// Reviews are keyed by the reviewer's user id: a product holds at most one
/// review per user, and a repeat submission overwrites rating and comment in
/// place without moving the review's position in the sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub user_id: String,
    pub name: String,
    pub rating: u8,
    pub comment: String,
}
