/// Custom actions for Product documents.
///
/// These run inside the catalog collection actor, so each one is atomic
/// with respect to every other access to the same collection. That is what
/// keeps the review aggregation (a read-recompute-write over the full
/// review sequence) from interleaving with a concurrent submission.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Decrements stock by the given quantity, failing when the request
    /// exceeds what is available.
    ReserveStock(u32),
    /// Increments stock back by the given quantity. Used when a failed
    /// order creation is compensated and when a delivered order is deleted.
    /// The result is clamped to the schema's stock cap; a clamped release
    /// is logged and the clamped level reported.
    ReleaseStock(u32),
    /// Adds the reviewer's review, or overwrites their existing one in
    /// place, then recomputes the derived rating fields.
    UpsertReview(ReviewDraft),
    /// Removes the reviewer's review, then recomputes the derived rating
    /// fields.
    RemoveReview { reviewer_id: String },
}

/// Results from ProductActions.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    StockLevel(u32),
    StockReserved { remaining: u32 },
    StockReleased { level: u32 },
    ReviewRecorded { ratings: f64, num_of_reviews: u32 },
    ReviewRemoved { ratings: f64, num_of_reviews: u32 },
}

/// An incoming review before it is attached to a product.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub user_id: String,
    pub name: String,
    pub rating: u8,
    pub comment: String,
}
