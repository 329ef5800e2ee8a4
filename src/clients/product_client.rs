use tracing::{debug, instrument};

use crate::catalog::error::ProductError;
use crate::catalog::pagination::{self, RESULTS_PER_PAGE};
use crate::catalog::query::{ProductQuery, QueryParams};
use crate::catalog::{ProductAction, ProductActionResult, ProductCreate, ProductPatch, ReviewDraft};
use crate::collection::CollectionClient;
use crate::domain::{Identity, Product, Review};
use crate::impl_basic_client;

/// Result record for a catalog listing: the page of products plus the
/// derived aggregates callers echo back to the requester.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub product_count: usize,
    pub results_per_page: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Derived rating aggregates after a review mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewSummary {
    pub ratings: f64,
    pub num_of_reviews: u32,
}

/// Client for the catalog collection actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: CollectionClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    /// List a new product, stamping the requesting user as its owner.
    #[instrument(skip(self, params))]
    pub async fn create_product(
        &self,
        identity: &Identity,
        mut params: ProductCreate,
    ) -> Result<String, ProductError> {
        debug!("Sending request");
        params.created_by = identity.user_id.clone();
        self.inner.create(params).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_product(
        &self,
        id: String,
        patch: ProductPatch,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await
    }

    /// The search/filter/pagination pipeline: build the query, count the
    /// matches, plan the page bounds against that count, then execute the
    /// bounded find. An out-of-range page fails before the find runs.
    #[instrument(skip(self, params))]
    pub async fn list_products(&self, params: &QueryParams) -> Result<ProductPage, ProductError> {
        let query = ProductQuery::parse(params)?;
        let product_count = self.inner.count(query.clone()).await?;

        let bounds =
            pagination::plan(product_count, RESULTS_PER_PAGE, pagination::requested_page(params))?;
        let products = self.inner.find(query, bounds.skip, bounds.limit).await?;

        Ok(ProductPage {
            products,
            product_count,
            results_per_page: bounds.limit,
            total_pages: bounds.total_pages,
            current_page: bounds.current_page,
        })
    }

    /// Unfiltered, unpaginated listing for the admin surface.
    #[instrument(skip(self))]
    pub async fn admin_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner.find(ProductQuery::default(), 0, usize::MAX).await
    }

    #[instrument(skip(self))]
    pub async fn reviews(&self, product_id: String) -> Result<Vec<Review>, ProductError> {
        debug!("Sending request");
        let product = self
            .inner
            .get(product_id.clone())
            .await?
            .ok_or(ProductError::NotFound(product_id))?;
        Ok(product.reviews)
    }

    /// Add or overwrite the requesting user's review, returning the
    /// recomputed aggregates.
    #[instrument(skip(self, comment))]
    pub async fn upsert_review(
        &self,
        product_id: String,
        identity: &Identity,
        rating: u8,
        comment: String,
    ) -> Result<ReviewSummary, ProductError> {
        debug!("Sending request");
        let draft = ReviewDraft {
            user_id: identity.user_id.clone(),
            name: identity.name.clone(),
            rating,
            comment,
        };
        match self.inner.perform_action(product_id, ProductAction::UpsertReview(draft)).await? {
            ProductActionResult::ReviewRecorded { ratings, num_of_reviews } => {
                Ok(ReviewSummary { ratings, num_of_reviews })
            }
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_review(
        &self,
        product_id: String,
        reviewer_id: String,
    ) -> Result<ReviewSummary, ProductError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(product_id, ProductAction::RemoveReview { reviewer_id })
            .await?
        {
            ProductActionResult::ReviewRemoved { ratings, num_of_reviews } => {
                Ok(ReviewSummary { ratings, num_of_reviews })
            }
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::StockLevel(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Atomically decrement stock, failing when fewer units are available.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ReserveStock(quantity)).await? {
            ProductActionResult::StockReserved { remaining } => Ok(remaining),
            other => Err(unexpected(other)),
        }
    }

    /// Atomically increment stock back.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ReleaseStock(quantity)).await? {
            ProductActionResult::StockReleased { level } => Ok(level),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::StoreUnavailable(format!("unexpected action result: {result:?}"))
}
