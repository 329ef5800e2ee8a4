//! Page-bound computation for catalog listings.
//!
//! Bounds are planned from the filtered match count before the paginated
//! query executes, so an out-of-range page is refused without touching the
//! store again. The one asymmetry is deliberate: a page beyond the end only
//! fails when there are matches at all, while an empty result set on page 1
//! is a valid, empty response.

use crate::catalog::error::ProductError;
use crate::catalog::query::QueryParams;

/// Fixed page size for catalog listings.
pub const RESULTS_PER_PAGE: usize = 3;

/// The planned window into the filtered result sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub current_page: usize,
    pub total_pages: usize,
    pub skip: usize,
    pub limit: usize,
}

/// Compute the bounds for `requested_page` over `count` matches.
///
/// `total_pages = ceil(count / per_page)`. Requesting past the end fails
/// NotFound when `count > 0`; with zero matches any page yields an empty
/// window.
pub fn plan(count: usize, per_page: usize, requested_page: usize) -> Result<PageBounds, ProductError> {
    if per_page == 0 {
        return Err(ProductError::ValidationError(
            "results per page must be positive".to_string(),
        ));
    }
    // Page numbering is 1-based; zero falls back to the first page like
    // any other invalid request value. With no matches every page is the
    // same empty window, so collapse to page 1 and keep the skip
    // arithmetic in range.
    let requested_page = if count == 0 { 1 } else { requested_page.max(1) };

    let total_pages = count.div_ceil(per_page);
    if requested_page > total_pages && count > 0 {
        return Err(ProductError::PageOutOfRange {
            requested: requested_page,
            total_pages,
        });
    }

    Ok(PageBounds {
        current_page: requested_page,
        total_pages,
        skip: (requested_page - 1) * per_page,
        limit: per_page,
    })
}

/// The page asked for by the request; absent or unparseable values and
/// zero default to page 1.
pub fn requested_page(params: &QueryParams) -> usize {
    params
        .get("page")
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}
