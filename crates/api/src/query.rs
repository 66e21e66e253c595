//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for the related-products endpoint.
///
/// Absent means [`DEFAULT_RELATED_LIMIT`](artisan_core::catalog::DEFAULT_RELATED_LIMIT);
/// larger values are capped by the catalog filter.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}
