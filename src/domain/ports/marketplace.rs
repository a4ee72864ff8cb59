use crate::domain::entities::product_record::ProductRecord;
use crate::domain::error::DomainError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Lightweight live marketplace signal for one identifier.
#[derive(Debug, Clone)]
pub struct PopularitySnapshot {
    pub asin: String,
    /// Price-drop count over the last 30 days.
    pub price_drop_frequency: f64,
    /// Sales-rank style popularity (lower is more popular).
    pub popularity_rank: f64,
}

/// Marketplace data lookups. Batch results are partial by contract:
/// identifiers the marketplace does not know get no entry, not an error.
#[async_trait]
pub trait MarketplaceProvider: Send + Sync {
    /// Batch popularity lookup for up to ~40 identifiers in one call.
    async fn popularity(
        &self,
        asins: &[String],
    ) -> Result<HashMap<String, PopularitySnapshot>, DomainError>;

    /// Full product detail for one identifier; `None` when the
    /// marketplace has nothing usable.
    async fn product_detail(&self, asin: &str) -> Result<Option<ProductRecord>, DomainError>;
}
