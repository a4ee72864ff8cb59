//! Shared test helpers: in-memory setup plus port doubles for sources
//! and the marketplace.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use trendscout::domain::entities::product_record::ProductRecord;
use trendscout::domain::error::DomainError;
use trendscout::domain::ports::marketplace::{MarketplaceProvider, PopularitySnapshot};
use trendscout::domain::ports::trend_source::{RawTrend, SourceError, TrendSource};
use trendscout::domain::values::platform::Platform;
use trendscout::TrendScout;

pub fn raw(title: &str, platform: Platform, score: f64) -> RawTrend {
    RawTrend {
        title: title.to_string(),
        platform,
        score,
        url: None,
        asin: None,
    }
}

pub fn raw_with_asin(title: &str, platform: Platform, score: f64, asin: &str) -> RawTrend {
    RawTrend {
        title: title.to_string(),
        platform,
        score,
        url: Some(format!("https://amazon.com/dp/{asin}")),
        asin: Some(asin.to_string()),
    }
}

pub fn product(asin: &str) -> ProductRecord {
    ProductRecord::new(
        asin.to_string(),
        format!("Product {asin}"),
        vec!["bullet one".into()],
        "A test product".into(),
        Some("19.99".into()),
        vec![format!("https://img.example.com/{asin}.jpg")],
        50.0,
        "keepa".into(),
    )
}

/// Source that returns a fixed batch.
pub struct StaticSource {
    name: String,
    trends: Vec<RawTrend>,
}

impl StaticSource {
    pub fn new(name: &str, trends: Vec<RawTrend>) -> Arc<dyn TrendSource> {
        Arc::new(Self {
            name: name.to_string(),
            trends,
        })
    }
}

#[async_trait]
impl TrendSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<RawTrend>, SourceError> {
        Ok(self.trends.clone())
    }
}

/// Source that always fails.
pub struct FailingSource {
    name: String,
}

impl FailingSource {
    pub fn new(name: &str) -> Arc<dyn TrendSource> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl TrendSource for FailingSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<RawTrend>, SourceError> {
        Err(SourceError::Network("simulated outage".into()))
    }
}

/// Marketplace double with canned popularity and detail data.
#[derive(Default)]
pub struct MockMarketplace {
    pub popularity: HashMap<String, PopularitySnapshot>,
    pub products: HashMap<String, ProductRecord>,
    pub fail_popularity: bool,
    pub fail_detail: bool,
}

impl MockMarketplace {
    pub fn with_snapshot(mut self, asin: &str, drops: f64, rank: f64) -> Self {
        self.popularity.insert(
            asin.to_string(),
            PopularitySnapshot {
                asin: asin.to_string(),
                price_drop_frequency: drops,
                popularity_rank: rank,
            },
        );
        self
    }

    pub fn with_product(mut self, record: ProductRecord) -> Self {
        self.products.insert(record.asin.clone(), record);
        self
    }
}

#[async_trait]
impl MarketplaceProvider for MockMarketplace {
    async fn popularity(
        &self,
        asins: &[String],
    ) -> Result<HashMap<String, PopularitySnapshot>, DomainError> {
        if self.fail_popularity {
            return Err(DomainError::Network("simulated lookup failure".into()));
        }
        Ok(asins
            .iter()
            .filter_map(|a| self.popularity.get(a).map(|s| (a.clone(), s.clone())))
            .collect())
    }

    async fn product_detail(&self, asin: &str) -> Result<Option<ProductRecord>, DomainError> {
        if self.fail_detail {
            return Err(DomainError::Network("simulated detail failure".into()));
        }
        Ok(self.products.get(asin).cloned())
    }
}

/// Facade over in-memory stores with the given sources and marketplace.
pub fn setup_with(
    priority: Vec<Arc<dyn TrendSource>>,
    concurrent: Vec<Arc<dyn TrendSource>>,
    marketplace: Arc<dyn MarketplaceProvider>,
) -> TrendScout {
    TrendScout::with_providers(":memory:", priority, concurrent, marketplace).unwrap()
}

/// Facade with no live sources and an empty marketplace.
pub fn setup() -> TrendScout {
    setup_with(vec![], vec![], Arc::new(MockMarketplace::default()))
}
