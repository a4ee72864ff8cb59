//! Feedback loop: historical revenue records re-injected as synthetic
//! trend candidates, so proven winners resurface without fresh external
//! signal. Recomputed from live history on every aggregation cycle.

use crate::domain::ports::analytics_repository::AnalyticsRepository;
use crate::domain::ports::trend_source::{RawTrend, SourceError, TrendSource};
use crate::domain::values::platform::Platform;
use async_trait::async_trait;
use std::sync::Arc;

/// How many recent revenue events to consider per cycle.
pub const ROI_HISTORY_LIMIT: usize = 200;
/// Minimum revenue (currency units) for a record to re-enter the pool.
pub const ROI_REVENUE_FLOOR: f64 = 5.0;

pub struct RoiMemoryFeed {
    analytics: Arc<dyn AnalyticsRepository>,
}

impl RoiMemoryFeed {
    pub fn new(analytics: Arc<dyn AnalyticsRepository>) -> Self {
        Self { analytics }
    }
}

#[async_trait]
impl TrendSource for RoiMemoryFeed {
    fn name(&self) -> &str {
        "roi_memory"
    }

    async fn fetch(&self) -> Result<Vec<RawTrend>, SourceError> {
        let events = self
            .analytics
            .recent_events(ROI_HISTORY_LIMIT)
            .map_err(|e| SourceError::Store(e.to_string()))?;

        Ok(events
            .into_iter()
            .filter(|e| e.revenue > ROI_REVENUE_FLOOR)
            .map(|e| RawTrend {
                title: format!("ROI Winner {}", e.asin),
                platform: Platform::Amazon,
                score: (e.revenue * 2.0).min(100.0),
                url: Some(format!("https://amazon.com/dp/{}", e.asin)),
                asin: Some(e.asin),
            })
            .collect())
    }
}
