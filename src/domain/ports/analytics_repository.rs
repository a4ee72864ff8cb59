use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One historical revenue observation for a marketplace identifier.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueEvent {
    pub id: String,
    pub asin: String,
    pub revenue: f64,
    pub click_rate: f64,
    pub recorded_at: DateTime<Utc>,
}

/// History store of revenue-per-candidate records. Read paths are
/// most-recent-first.
pub trait AnalyticsRepository: Send + Sync {
    fn record_event(&self, asin: &str, revenue: f64, click_rate: f64)
        -> Result<RevenueEvent, DomainError>;

    /// Most recent events across all identifiers, capped.
    fn recent_events(&self, limit: usize) -> Result<Vec<RevenueEvent>, DomainError>;

    /// Revenue from the single most recent event for one identifier.
    fn latest_revenue(&self, asin: &str) -> Result<Option<f64>, DomainError>;

    /// Delete events recorded before `cutoff`. Returns the deleted count.
    fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;
}
