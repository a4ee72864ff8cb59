//! Retention sweep across the three stores. Per-table failures are
//! isolated: one table erroring never stops the others.

use crate::application::cache::{TrendCache, MAX_CACHE_AGE_DAYS};
use crate::domain::ports::analytics_repository::AnalyticsRepository;
use crate::domain::ports::perf_log_repository::PerfLogRepository;
use crate::domain::ports::trend_repository::TrendRepository;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;

pub const RETENTION_DAYS: i64 = 90;

#[derive(Debug, Serialize)]
pub struct MaintenanceReport {
    pub ran_at: DateTime<Utc>,
    pub retention_days: i64,
    pub trends_deleted: usize,
    pub analytics_deleted: usize,
    pub perf_logs_deleted: usize,
    /// Rows expired by the short-window cache cleanup.
    pub cache_rows_expired: usize,
    pub errors: Vec<String>,
}

pub struct MaintenanceUseCase {
    trends: Arc<dyn TrendRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
    perf: Arc<dyn PerfLogRepository>,
    cache: Arc<TrendCache>,
}

impl MaintenanceUseCase {
    pub fn new(
        trends: Arc<dyn TrendRepository>,
        analytics: Arc<dyn AnalyticsRepository>,
        perf: Arc<dyn PerfLogRepository>,
        cache: Arc<TrendCache>,
    ) -> Self {
        Self {
            trends,
            analytics,
            perf,
            cache,
        }
    }

    pub fn execute(&self, retention_days: i64) -> MaintenanceReport {
        let ran_at = Utc::now();
        let cutoff = ran_at - Duration::days(retention_days);
        let mut errors = Vec::new();

        let trends_deleted = match self.trends.delete_older_than(cutoff) {
            Ok(n) => n,
            Err(e) => {
                errors.push(format!("daily_trends: {e}"));
                0
            }
        };
        let analytics_deleted = match self.analytics.delete_older_than(cutoff) {
            Ok(n) => n,
            Err(e) => {
                errors.push(format!("analytics_events: {e}"));
                0
            }
        };
        let perf_logs_deleted = match self.perf.delete_older_than(cutoff) {
            Ok(n) => n,
            Err(e) => {
                errors.push(format!("performance_logs: {e}"));
                0
            }
        };

        let cache_rows_expired = self.cache.cleanup(MAX_CACHE_AGE_DAYS);

        for e in &errors {
            eprintln!("Warning: maintenance: {e}");
        }

        MaintenanceReport {
            ran_at,
            retention_days,
            trends_deleted,
            analytics_deleted,
            perf_logs_deleted,
            cache_rows_expired,
            errors,
        }
    }
}
