//! Tests for the retention sweep across all three tables.

use chrono::{Duration, Utc};
use std::sync::Arc;
use trendscout::application::cache::TrendCache;
use trendscout::application::maintenance::MaintenanceUseCase;
use trendscout::infrastructure::sqlite::analytics_repo::SqliteAnalyticsRepo;
use trendscout::infrastructure::sqlite::migrations::run_migrations;
use trendscout::infrastructure::sqlite::perf_log_repo::SqlitePerfLogRepo;
use trendscout::infrastructure::sqlite::trend_repo::SqliteTrendRepo;

fn seeded_conn(table_insert: &str) -> rusqlite::Connection {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    conn.execute_batch(table_insert).unwrap();
    conn
}

fn rfc3339_days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339()
}

#[test]
fn test_maintenance_deletes_only_expired_rows() {
    let old = rfc3339_days_ago(100);
    let fresh = rfc3339_days_ago(1);

    let trends_conn = seeded_conn(&format!(
        "INSERT INTO daily_trends (storage_key, title, platform, score, category, product_intent, created_date, created_time, created_at) VALUES
         ('trend-old', 'old', 'reddit', 50, 'general', 'none', '2026-04-26', '08:00:00', '{old}'),
         ('trend-new', 'new', 'reddit', 50, 'general', 'none', '2026-08-03', '08:00:00', '{fresh}');"
    ));
    let analytics_conn = seeded_conn(&format!(
        "INSERT INTO analytics_events (id, asin, revenue, click_rate, recorded_at) VALUES
         ('e1', 'B0AAAAAAA1', 10, 0.01, '{old}'),
         ('e2', 'B0AAAAAAA1', 12, 0.02, '{fresh}');"
    ));
    let perf_conn = seeded_conn(&format!(
        "INSERT INTO performance_logs (id, level, message, context, created_date, created_time, created_at) VALUES
         ('p1', 'info', 'old run', 'trend_aggregator', '2026-04-26', '08:00:00', '{old}'),
         ('p2', 'info', 'new run', 'trend_aggregator', '2026-08-03', '08:00:00', '{fresh}');"
    ));

    let trends = Arc::new(SqliteTrendRepo::new(trends_conn));
    let analytics = Arc::new(SqliteAnalyticsRepo::new(analytics_conn));
    let perf = Arc::new(SqlitePerfLogRepo::new(perf_conn));
    let cache = Arc::new(TrendCache::new(trends.clone()));

    let uc = MaintenanceUseCase::new(trends, analytics.clone(), perf, cache);
    let report = uc.execute(90);

    assert_eq!(report.trends_deleted, 1);
    assert_eq!(report.analytics_deleted, 1);
    assert_eq!(report.perf_logs_deleted, 1);
    assert!(report.errors.is_empty());

    // The fresh revenue event survives.
    use trendscout::domain::ports::analytics_repository::AnalyticsRepository;
    assert_eq!(analytics.latest_revenue("B0AAAAAAA1").unwrap(), Some(12.0));
}

#[test]
fn test_maintenance_short_window_cache_cleanup() {
    let week_old = rfc3339_days_ago(7);
    let trends_conn = seeded_conn(&format!(
        "INSERT INTO daily_trends (storage_key, title, platform, score, category, product_intent, created_date, created_time, created_at) VALUES
         ('trend-wk', 'week old', 'reddit', 50, 'general', 'none', '2026-07-28', '08:00:00', '{week_old}');"
    ));
    let analytics_conn = seeded_conn("");
    let perf_conn = seeded_conn("");

    let trends = Arc::new(SqliteTrendRepo::new(trends_conn));
    let analytics = Arc::new(SqliteAnalyticsRepo::new(analytics_conn));
    let perf = Arc::new(SqlitePerfLogRepo::new(perf_conn));
    let cache = Arc::new(TrendCache::new(trends.clone()));

    let uc = MaintenanceUseCase::new(trends, analytics, perf, cache);
    let report = uc.execute(90);

    // Inside the 90-day retention but past the 3-day cache window.
    assert_eq!(report.trends_deleted, 0);
    assert_eq!(report.cache_rows_expired, 1);
}

#[test]
fn test_maintenance_idempotent() {
    let old = rfc3339_days_ago(100);
    let trends_conn = seeded_conn(&format!(
        "INSERT INTO daily_trends (storage_key, title, platform, score, category, product_intent, created_date, created_time, created_at) VALUES
         ('trend-old', 'old', 'reddit', 50, 'general', 'none', '2026-04-26', '08:00:00', '{old}');"
    ));
    let analytics_conn = seeded_conn("");
    let perf_conn = seeded_conn("");

    let trends = Arc::new(SqliteTrendRepo::new(trends_conn));
    let analytics = Arc::new(SqliteAnalyticsRepo::new(analytics_conn));
    let perf = Arc::new(SqlitePerfLogRepo::new(perf_conn));
    let cache = Arc::new(TrendCache::new(trends.clone()));

    let uc = MaintenanceUseCase::new(trends, analytics, perf, cache);
    assert_eq!(uc.execute(90).trends_deleted, 1);
    assert_eq!(uc.execute(90).trends_deleted, 0);
}
