pub mod analytics_repository;
pub mod marketplace;
pub mod perf_log_repository;
pub mod trend_repository;
pub mod trend_source;
