pub mod analytics_repo;
pub mod migrations;
pub mod perf_log_repo;
pub mod trend_repo;
