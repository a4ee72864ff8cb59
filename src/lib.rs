pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::aggregate::{AggregateTrendsUseCase, AggregationReport, HydrationReport};
use crate::application::alerts::AlertManager;
use crate::application::cache::{TrendCache, MAX_CACHE_AGE_DAYS};
use crate::application::filters::TitleFilter;
use crate::application::maintenance::{MaintenanceReport, MaintenanceUseCase};
use crate::application::normalize::Normalizer;
use crate::application::roi_memory::RoiMemoryFeed;
use crate::application::select::{SelectWinnerUseCase, SelectionOutcome};
use crate::domain::entities::trend_candidate::TrendCandidate;
use crate::domain::error::DomainError;
use crate::domain::ports::analytics_repository::{AnalyticsRepository, RevenueEvent};
use crate::domain::ports::marketplace::MarketplaceProvider;
use crate::domain::ports::perf_log_repository::PerfLogRepository;
use crate::domain::ports::trend_repository::TrendRepository;
use crate::domain::ports::trend_source::TrendSource;
use crate::domain::values::weights::SelectionWeights;
use crate::infrastructure::feeds::clickbank::ClickbankFeed;
use crate::infrastructure::feeds::google_trends::GoogleTrendsFeed;
use crate::infrastructure::feeds::keepa_bestsellers::KeepaBestsellersFeed;
use crate::infrastructure::feeds::reddit::RedditFeed;
use crate::infrastructure::marketplace::keepa::KeepaClient;
use crate::infrastructure::sqlite::analytics_repo::SqliteAnalyticsRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::perf_log_repo::SqlitePerfLogRepo;
use crate::infrastructure::sqlite::trend_repo::SqliteTrendRepo;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub struct TrendScout {
    aggregate_uc: AggregateTrendsUseCase,
    select_uc: SelectWinnerUseCase,
    maintenance_uc: MaintenanceUseCase,
    cache: Arc<TrendCache>,
    analytics: Arc<dyn AnalyticsRepository>,
}

impl TrendScout {
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let api_key = std::env::var("KEEPA_API_KEY").unwrap_or_default();

        let priority: Vec<Arc<dyn TrendSource>> =
            vec![Arc::new(KeepaBestsellersFeed::new(api_key.clone()))];
        let concurrent: Vec<Arc<dyn TrendSource>> = vec![
            Arc::new(ClickbankFeed::new()),
            Arc::new(RedditFeed::default()),
            Arc::new(GoogleTrendsFeed::default()),
        ];
        let marketplace: Arc<dyn MarketplaceProvider> = Arc::new(KeepaClient::new(api_key));

        Self::with_providers(db_path, priority, concurrent, marketplace)
    }

    /// Construct with injected sources and marketplace provider. The
    /// ROI-memory feed is always wired in as the first priority source,
    /// reading the same analytics store the selector scores against.
    pub fn with_providers(
        db_path: &str,
        priority_sources: Vec<Arc<dyn TrendSource>>,
        concurrent_sources: Vec<Arc<dyn TrendSource>>,
        marketplace: Arc<dyn MarketplaceProvider>,
    ) -> Result<Self, DomainError> {
        let conn1 = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn1
            .pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        let conn2 = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn2
            .pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        let conn3 = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn3
            .pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;

        // Each repo owns its connection; with an in-memory path the
        // three databases are independent, so each one gets the schema.
        run_migrations(&conn1)?;
        run_migrations(&conn2)?;
        run_migrations(&conn3)?;

        let trend_repo: Arc<dyn TrendRepository> = Arc::new(SqliteTrendRepo::new(conn1));
        let analytics: Arc<dyn AnalyticsRepository> = Arc::new(SqliteAnalyticsRepo::new(conn2));
        let perf: Arc<dyn PerfLogRepository> = Arc::new(SqlitePerfLogRepo::new(conn3));

        let cache = Arc::new(TrendCache::new(trend_repo.clone()));
        let alerts = Arc::new(Mutex::new(AlertManager::new(perf.clone())));

        let mut priority: Vec<Arc<dyn TrendSource>> =
            vec![Arc::new(RoiMemoryFeed::new(analytics.clone()))];
        priority.extend(priority_sources);

        let aggregate_uc = AggregateTrendsUseCase::new(
            priority,
            concurrent_sources,
            TitleFilter::default(),
            Normalizer::default(),
            cache.clone(),
            trend_repo.clone(),
            perf.clone(),
            alerts,
        );

        let weights = SelectionWeights::default();
        let select_uc = SelectWinnerUseCase::new(
            cache.clone(),
            analytics.clone(),
            marketplace,
            perf.clone(),
            weights,
            MAX_CACHE_AGE_DAYS,
        );

        let maintenance_uc =
            MaintenanceUseCase::new(trend_repo, analytics.clone(), perf, cache.clone());

        Ok(Self {
            aggregate_uc,
            select_uc,
            maintenance_uc,
            cache,
            analytics,
        })
    }

    // Delegating methods

    /// Run one aggregation cycle: fan out to every source, filter,
    /// dedupe, normalize, persist.
    pub async fn aggregate(&self) -> AggregationReport {
        self.aggregate_uc.execute().await
    }

    /// Pick the current winning candidate, or report an explicit
    /// absence. Never errors past this point.
    pub async fn select(&self) -> SelectionOutcome {
        self.select_uc.execute().await
    }

    /// Cached candidates within the window, newest first.
    pub fn trends(&self, window_days: i64) -> Vec<TrendCandidate> {
        self.cache.recent(window_days)
    }

    /// Best cached candidates by score, for when live sourcing is down.
    pub fn fallback(&self) -> Vec<TrendCandidate> {
        self.cache.fallback()
    }

    /// Backfill marketplace identifiers from direct-identifier titles.
    pub fn hydrate(&self) -> HydrationReport {
        self.aggregate_uc.hydrate_asins()
    }

    pub fn record_revenue(
        &self,
        asin: &str,
        revenue: f64,
        click_rate: f64,
    ) -> Result<RevenueEvent, DomainError> {
        self.analytics.record_event(asin, revenue, click_rate)
    }

    /// Retention sweep across all tables plus the short-window cache
    /// cleanup.
    pub fn cleanup(&self, retention_days: i64) -> MaintenanceReport {
        self.maintenance_uc.execute(retention_days)
    }
}
