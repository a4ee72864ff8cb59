//! Multi-source aggregation: fan out to every configured trend source,
//! run the filter chain, and upsert the survivors into the trend cache.
//! Each source call is independently isolated — one source failing or
//! timing out never blocks the others. Partial data beats no data.

use crate::application::alerts::AlertManager;
use crate::application::cache::TrendCache;
use crate::application::filters::TitleFilter;
use crate::application::normalize::{dedupe_candidates, Normalizer};
use crate::domain::entities::trend_candidate::TrendCandidate;
use crate::domain::ports::perf_log_repository::PerfLogRepository;
use crate::domain::ports::trend_repository::TrendRepository;
use crate::domain::ports::trend_source::{RawTrend, TrendSource};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Raw scores below this never enter the pool.
pub const MIN_SOURCE_SCORE: f64 = 35.0;
/// Default bound on each source call.
pub const SOURCE_TIMEOUT_SECS: u64 = 10;
/// Most un-hydrated rows examined per hydration run.
pub const HYDRATE_LIMIT: usize = 200;

const PERF_CONTEXT: &str = "trend_aggregator";

/// Per-source outcome for one aggregation run.
#[derive(Debug, Serialize)]
pub struct SourceReport {
    pub source: String,
    pub fetched: usize,
    pub error: Option<String>,
}

/// Result of one aggregation run. `candidates` is the persisted batch,
/// or the cache fallback list when nothing survived live sourcing.
#[derive(Debug, Serialize)]
pub struct AggregationReport {
    pub started_at: DateTime<Utc>,
    pub sources: Vec<SourceReport>,
    pub fetched_total: usize,
    pub kept: usize,
    pub used_fallback: bool,
    pub candidates: Vec<TrendCandidate>,
}

#[derive(Debug, Serialize)]
pub struct HydrationReport {
    pub examined: usize,
    pub updated: usize,
}

pub struct AggregateTrendsUseCase {
    /// Awaited one by one before the concurrent group (ROI memory,
    /// marketplace bestsellers).
    priority_sources: Vec<Arc<dyn TrendSource>>,
    /// Issued concurrently via a fan-out/fan-in join.
    concurrent_sources: Vec<Arc<dyn TrendSource>>,
    filter: TitleFilter,
    normalizer: Normalizer,
    cache: Arc<TrendCache>,
    trends: Arc<dyn TrendRepository>,
    perf: Arc<dyn PerfLogRepository>,
    alerts: Arc<Mutex<AlertManager>>,
    source_timeout: Duration,
}

impl AggregateTrendsUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        priority_sources: Vec<Arc<dyn TrendSource>>,
        concurrent_sources: Vec<Arc<dyn TrendSource>>,
        filter: TitleFilter,
        normalizer: Normalizer,
        cache: Arc<TrendCache>,
        trends: Arc<dyn TrendRepository>,
        perf: Arc<dyn PerfLogRepository>,
        alerts: Arc<Mutex<AlertManager>>,
    ) -> Self {
        Self {
            priority_sources,
            concurrent_sources,
            filter,
            normalizer,
            cache,
            trends,
            perf,
            alerts,
            source_timeout: Duration::from_secs(SOURCE_TIMEOUT_SECS),
        }
    }

    pub fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self
    }

    pub async fn execute(&self) -> AggregationReport {
        let started_at = Utc::now();
        self.log_perf("start", "aggregate_start", None);

        let mut reports = Vec::new();
        let mut merged: Vec<RawTrend> = Vec::new();

        for source in &self.priority_sources {
            let (raws, error) = self.fetch_isolated(source.as_ref()).await;
            reports.push(SourceReport {
                source: source.name().to_string(),
                fetched: raws.len(),
                error,
            });
            merged.extend(raws);
        }

        let fetches = self
            .concurrent_sources
            .iter()
            .map(|source| self.fetch_isolated(source.as_ref()));
        let results = join_all(fetches).await;
        for (source, (raws, error)) in self.concurrent_sources.iter().zip(results) {
            reports.push(SourceReport {
                source: source.name().to_string(),
                fetched: raws.len(),
                error,
            });
            merged.extend(raws);
        }

        let fetched_total = merged.len();

        if !reports.is_empty() && reports.iter().all(|r| r.error.is_some()) {
            if let Ok(mut alerts) = self.alerts.lock() {
                alerts.send(
                    "trend_sources_down",
                    "every trend source failed this cycle",
                    Some(serde_json::json!({
                        "sources": reports.iter().map(|r| r.source.clone()).collect::<Vec<_>>(),
                    })),
                );
            }
        }

        let kept_raw: Vec<RawTrend> = merged
            .into_iter()
            .filter(|t| !t.title.trim().is_empty())
            .filter(|t| !self.filter.is_noise(&t.title))
            .filter(|t| self.filter.is_buyable(&t.title))
            .filter(|t| t.score >= MIN_SOURCE_SCORE)
            .collect();

        let normalized: Vec<TrendCandidate> = kept_raw
            .into_iter()
            .map(|r| self.normalizer.normalize(r))
            .collect();
        let deduped = dedupe_candidates(normalized);
        let kept = deduped.len();

        self.cache.put(&deduped);

        let (candidates, used_fallback) = if deduped.is_empty() {
            (self.cache.fallback(), true)
        } else {
            (deduped, false)
        };

        self.log_perf(
            "success",
            "aggregate_success",
            Some(serde_json::json!({
                "fetched": fetched_total,
                "kept": kept,
                "used_fallback": used_fallback,
            })),
        );

        AggregationReport {
            started_at,
            sources: reports,
            fetched_total,
            kept,
            used_fallback,
            candidates,
        }
    }

    /// Backfill marketplace identifiers onto stored rows whose title
    /// carries one directly (bestseller rows are titled "ASIN <id>").
    pub fn hydrate_asins(&self) -> HydrationReport {
        let rows = match self.trends.missing_asin(HYDRATE_LIMIT) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("Warning: hydration read failed: {e}");
                return HydrationReport {
                    examined: 0,
                    updated: 0,
                };
            }
        };

        let examined = rows.len();
        let mut updated = 0usize;
        for row in rows {
            let Some(asin) = asin_from_title(&row.title) else {
                continue;
            };
            match self.trends.set_asin(&row.storage_key(), &asin) {
                Ok(()) => updated += 1,
                Err(e) => eprintln!("Warning: hydration write failed for '{}': {e}", row.title),
            }
        }
        HydrationReport { examined, updated }
    }

    /// One source call, bounded by the timeout and isolated from the
    /// rest of the run: any failure becomes an empty contribution.
    async fn fetch_isolated(&self, source: &dyn TrendSource) -> (Vec<RawTrend>, Option<String>) {
        match tokio::time::timeout(self.source_timeout, source.fetch()).await {
            Ok(Ok(raws)) => (raws, None),
            Ok(Err(e)) => {
                eprintln!("Warning: source '{}' failed: {e}", source.name());
                (Vec::new(), Some(e.to_string()))
            }
            Err(_) => {
                eprintln!(
                    "Warning: source '{}' timed out after {:?}",
                    source.name(),
                    self.source_timeout
                );
                (Vec::new(), Some("timeout".to_string()))
            }
        }
    }

    fn log_perf(&self, level: &str, message: &str, extra: Option<serde_json::Value>) {
        if let Err(e) = self.perf.log(level, message, PERF_CONTEXT, extra) {
            eprintln!("Warning: perf log failed: {e}");
        }
    }
}

/// Extract a marketplace identifier from a direct-identifier title like
/// "ASIN B0C1234567".
fn asin_from_title(title: &str) -> Option<String> {
    let mut parts = title.split_whitespace();
    if !parts.next()?.eq_ignore_ascii_case("asin") {
        return None;
    }
    let id = parts.next()?;
    if id.len() == 10 && id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(id.to_uppercase())
    } else {
        None
    }
}
