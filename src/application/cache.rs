//! Time-bounded store of previously seen trend candidates. The cache
//! absorbs upstream failures: every store error on a read path becomes an
//! empty result and every write error is logged and swallowed, so a store
//! outage degrades the pipeline to staleness instead of crashing it.

use crate::domain::entities::trend_candidate::TrendCandidate;
use crate::domain::ports::trend_repository::TrendRepository;
use chrono::{Duration, Utc};
use std::sync::Arc;

/// Most rows a single window read returns.
pub const CACHE_LIMIT: usize = 200;
/// Most rows the fallback list returns.
pub const FALLBACK_LIMIT: usize = 20;
/// Default cache window and retention, in days.
pub const MAX_CACHE_AGE_DAYS: i64 = 3;

pub struct TrendCache {
    repo: Arc<dyn TrendRepository>,
}

impl TrendCache {
    pub fn new(repo: Arc<dyn TrendRepository>) -> Self {
        Self { repo }
    }

    /// Candidates captured within `window_days` of now, newest first,
    /// capped at [`CACHE_LIMIT`].
    pub fn recent(&self, window_days: i64) -> Vec<TrendCandidate> {
        let cutoff = Utc::now() - Duration::days(window_days);
        match self.repo.recent_since(cutoff, CACHE_LIMIT) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("Warning: trend cache read failed: {e}");
                Vec::new()
            }
        }
    }

    /// Upsert candidates by storage key. Empty-title candidates are the
    /// caller's responsibility to drop before this point.
    pub fn put(&self, candidates: &[TrendCandidate]) {
        if candidates.is_empty() {
            return;
        }
        if let Err(e) = self.repo.upsert(candidates) {
            eprintln!("Warning: trend cache write failed: {e}");
        }
    }

    /// Cached candidates sorted by score descending, truncated to
    /// [`FALLBACK_LIMIT`]. Used when live sourcing yields nothing.
    pub fn fallback(&self) -> Vec<TrendCandidate> {
        let mut rows = self.recent(MAX_CACHE_AGE_DAYS);
        if rows.is_empty() {
            eprintln!("Warning: no fallback cache available");
            return rows;
        }
        rows.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows.truncate(FALLBACK_LIMIT);
        rows
    }

    /// Delete rows older than the cutoff. Idempotent; a failure is logged
    /// and reported as zero deletions.
    pub fn cleanup(&self, max_age_days: i64) -> usize {
        let cutoff = Utc::now() - Duration::days(max_age_days);
        match self.repo.delete_older_than(cutoff) {
            Ok(n) => n,
            Err(e) => {
                eprintln!("Warning: trend cache cleanup failed: {e}");
                0
            }
        }
    }
}
