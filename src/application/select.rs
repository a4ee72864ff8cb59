//! The decision core: read the candidate pool, score every candidate on
//! four weighted components, rank, and promote exactly one winner (or
//! report an explicit absence). Side-effect-free on failure; nothing in
//! here raises past [`SelectWinnerUseCase::execute`].

use crate::application::cache::TrendCache;
use crate::domain::entities::product_record::ProductRecord;
use crate::domain::entities::trend_candidate::TrendCandidate;
use crate::domain::ports::analytics_repository::AnalyticsRepository;
use crate::domain::ports::marketplace::{MarketplaceProvider, PopularitySnapshot};
use crate::domain::ports::perf_log_repository::PerfLogRepository;
use crate::domain::values::freshness::freshness_of;
use crate::domain::values::platform::Platform;
use crate::domain::values::score::clamp_score;
use crate::domain::values::weights::SelectionWeights;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Most candidates loaded into one selection run.
pub const POOL_LIMIT: usize = 120;
/// Most identifiers sent to the batch popularity lookup.
pub const BATCH_ASIN_LIMIT: usize = 40;

const PERF_CONTEXT: &str = "winner_selector";

/// Per-candidate scoring breakdown, computed for one selection run and
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub asin: Option<String>,
    pub title: String,
    pub platform: Platform,
    pub trend_score: f64,
    pub marketplace_score: f64,
    pub roi_score: f64,
    pub freshness_score: f64,
    pub composite: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoWinnerReason {
    /// No candidates survived filtering into the pool.
    EmptyPool,
    /// The ranked winner carries no marketplace identifier.
    MissingIdentifier,
    /// Detail fetch for the ranked winner returned nothing usable.
    DetailUnavailable,
}

/// The only two shapes a caller ever sees.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectionOutcome {
    Winner {
        product: ProductRecord,
        selector_score: f64,
        selector_platform: Platform,
        scored: ScoredCandidate,
    },
    NoWinner {
        reason: NoWinnerReason,
    },
}

pub struct SelectWinnerUseCase {
    cache: Arc<TrendCache>,
    analytics: Arc<dyn AnalyticsRepository>,
    marketplace: Arc<dyn MarketplaceProvider>,
    perf: Arc<dyn PerfLogRepository>,
    weights: SelectionWeights,
    window_days: i64,
}

impl SelectWinnerUseCase {
    pub fn new(
        cache: Arc<TrendCache>,
        analytics: Arc<dyn AnalyticsRepository>,
        marketplace: Arc<dyn MarketplaceProvider>,
        perf: Arc<dyn PerfLogRepository>,
        weights: SelectionWeights,
        window_days: i64,
    ) -> Self {
        Self {
            cache,
            analytics,
            marketplace,
            perf,
            weights,
            window_days,
        }
    }

    pub async fn execute(&self) -> SelectionOutcome {
        let mut pool = self.cache.recent(self.window_days);
        pool.truncate(POOL_LIMIT);

        if pool.is_empty() {
            self.log_perf("warn", "no_winner_empty_pool", None);
            return SelectionOutcome::NoWinner {
                reason: NoWinnerReason::EmptyPool,
            };
        }

        let asins = distinct_asins(&pool, BATCH_ASIN_LIMIT);
        let popularity = match self.marketplace.popularity(&asins).await {
            Ok(map) => map,
            Err(e) => {
                eprintln!("Warning: popularity lookup failed: {e}");
                HashMap::new()
            }
        };

        let now = Utc::now();
        let mut ranked: Vec<ScoredCandidate> = pool
            .iter()
            .map(|c| self.score_candidate(c, &popularity, now))
            .collect();
        // Stable sort: candidates with exactly equal composites keep
        // pool order, so the first-seen candidate wins the tie.
        ranked.sort_by(|a, b| {
            b.composite
                .partial_cmp(&a.composite)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let top = match ranked.first() {
            Some(top) => top.clone(),
            None => {
                return SelectionOutcome::NoWinner {
                    reason: NoWinnerReason::EmptyPool,
                }
            }
        };

        let Some(asin) = top.asin.clone() else {
            self.log_perf(
                "warn",
                "no_winner_missing_identifier",
                Some(serde_json::json!({ "title": top.title })),
            );
            return SelectionOutcome::NoWinner {
                reason: NoWinnerReason::MissingIdentifier,
            };
        };

        match self.marketplace.product_detail(&asin).await {
            Ok(Some(product)) => {
                self.log_perf(
                    "success",
                    "winner_selected",
                    Some(serde_json::json!({
                        "asin": product.asin,
                        "score": top.composite,
                        "platform": top.platform.to_string(),
                    })),
                );
                SelectionOutcome::Winner {
                    product,
                    selector_score: top.composite,
                    selector_platform: top.platform,
                    scored: top,
                }
            }
            Ok(None) => {
                self.log_perf(
                    "warn",
                    "no_winner_detail_unavailable",
                    Some(serde_json::json!({ "asin": asin })),
                );
                SelectionOutcome::NoWinner {
                    reason: NoWinnerReason::DetailUnavailable,
                }
            }
            Err(e) => {
                eprintln!("Warning: detail fetch failed for {asin}: {e}");
                self.log_perf(
                    "warn",
                    "no_winner_detail_unavailable",
                    Some(serde_json::json!({ "asin": asin })),
                );
                SelectionOutcome::NoWinner {
                    reason: NoWinnerReason::DetailUnavailable,
                }
            }
        }
    }

    fn score_candidate(
        &self,
        candidate: &TrendCandidate,
        popularity: &HashMap<String, PopularitySnapshot>,
        now: DateTime<Utc>,
    ) -> ScoredCandidate {
        let trend_score = clamp_score(candidate.score);

        let marketplace_score = candidate
            .asin
            .as_ref()
            .and_then(|a| popularity.get(a))
            .map(marketplace_subscore)
            .unwrap_or(0.0);

        let roi_score = match &candidate.asin {
            Some(asin) => match self.analytics.latest_revenue(asin) {
                Ok(Some(revenue)) => (revenue * 2.0).clamp(0.0, 100.0),
                Ok(None) => 0.0,
                Err(e) => {
                    eprintln!("Warning: revenue lookup failed for {asin}: {e}");
                    0.0
                }
            },
            None => 0.0,
        };

        let freshness_score = freshness_of(candidate.created_at, now);

        let composite = self.weights.composite(
            trend_score,
            marketplace_score,
            roi_score,
            freshness_score,
        );

        ScoredCandidate {
            asin: candidate.asin.clone(),
            title: candidate.title.clone(),
            platform: candidate.platform,
            trend_score,
            marketplace_score,
            roi_score,
            freshness_score,
            composite,
        }
    }

    fn log_perf(&self, level: &str, message: &str, extra: Option<serde_json::Value>) {
        if let Err(e) = self.perf.log(level, message, PERF_CONTEXT, extra) {
            eprintln!("Warning: perf log failed: {e}");
        }
    }
}

/// Live-marketplace sub-score: price-drop frequency weighted 3x,
/// averaged with a rank-derived popularity value, capped at 100.
pub fn marketplace_subscore(snapshot: &PopularitySnapshot) -> f64 {
    let drop_signal = clamp_score(snapshot.price_drop_frequency) * 3.0;
    let rank_signal = (100.0 - snapshot.popularity_rank / 1000.0).max(0.0);
    ((drop_signal + rank_signal) / 2.0).min(100.0)
}

/// Up to `limit` distinct identifiers in pool order.
fn distinct_asins(pool: &[TrendCandidate], limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    pool.iter()
        .filter_map(|c| c.asin.clone())
        .filter(|a| seen.insert(a.clone()))
        .take(limit)
        .collect()
}
