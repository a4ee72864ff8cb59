//! Canonicalization of raw source records plus batch deduplication.

use crate::application::classify::CategoryMapper;
use crate::domain::entities::trend_candidate::{normalized_title, TrendCandidate};
use crate::domain::ports::trend_source::RawTrend;
use crate::domain::values::localtime::local_stamp;
use crate::domain::values::score::clamp_score;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Converts raw trend records into canonical [`TrendCandidate`]s.
/// Infallible: garbage input is defaulted, never rejected. Callers drop
/// empty-title candidates before persistence.
pub struct Normalizer {
    mapper: CategoryMapper,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(CategoryMapper::default())
    }
}

impl Normalizer {
    pub fn new(mapper: CategoryMapper) -> Self {
        Self { mapper }
    }

    pub fn normalize(&self, raw: RawTrend) -> TrendCandidate {
        self.normalize_at(raw, Utc::now())
    }

    /// Normalization with an explicit capture instant, for deterministic
    /// tests.
    pub fn normalize_at(&self, raw: RawTrend, now: DateTime<Utc>) -> TrendCandidate {
        let mapped = self.mapper.map(&raw.title);
        let (created_date, created_time) = local_stamp(now);

        TrendCandidate {
            title: raw.title,
            platform: raw.platform,
            score: clamp_score(raw.score),
            url: raw.url,
            asin: raw.asin,
            category: mapped.category,
            product_intent: mapped.intent,
            created_date,
            created_time,
            created_at: Some(now),
        }
    }
}

/// Drop intra-batch duplicates: same normalized title + platform. First
/// occurrence wins; order is preserved.
pub fn dedupe_candidates(candidates: Vec<TrendCandidate>) -> Vec<TrendCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.dedup_key()))
        .collect()
}

/// Drop candidates whose normalized title already exists in the cached
/// set. Cross-batch variant: platform is not part of the key here.
pub fn filter_against_cached(
    candidates: Vec<TrendCandidate>,
    cached: &[TrendCandidate],
) -> Vec<TrendCandidate> {
    let seen: HashSet<String> = cached
        .iter()
        .filter(|c| !c.title.is_empty())
        .map(|c| normalized_title(&c.title))
        .collect();

    candidates
        .into_iter()
        .filter(|c| !c.title.is_empty() && !seen.contains(&normalized_title(&c.title)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::category::NicheCategory;
    use crate::domain::values::platform::Platform;

    fn raw(title: &str, platform: Platform, score: f64) -> RawTrend {
        RawTrend {
            title: title.to_string(),
            platform,
            score,
            url: None,
            asin: None,
        }
    }

    #[test]
    fn test_normalize_clamps_and_classifies() {
        let n = Normalizer::default();
        let c = n.normalize(raw("Korean Glow Serum", Platform::Reddit, 4200.0));
        assert_eq!(c.score, 100.0);
        assert_eq!(c.category, NicheCategory::Beauty);
        assert!(c.created_at.is_some());
    }

    #[test]
    fn test_normalize_garbage_score_to_zero() {
        let n = Normalizer::default();
        let c = n.normalize(raw("Glow Serum", Platform::Google, f64::NAN));
        assert_eq!(c.score, 0.0);
    }

    #[test]
    fn test_local_stamp_is_utc_minus_six() {
        let n = Normalizer::default();
        let now = DateTime::parse_from_rfc3339("2026-08-04T03:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let c = n.normalize_at(raw("Glow Serum", Platform::Google, 50.0), now);
        // 03:30 UTC is 21:30 the previous day at UTC-6.
        assert_eq!(c.created_date, "2026-08-03");
        assert_eq!(c.created_time, "21:30:00");
    }

    #[test]
    fn test_dedupe_first_wins() {
        let n = Normalizer::default();
        let a = n.normalize(raw("Hot Deal", Platform::Reddit, 10.0));
        let b = n.normalize(raw("hot deal ", Platform::Reddit, 90.0));
        let out = dedupe_candidates(vec![a, b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].score, 10.0);
    }

    #[test]
    fn test_dedupe_platform_part_of_key() {
        let n = Normalizer::default();
        let a = n.normalize(raw("Hot Deal", Platform::Reddit, 10.0));
        let b = n.normalize(raw("Hot Deal", Platform::Google, 20.0));
        assert_eq!(dedupe_candidates(vec![a, b]).len(), 2);
    }

    #[test]
    fn test_dedupe_idempotent() {
        let n = Normalizer::default();
        let batch: Vec<TrendCandidate> = vec![
            n.normalize(raw("A", Platform::Reddit, 1.0)),
            n.normalize(raw("a", Platform::Reddit, 2.0)),
            n.normalize(raw("B", Platform::Google, 3.0)),
        ];
        let once = dedupe_candidates(batch);
        let titles: Vec<String> = once.iter().map(|c| c.title.clone()).collect();
        let twice = dedupe_candidates(once);
        assert_eq!(
            titles,
            twice.iter().map(|c| c.title.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_filter_against_cached_ignores_platform() {
        let n = Normalizer::default();
        let cached = vec![n.normalize(raw("Hot Deal", Platform::Reddit, 10.0))];
        let fresh = vec![
            n.normalize(raw("HOT DEAL", Platform::Google, 20.0)),
            n.normalize(raw("New Gadget", Platform::Google, 30.0)),
        ];
        let out = filter_against_cached(fresh, &cached);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "New Gadget");
    }
}
