use crate::domain::values::category::{NicheCategory, ProductIntent};
use crate::domain::values::platform::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A prospective item of interest flowing through the ingestion pipeline.
///
/// `created_date`/`created_time` are the local wall clock at capture, kept
/// for human-facing output only; ordering and freshness always use
/// `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendCandidate {
    pub title: String,
    pub platform: Platform,
    /// Canonical score, clamped to [0,100] at normalization time.
    pub score: f64,
    pub url: Option<String>,
    /// External marketplace identifier, when one is known.
    pub asin: Option<String>,
    pub category: NicheCategory,
    pub product_intent: ProductIntent,
    pub created_date: String,
    pub created_time: String,
    /// UTC capture instant. `None` when a stored row carried an
    /// unparsable timestamp; such rows score a conservative freshness.
    pub created_at: Option<DateTime<Utc>>,
}

impl TrendCandidate {
    /// Unique key the store upserts on: the reference link when present,
    /// otherwise a synthetic key derived from the title.
    pub fn storage_key(&self) -> String {
        match &self.url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => format!("trend-{}", self.title),
        }
    }

    /// Intra-batch dedup key: normalized title composed with platform.
    pub fn dedup_key(&self) -> String {
        format!("{}|{}", normalized_title(&self.title), self.platform)
    }
}

/// Lowercased, trimmed title used for duplicate matching.
pub fn normalized_title(title: &str) -> String {
    title.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, url: Option<&str>) -> TrendCandidate {
        TrendCandidate {
            title: title.to_string(),
            platform: Platform::Reddit,
            score: 50.0,
            url: url.map(String::from),
            asin: None,
            category: NicheCategory::General,
            product_intent: ProductIntent::None,
            created_date: "2026-08-04".into(),
            created_time: "10:00:00".into(),
            created_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_storage_key_prefers_url() {
        let c = candidate("Glow Serum", Some("https://example.com/p/1"));
        assert_eq!(c.storage_key(), "https://example.com/p/1");
    }

    #[test]
    fn test_storage_key_synthetic_without_url() {
        let c = candidate("Glow Serum", None);
        assert_eq!(c.storage_key(), "trend-Glow Serum");
    }

    #[test]
    fn test_dedup_key_normalizes_title() {
        let a = candidate("Hot Deal", None);
        let b = candidate("  hot deal ", None);
        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
