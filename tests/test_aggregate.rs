//! Tests for the aggregation pipeline: source isolation, the filter
//! chain, dedup, upsert, fallback, and hydration.

mod common;

use common::{raw, raw_with_asin, setup_with, FailingSource, MockMarketplace, StaticSource};
use std::sync::Arc;
use trendscout::domain::entities::trend_candidate::TrendCandidate;
use trendscout::domain::ports::trend_repository::TrendRepository;
use trendscout::domain::values::category::{NicheCategory, ProductIntent};
use trendscout::domain::values::platform::Platform;
use trendscout::infrastructure::sqlite::migrations::run_migrations;
use trendscout::infrastructure::sqlite::trend_repo::SqliteTrendRepo;
use trendscout::TrendScout;

#[tokio::test]
async fn test_aggregate_merges_all_sources() {
    let ts = setup_with(
        vec![StaticSource::new(
            "bestsellers",
            vec![raw("Best robot vacuum cleaner", Platform::Keepa, 60.0)],
        )],
        vec![
            StaticSource::new(
                "affiliate",
                vec![raw("Korean glow serum deal", Platform::Clickbank, 70.0)],
            ),
            StaticSource::new(
                "social",
                vec![raw("Neck massage device review", Platform::Reddit, 90.0)],
            ),
        ],
        Arc::new(MockMarketplace::default()),
    );

    let report = ts.aggregate().await;
    assert_eq!(report.fetched_total, 3);
    assert_eq!(report.kept, 3);
    assert!(!report.used_fallback);
    // roi_memory runs first but contributes nothing on an empty history
    assert_eq!(report.sources.len(), 4);
    assert!(report.sources.iter().all(|s| s.error.is_none()));
}

#[tokio::test]
async fn test_one_failing_source_does_not_affect_the_rest() {
    let good = |name: &str, title: &str, platform| {
        StaticSource::new(name, vec![raw(title, platform, 80.0)])
    };

    let ts = setup_with(
        vec![good("bestsellers", "Smart security camera", Platform::Keepa)],
        vec![
            good("affiliate", "Korean glow serum", Platform::Clickbank),
            FailingSource::new("social"),
            good("search", "Robot vacuum cleaner", Platform::Google),
        ],
        Arc::new(MockMarketplace::default()),
    );

    let report = ts.aggregate().await;
    let failed: Vec<_> = report
        .sources
        .iter()
        .filter(|s| s.error.is_some())
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].source, "social");

    // The failing source only loses its own contribution.
    assert_eq!(report.fetched_total, 3);
    assert_eq!(report.kept, 3);
    assert!(!report.used_fallback);
}

#[tokio::test]
async fn test_filter_chain_drops_noise_unbuyable_and_low_scores() {
    let ts = setup_with(
        vec![],
        vec![StaticSource::new(
            "mixed",
            vec![
                raw("", Platform::Reddit, 90.0),                          // empty title
                raw("Election night camera coverage", Platform::Reddit, 90.0), // noise
                raw("Quarterly tax filing guide", Platform::Reddit, 90.0),     // not buyable
                raw("Korean glow serum", Platform::Reddit, 20.0),              // below floor
                raw("Neck massage device", Platform::Reddit, 55.0),            // survives
            ],
        )],
        Arc::new(MockMarketplace::default()),
    );

    let report = ts.aggregate().await;
    assert_eq!(report.fetched_total, 5);
    assert_eq!(report.kept, 1);
    assert_eq!(report.candidates[0].title, "Neck massage device");
    assert_eq!(report.candidates[0].category, NicheCategory::MassageDevices);
    assert_eq!(report.candidates[0].product_intent, ProductIntent::PainRelief);
}

#[tokio::test]
async fn test_duplicate_titles_across_sources_first_seen_wins() {
    let ts = setup_with(
        vec![StaticSource::new(
            "first",
            vec![raw("Hot serum deal", Platform::Reddit, 40.0)],
        )],
        vec![StaticSource::new(
            "second",
            vec![raw("hot serum deal ", Platform::Reddit, 95.0)],
        )],
        Arc::new(MockMarketplace::default()),
    );

    let report = ts.aggregate().await;
    assert_eq!(report.kept, 1);
    assert_eq!(report.candidates[0].score, 40.0);
}

#[tokio::test]
async fn test_reaggregation_does_not_duplicate_rows() {
    let ts = setup_with(
        vec![],
        vec![StaticSource::new(
            "affiliate",
            vec![raw("Korean glow serum", Platform::Clickbank, 70.0)],
        )],
        Arc::new(MockMarketplace::default()),
    );

    // Two cycles against the same store: the second write replaces the
    // first row instead of duplicating it.
    ts.aggregate().await;
    ts.aggregate().await;
    let trends = ts.trends(3);
    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].score, 70.0);
}

#[tokio::test]
async fn test_fallback_when_live_sourcing_dies() {
    let marketplace = Arc::new(MockMarketplace::default());
    let db = tempfile::NamedTempFile::new().unwrap();
    let path = db.path().to_str().unwrap();

    // First cycle seeds the cache.
    let ts = TrendScout::with_providers(
        path,
        vec![],
        vec![StaticSource::new(
            "affiliate",
            vec![raw("Korean glow serum", Platform::Clickbank, 70.0)],
        )],
        marketplace.clone(),
    )
    .unwrap();
    let report = ts.aggregate().await;
    assert!(!report.used_fallback);
    drop(ts);

    // Second cycle: every source down. The cached candidate comes back.
    let ts = TrendScout::with_providers(
        path,
        vec![],
        vec![FailingSource::new("affiliate")],
        marketplace,
    )
    .unwrap();
    let report = ts.aggregate().await;
    assert!(report.used_fallback);
    assert_eq!(report.kept, 0);
    assert_eq!(report.candidates.len(), 1);
    assert_eq!(report.candidates[0].title, "Korean glow serum");
}

#[tokio::test]
async fn test_hydrate_backfills_identifier_from_title() {
    let db = tempfile::NamedTempFile::new().unwrap();
    let path = db.path().to_str().unwrap();

    // Seed a stored row carrying a direct-identifier title but no asin,
    // the shape older ingest cycles left behind.
    {
        let conn = rusqlite::Connection::open(path).unwrap();
        run_migrations(&conn).unwrap();
        let repo = SqliteTrendRepo::new(conn);
        repo.upsert(&[TrendCandidate {
            title: "ASIN B0C1234567".into(),
            platform: Platform::Keepa,
            score: 60.0,
            url: None,
            asin: None,
            category: NicheCategory::General,
            product_intent: ProductIntent::AmazonProduct,
            created_date: "2026-08-04".into(),
            created_time: "08:00:00".into(),
            created_at: Some(chrono::Utc::now()),
        }])
        .unwrap();
    }

    let ts = TrendScout::with_providers(
        path,
        vec![],
        vec![],
        Arc::new(MockMarketplace::default()),
    )
    .unwrap();

    let report = ts.hydrate();
    assert_eq!(report.examined, 1);
    assert_eq!(report.updated, 1);

    let trends = ts.trends(3);
    assert_eq!(trends[0].asin.as_deref(), Some("B0C1234567"));

    // Re-running finds nothing left to hydrate.
    let report = ts.hydrate();
    assert_eq!(report.examined, 0);
    assert_eq!(report.updated, 0);
}

#[tokio::test]
async fn test_aggregation_writes_telemetry_rows() {
    let db = tempfile::NamedTempFile::new().unwrap();
    let path = db.path().to_str().unwrap();

    let ts = TrendScout::with_providers(
        path,
        vec![],
        vec![StaticSource::new(
            "affiliate",
            vec![raw("Korean glow serum", Platform::Clickbank, 70.0)],
        )],
        Arc::new(MockMarketplace::default()),
    )
    .unwrap();
    ts.aggregate().await;
    drop(ts);

    let conn = rusqlite::Connection::open(path).unwrap();
    let contexts: Vec<(String, String)> = conn
        .prepare("SELECT level, message FROM performance_logs WHERE context = 'trend_aggregator' ORDER BY created_at")
        .unwrap()
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .filter_map(|r| r.ok())
        .collect();

    assert_eq!(contexts.len(), 2);
    assert_eq!(contexts[0], ("start".into(), "aggregate_start".into()));
    assert_eq!(contexts[1], ("success".into(), "aggregate_success".into()));
}

#[tokio::test]
async fn test_asin_candidates_keep_identifier_through_pipeline() {
    let ts = setup_with(
        vec![],
        vec![StaticSource::new(
            "affiliate",
            vec![raw_with_asin(
                "Korean glow serum",
                Platform::Clickbank,
                70.0,
                "B0C1234567",
            )],
        )],
        Arc::new(MockMarketplace::default()),
    );

    let report = ts.aggregate().await;
    assert_eq!(report.candidates[0].asin.as_deref(), Some("B0C1234567"));
}
