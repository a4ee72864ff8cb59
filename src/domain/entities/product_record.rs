use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder used when a product ships with no usable image.
pub const PLACEHOLDER_IMAGE: &str = "https://m.media-amazon.com/images/I/placeholder-image.jpg";

/// Enriched detail for a candidate promoted to "selected". Built on demand
/// from the marketplace detail lookup, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub asin: String,
    pub title: String,
    /// Feature bullets, at most 5.
    pub bullets: Vec<String>,
    pub description: String,
    /// Formatted dollar price, when the marketplace reports one.
    pub price: Option<String>,
    /// At least one entry; padded with [`PLACEHOLDER_IMAGE`] if the
    /// marketplace returned none.
    pub images: Vec<String>,
    pub main_image: String,
    pub affiliate_url: String,
    /// External search-interest signal, 0–100.
    pub trend_score: f64,
    /// Which lookup path produced the record ("keepa" or "fallback").
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

impl ProductRecord {
    /// Normalize raw marketplace fields into the record invariants:
    /// bullets capped at 5, images capped at 7 and padded with the
    /// placeholder when empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        asin: String,
        title: String,
        bullets: Vec<String>,
        description: String,
        price: Option<String>,
        mut images: Vec<String>,
        trend_score: f64,
        source: String,
    ) -> Self {
        let mut bullets = bullets;
        bullets.retain(|b| !b.is_empty());
        bullets.truncate(5);

        images.retain(|i| !i.is_empty());
        images.truncate(7);
        if images.is_empty() {
            images.push(PLACEHOLDER_IMAGE.to_string());
        }
        let main_image = images[0].clone();
        let affiliate_url = format!("https://www.amazon.com/dp/{asin}?tag=trendscout-20");

        Self {
            asin,
            title,
            bullets,
            description,
            price,
            images,
            main_image,
            affiliate_url,
            trend_score,
            source,
            fetched_at: Utc::now(),
        }
    }
}
