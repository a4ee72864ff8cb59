use crate::domain::entities::product_record::ProductRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::marketplace::{MarketplaceProvider, PopularitySnapshot};
use async_trait::async_trait;
use std::collections::HashMap;

/// Sales rank assumed when the marketplace omits one. Deep enough to
/// score low without zeroing the rank signal entirely.
const DEFAULT_RANK: f64 = 50_000.0;

/// Keepa-backed marketplace lookups: one batched light query for
/// popularity signals and a per-identifier detail query for promotion.
pub struct KeepaClient {
    api_key: String,
    base_url: String,
    trends_base_url: String,
    client: reqwest::Client,
}

impl KeepaClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.keepa.com".into(),
            trends_base_url: "https://trends.google.com".into(),
            client: reqwest::Client::builder()
                .user_agent("TrendScout/0.1")
                .build()
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ProductsResponse {
    #[serde(default)]
    products: Vec<KeepaProduct>,
}

#[derive(Debug, serde::Deserialize)]
struct KeepaProduct {
    asin: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    features: Option<Vec<String>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    drops30: Option<f64>,
    #[serde(default, rename = "imagesCSV")]
    images_csv: Option<String>,
    #[serde(default, rename = "buyBoxPrice")]
    buy_box_price: Option<i64>,
    #[serde(default)]
    stats: Option<KeepaStats>,
}

#[derive(Debug, serde::Deserialize)]
struct KeepaStats {
    #[serde(default)]
    bsr: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct TimelineResponse {
    #[serde(default)]
    default: Option<TimelineDefault>,
}

#[derive(Debug, serde::Deserialize)]
struct TimelineDefault {
    #[serde(default, rename = "timelineData")]
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, serde::Deserialize)]
struct TimelinePoint {
    #[serde(default)]
    value: Vec<f64>,
}

#[async_trait]
impl MarketplaceProvider for KeepaClient {
    async fn popularity(
        &self,
        asins: &[String],
    ) -> Result<HashMap<String, PopularitySnapshot>, DomainError> {
        if asins.is_empty() {
            return Ok(HashMap::new());
        }
        if self.api_key.is_empty() {
            return Err(DomainError::InvalidInput("KEEPA_API_KEY not set".into()));
        }

        let url = format!(
            "{}/product?key={}&domain=1&history=0&buybox=1&asin={}",
            self.base_url,
            self.api_key,
            asins.join(",")
        );
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::Network(format!(
                "Keepa product query returned {}",
                resp.status()
            )));
        }

        let data: ProductsResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;

        Ok(data
            .products
            .into_iter()
            .map(|p| {
                let snapshot = PopularitySnapshot {
                    asin: p.asin.clone(),
                    price_drop_frequency: p.drops30.unwrap_or(0.0),
                    popularity_rank: p
                        .stats
                        .and_then(|s| s.bsr)
                        .unwrap_or(DEFAULT_RANK),
                };
                (p.asin, snapshot)
            })
            .collect())
    }

    async fn product_detail(&self, asin: &str) -> Result<Option<ProductRecord>, DomainError> {
        if self.api_key.is_empty() {
            return Err(DomainError::InvalidInput("KEEPA_API_KEY not set".into()));
        }

        let url = format!(
            "{}/product?key={}&domain=1&asin={}",
            self.base_url, self.api_key, asin
        );
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::Network(format!(
                "Keepa detail query returned {} for {asin}",
                resp.status()
            )));
        }

        let data: ProductsResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;

        let Some(p) = data.products.into_iter().next() else {
            return Ok(None);
        };

        let title = clean_text(p.title.as_deref().unwrap_or("Amazon Product"));
        let bullets = p
            .features
            .unwrap_or_default()
            .into_iter()
            .map(|b| clean_text(&b))
            .collect();
        let description = clean_text(p.description.as_deref().unwrap_or(""));
        let images = image_urls(p.images_csv.as_deref().unwrap_or(""));
        let price = p
            .buy_box_price
            .filter(|cents| *cents > 0)
            .map(|cents| format!("{:.2}", cents as f64 / 100.0));

        // Best-effort external interest signal; a failed lookup scores 0.
        let trend_score = self.search_interest(&title).await;

        Ok(Some(ProductRecord::new(
            asin.to_string(),
            title,
            bullets,
            description,
            price,
            images,
            trend_score,
            "keepa".to_string(),
        )))
    }
}

impl KeepaClient {
    /// Average search interest over the last 7 days, 0–100. The widget
    /// endpoint prefixes its JSON with an anti-hijacking marker that has
    /// to be stripped before parsing.
    async fn search_interest(&self, keyword: &str) -> f64 {
        if keyword.is_empty() {
            return 0.0;
        }
        let req = format!(
            r#"{{"time":"now 7-d","resolution":"HOUR","locale":"en-US","comparisonItem":[{{"keyword":"{}","geo":"US"}}],"requestOptions":{{"property":"","backend":"IZG","category":0}}}}"#,
            keyword.replace('"', "")
        );
        let url = format!(
            "{}/trends/api/widgetdata/multiline",
            self.trends_base_url
        );

        let request = self
            .client
            .get(&url)
            .query(&[("hl", "en-US"), ("tz", "-180"), ("req", req.as_str())]);
        let body = match request.send().await {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(text) => text,
                Err(_) => return 0.0,
            },
            _ => return 0.0,
        };

        parse_interest(&body)
    }
}

fn parse_interest(body: &str) -> f64 {
    let clean = body.trim_start_matches(")]}',").trim_start();
    let Ok(data) = serde_json::from_str::<TimelineResponse>(clean) else {
        return 0.0;
    };
    let points = data
        .default
        .map(|d| d.timeline_data)
        .unwrap_or_default();
    if points.is_empty() {
        return 0.0;
    }
    let sum: f64 = points
        .iter()
        .map(|p| p.value.first().copied().unwrap_or(0.0))
        .sum();
    (sum / points.len() as f64).round()
}

/// Strip markup remnants and collapse whitespace.
fn clean_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn image_urls(images_csv: &str) -> Vec<String> {
    images_csv
        .split(',')
        .filter(|id| !id.is_empty())
        .map(|id| format!("https://m.media-amazon.com/images/I/{id}"))
        .collect()
}
