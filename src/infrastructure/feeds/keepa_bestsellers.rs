use crate::domain::ports::trend_source::{RawTrend, SourceError, TrendSource};
use crate::domain::values::platform::Platform;
use async_trait::async_trait;

/// Marketplace bestseller feed: the general bestseller identifier list,
/// emitted as direct-identifier candidates ("ASIN <id>"). These rows get
/// a fixed baseline score and are hydrated with detail only if selected.
pub struct KeepaBestsellersFeed {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

/// Baseline score for bestseller candidates.
const BESTSELLER_SCORE: f64 = 60.0;
/// Most identifiers taken from the bestseller list per cycle.
const BESTSELLER_LIMIT: usize = 50;

impl KeepaBestsellersFeed {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.keepa.com".into(),
            client: reqwest::Client::builder()
                .user_agent("TrendScout/0.1")
                .build()
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct BestsellersResponse {
    #[serde(default)]
    categories: Vec<BestsellerCategory>,
}

#[derive(Debug, serde::Deserialize)]
struct BestsellerCategory {
    #[serde(default, rename = "asinList")]
    asin_list: Vec<String>,
}

#[async_trait]
impl TrendSource for KeepaBestsellersFeed {
    fn name(&self) -> &str {
        "keepa_bestsellers"
    }

    async fn fetch(&self) -> Result<Vec<RawTrend>, SourceError> {
        if self.api_key.is_empty() {
            return Err(SourceError::Config("KEEPA_API_KEY not set".into()));
        }

        let url = format!(
            "{}/bestsellers?key={}&domain=1&category=0",
            self.base_url, self.api_key
        );
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Network(format!(
                "Keepa bestsellers returned {}",
                resp.status()
            )));
        }

        let data: BestsellersResponse = resp
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        let asins = data
            .categories
            .first()
            .map(|c| c.asin_list.clone())
            .unwrap_or_default();

        Ok(asins
            .into_iter()
            .take(BESTSELLER_LIMIT)
            .map(|asin| RawTrend {
                title: format!("ASIN {asin}"),
                platform: Platform::Keepa,
                score: BESTSELLER_SCORE,
                url: Some(format!("https://amazon.com/dp/{asin}")),
                asin: Some(asin),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bestsellers_payload() {
        let json = r#"{"categories":[{"asinList":["B0AAAAAAA1","B0AAAAAAA2"]}]}"#;
        let data: BestsellersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(data.categories[0].asin_list.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let feed = KeepaBestsellersFeed::new(String::new());
        match feed.fetch().await {
            Err(SourceError::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
