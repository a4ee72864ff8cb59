use crate::domain::ports::trend_source::{RawTrend, SourceError, TrendSource};
use crate::domain::values::platform::Platform;
use async_trait::async_trait;

/// ClickBank affiliate-network feed: the current top-gravity product
/// list. Gravity is the source-native score.
pub struct ClickbankFeed {
    base_url: String,
    client: reqwest::Client,
}

impl ClickbankFeed {
    pub fn new() -> Self {
        Self {
            base_url: "https://api.clickbank.com/rest/1.3".into(),
            client: reqwest::Client::builder()
                .user_agent("TrendScout/0.1")
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for ClickbankFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Deserialize)]
struct TopGravityResponse {
    #[serde(default)]
    topgravity: Vec<GravityProduct>,
}

#[derive(Debug, serde::Deserialize)]
struct GravityProduct {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    gravity: Option<f64>,
    #[serde(default, rename = "pitchPage")]
    pitch_page: Option<String>,
}

#[async_trait]
impl TrendSource for ClickbankFeed {
    fn name(&self) -> &str {
        "clickbank"
    }

    async fn fetch(&self) -> Result<Vec<RawTrend>, SourceError> {
        let resp = self
            .client
            .get(format!("{}/products/topgravity", self.base_url))
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Network(format!(
                "ClickBank API returned {}",
                resp.status()
            )));
        }

        let data: TopGravityResponse = resp
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        Ok(data
            .topgravity
            .into_iter()
            .map(|p| RawTrend {
                title: p.title.unwrap_or_default(),
                platform: Platform::Clickbank,
                score: p.gravity.unwrap_or(0.0),
                url: p.pitch_page,
                asin: None,
            })
            .collect())
    }
}
