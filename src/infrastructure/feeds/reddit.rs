use crate::domain::ports::trend_source::{RawTrend, SourceError, TrendSource};
use crate::domain::values::platform::Platform;
use async_trait::async_trait;

/// Social-forum feed: the "hot" listing of an affiliate-marketing
/// subreddit. Upvotes are the source-native score.
pub struct RedditFeed {
    subreddit: String,
    limit: u32,
    base_url: String,
    client: reqwest::Client,
}

impl RedditFeed {
    pub fn new(subreddit: impl Into<String>) -> Self {
        Self {
            subreddit: subreddit.into(),
            limit: 40,
            base_url: "https://www.reddit.com".into(),
            client: reqwest::Client::builder()
                .user_agent("TrendScout/0.1")
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for RedditFeed {
    fn default() -> Self {
        Self::new("affiliatemarketing")
    }
}

#[derive(Debug, serde::Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, serde::Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Post>,
}

#[derive(Debug, serde::Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, serde::Deserialize)]
struct PostData {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    ups: Option<f64>,
    #[serde(default)]
    url: Option<String>,
}

#[async_trait]
impl TrendSource for RedditFeed {
    fn name(&self) -> &str {
        "reddit"
    }

    async fn fetch(&self) -> Result<Vec<RawTrend>, SourceError> {
        let url = format!(
            "{}/r/{}/hot.json?limit={}",
            self.base_url, self.subreddit, self.limit
        );
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Network(format!(
                "Reddit API returned {} for r/{}",
                resp.status(),
                self.subreddit
            )));
        }

        let listing: Listing = resp
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|p| RawTrend {
                title: p.data.title.unwrap_or_default(),
                platform: Platform::Reddit,
                score: p.data.ups.unwrap_or(0.0),
                url: p.data.url,
                asin: None,
            })
            .collect())
    }
}
