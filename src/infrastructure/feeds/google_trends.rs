use crate::domain::ports::trend_source::{RawTrend, SourceError, TrendSource};
use crate::domain::values::platform::Platform;
use async_trait::async_trait;

/// Search-trends feed: the daily trending RSS. The feed carries no
/// per-item magnitude, so every item gets a fixed mid-range score.
pub struct GoogleTrendsFeed {
    base_url: String,
    geo: String,
    client: reqwest::Client,
}

/// Fixed score for search-trend items (the feed is unranked).
const SEARCH_TREND_SCORE: f64 = 45.0;

impl GoogleTrendsFeed {
    pub fn new(geo: impl Into<String>) -> Self {
        Self {
            base_url: "https://trends.google.com".into(),
            geo: geo.into(),
            client: reqwest::Client::builder()
                .user_agent("TrendScout/0.1")
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for GoogleTrendsFeed {
    fn default() -> Self {
        Self::new("US")
    }
}

#[async_trait]
impl TrendSource for GoogleTrendsFeed {
    fn name(&self) -> &str {
        "google_trends"
    }

    async fn fetch(&self) -> Result<Vec<RawTrend>, SourceError> {
        let url = format!("{}/trending/rss?geo={}", self.base_url, self.geo);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Network(format!(
                "Google Trends returned {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(extract_titles(&body)
            .into_iter()
            .map(|title| RawTrend {
                title,
                platform: Platform::Google,
                score: SEARCH_TREND_SCORE,
                url: None,
                asin: None,
            })
            .collect())
    }
}

/// Pull `<title>` element texts out of the RSS body. The channel's own
/// header title ("Daily Search Trends") is skipped. Tolerant of
/// malformed XML: an unterminated tag just ends the scan.
fn extract_titles(body: &str) -> Vec<String> {
    let mut titles = Vec::new();
    let mut rest = body;
    while let Some(start) = rest.find("<title>") {
        rest = &rest[start + "<title>".len()..];
        let Some(end) = rest.find("</title>") else {
            break;
        };
        let title = rest[..end].trim();
        if !title.is_empty() && !title.contains("Daily Search Trends") {
            titles.push(title.to_string());
        }
        rest = &rest[end + "</title>".len()..];
    }
    titles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_titles_skips_channel_header() {
        let rss = "<rss><channel><title>Daily Search Trends</title>\
                   <item><title>korean skincare</title></item>\
                   <item><title>robot vacuum</title></item></channel></rss>";
        assert_eq!(extract_titles(rss), vec!["korean skincare", "robot vacuum"]);
    }

    #[test]
    fn test_extract_titles_tolerates_unterminated_tag() {
        let rss = "<title>first</title><title>broken";
        assert_eq!(extract_titles(rss), vec!["first"]);
    }

    #[test]
    fn test_extract_titles_empty_body() {
        assert!(extract_titles("no xml here").is_empty());
    }
}
