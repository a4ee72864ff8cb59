use crate::domain::values::platform::Platform;
use async_trait::async_trait;

/// A raw trend record as emitted by a source adapter, before
/// normalization. Permissive by design: garbage fields are defaulted or
/// filtered downstream, never rejected here.
#[derive(Debug, Clone)]
pub struct RawTrend {
    pub title: String,
    pub platform: Platform,
    /// Source-native scale; clamped to [0,100] at normalization time.
    pub score: f64,
    pub url: Option<String>,
    pub asin: Option<String>,
}

/// A trend source that produces raw candidates from an external system.
#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the current batch of raw trends.
    async fn fetch(&self) -> Result<Vec<RawTrend>, SourceError>;
}

#[derive(Debug)]
pub enum SourceError {
    /// HTTP or network error
    Network(String),
    /// Response parsing error
    Parse(String),
    /// Configuration error (missing API key, etc.)
    Config(String),
    /// Backing store error (synthetic sources read local history)
    Store(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "Network error: {msg}"),
            SourceError::Parse(msg) => write!(f, "Parse error: {msg}"),
            SourceError::Config(msg) => write!(f, "Config error: {msg}"),
            SourceError::Store(msg) => write!(f, "Store error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}
