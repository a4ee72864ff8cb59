use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Originating source of a trend candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Affiliate-network top-gravity list
    Clickbank,
    /// Social-forum hot feed
    Reddit,
    /// Search-trends RSS feed
    Google,
    /// Marketplace bestseller list
    Keepa,
    /// Synthetic candidates re-injected from revenue history
    Amazon,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Clickbank => write!(f, "clickbank"),
            Platform::Reddit => write!(f, "reddit"),
            Platform::Google => write!(f, "google"),
            Platform::Keepa => write!(f, "keepa"),
            Platform::Amazon => write!(f, "amazon"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clickbank" => Ok(Platform::Clickbank),
            "reddit" => Ok(Platform::Reddit),
            "google" => Ok(Platform::Google),
            "keepa" => Ok(Platform::Keepa),
            "amazon" => Ok(Platform::Amazon),
            _ => Err(format!("Unknown platform: {s}")),
        }
    }
}
