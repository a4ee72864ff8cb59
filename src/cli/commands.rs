use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trendscout", about = "Trend ingestion and winning-product selection engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one aggregation cycle across all trend sources
    Aggregate,
    /// Select the current winning candidate
    Select,
    /// List cached trend candidates, newest first
    Trends {
        /// Window in days
        #[arg(long, default_value = "3")]
        days: i64,
    },
    /// Show the fallback list (best cached candidates by score)
    Fallback,
    /// Backfill marketplace identifiers from direct-identifier titles
    Hydrate,
    /// Record a revenue event for the ROI feedback loop
    RecordRevenue {
        /// Marketplace identifier
        asin: String,
        /// Revenue in currency units
        revenue: f64,
        /// Click-through rate, 0.0–1.0
        #[arg(long, default_value = "0.0")]
        click_rate: f64,
    },
    /// Delete records older than the retention window
    Cleanup {
        /// Retention in days
        #[arg(long, default_value = "90")]
        days: i64,
    },
}
