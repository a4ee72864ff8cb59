use clap::Parser;
use trendscout::cli::commands::{Cli, Commands};
use trendscout::TrendScout;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let db_path = std::env::var("TRENDSCOUT_DB").unwrap_or_else(|_| "./trendscout.db".into());

    let ts = match TrendScout::new(&db_path) {
        Ok(ts) => ts,
        Err(e) => {
            eprintln!("Error initializing trendscout: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(ts, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(ts: TrendScout, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Aggregate => {
            let report = ts.aggregate().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Select => {
            let outcome = ts.select().await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Trends { days } => {
            let trends = ts.trends(days);
            println!("{}", serde_json::to_string_pretty(&trends)?);
        }
        Commands::Fallback => {
            let trends = ts.fallback();
            println!("{}", serde_json::to_string_pretty(&trends)?);
        }
        Commands::Hydrate => {
            let report = ts.hydrate();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::RecordRevenue {
            asin,
            revenue,
            click_rate,
        } => {
            let event = ts.record_revenue(&asin, revenue, click_rate)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        Commands::Cleanup { days } => {
            let report = ts.cleanup(days);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
