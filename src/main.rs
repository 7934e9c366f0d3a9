use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use trade_basis::prelude::*;
use trade_basis::report;

/// Weighted-average holding price and quantity per traded pair, rebuilt from
/// the account's full trade history.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pairs to summarize (e.g. BTCUSDT)
    #[arg(default_values = ["BTCUSDT", "ETHUSDT"])]
    symbols: Vec<String>,

    /// Print the summaries as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Wait after a rate-limited request before repeating it, in milliseconds
    #[arg(long, env = "RATE_LIMIT_COOLDOWN_MS", default_value_t = 1000)]
    cooldown_ms: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), SdkError> {
    let config = AppConfig::from_env()?;

    let client = BasisClient::builder()
        .base_url(&config.base_url)
        .credentials(config.credentials)
        .rate_limit_cooldown(Duration::from_millis(cli.cooldown_ms))
        .failure_log(Arc::new(FileFailureLog::new(config.log_dir)))
        .build()?;

    let symbols: Vec<Symbol> = cli.symbols.into_iter().map(Symbol::from).collect();
    tracing::info!(count = symbols.len(), "Fetching trade history");

    let summaries = client.summaries().collect(&symbols).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        println!("{}", report::render(&summaries));
    }

    Ok(())
}
