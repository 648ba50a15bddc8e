//! market-pulse: crypto news sentiment monitor.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the news, sentiment and price components, and runs the
//! supervised polling loop until Ctrl+C.

use anyhow::{Context, Result};
use tracing::info;

use market_pulse::config;
use market_pulse::engine::pipeline::{PredictionPipeline, Thresholds};
use market_pulse::engine::poller::Poller;
use market_pulse::news::html::HtmlNewsFetcher;
use market_pulse::prices::binance::BinanceTickerClient;
use market_pulse::prices::yahoo::YahooChartClient;
use market_pulse::sentiment::{LexiconSource, SentimentScorer};

const BANNER: &str = r#"
 __  __    _    ____  _  _______ _____   ____  _   _ _     ____  _____
|  \/  |  / \  |  _ \| |/ / ____|_   _| |  _ \| | | | |   / ___|| ____|
| |\/| | / _ \ | |_) | ' /|  _|   | |   | |_) | | | | |   \___ \|  _|
| |  | |/ ___ \|  _ <| . \| |___  | |   |  __/| |_| | |___ ___) | |___
|_|  |_/_/   \_\_| \_\_|\_\_____| |_|   |_|    \___/|_____|____/|_____|

  Crypto news sentiment → market direction
  v0.1.0
"#;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path =
        std::env::var("PULSE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::AppConfig::load_or_default(&config_path)?;

    println!("{BANNER}");
    info!(
        agent_name = %cfg.agent.name,
        poll_interval_secs = cfg.agent.poll_interval_secs,
        stocks = ?cfg.prices.stock_symbols,
        crypto = ?cfg.prices.crypto_pairs,
        up_threshold = cfg.prediction.up_threshold,
        down_threshold = cfg.prediction.down_threshold,
        "market-pulse starting up"
    );

    // -- Initialise components -------------------------------------------

    let news = HtmlNewsFetcher::new(&cfg.news).context("Failed to initialise news fetcher")?;
    let stocks = YahooChartClient::new(&cfg.prices).context("Failed to initialise stock prices")?;
    let crypto =
        BinanceTickerClient::new(&cfg.prices).context("Failed to initialise exchange prices")?;
    let scorer = SentimentScorer::new(LexiconSource::from(cfg.sentiment.lexicon_path.clone()));

    let pipeline = PredictionPipeline::new(
        Box::new(news),
        scorer,
        Box::new(stocks),
        Box::new(crypto),
        Thresholds::from(&cfg.prediction),
    );

    let poller = Poller::new(
        pipeline,
        cfg.prices.stock_symbols.clone(),
        cfg.prices.crypto_pairs.clone(),
        cfg.poll_interval(),
    )
    .with_max_passes(cfg.agent.max_passes);

    // -- Main loop -------------------------------------------------------

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    let stats = poller
        .run(shutdown, |outcome| {
            match outcome {
                Ok(report) => println!("{report}"),
                Err(e) => println!("Update failed: {e}"),
            }
            println!("\nWaiting for next update...\n");
        })
        .await;

    info!(
        passes = stats.passes,
        succeeded = stats.succeeded,
        failed = stats.failed,
        "market-pulse shut down cleanly."
    );

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("market_pulse=info"));

    let json_logging = std::env::var("PULSE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
