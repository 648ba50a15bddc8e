//! One monitoring pass: news → sentiment → stock quotes → crypto quotes
//! → classification.
//!
//! News and sentiment failures abort the pass. Price lookups never do:
//! failed symbols are left out of the report and listed as failures,
//! even when every symbol fails.

use chrono::Utc;
use tracing::info;

use crate::config::PredictionConfig;
use crate::news::NewsFetcher;
use crate::prices::{quote_all, PriceSource};
use crate::sentiment::SentimentScorer;
use crate::types::{MonitorError, PredictionLabel, Report};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Sentiment cut-offs for the direction call. Both comparisons are
/// strict, so a score equal to either threshold is `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub up: f64,
    pub down: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { up: 0.1, down: -0.1 }
    }
}

impl From<&PredictionConfig> for Thresholds {
    fn from(cfg: &PredictionConfig) -> Self {
        Self {
            up: cfg.up_threshold,
            down: cfg.down_threshold,
        }
    }
}

impl Thresholds {
    pub fn classify(&self, sentiment: f64) -> PredictionLabel {
        if sentiment > self.up {
            PredictionLabel::Up
        } else if sentiment < self.down {
            PredictionLabel::Down
        } else {
            PredictionLabel::Neutral
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

pub struct PredictionPipeline {
    news: Box<dyn NewsFetcher>,
    scorer: SentimentScorer,
    stocks: Box<dyn PriceSource>,
    crypto: Box<dyn PriceSource>,
    thresholds: Thresholds,
}

impl PredictionPipeline {
    pub fn new(
        news: Box<dyn NewsFetcher>,
        scorer: SentimentScorer,
        stocks: Box<dyn PriceSource>,
        crypto: Box<dyn PriceSource>,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            news,
            scorer,
            stocks,
            crypto,
            thresholds,
        }
    }

    /// Run a single pass and build its report.
    pub async fn run_once(
        &self,
        stock_symbols: &[String],
        crypto_pairs: &[String],
    ) -> Result<Report, MonitorError> {
        info!(source = self.news.name(), "Fetching cryptocurrency news...");
        let articles = self.news.fetch_articles().await?;
        let sentiment = self.scorer.score(&articles).await?;
        info!(articles = articles.len(), sentiment = format!("{sentiment:.2}"), "News scored");

        info!(provider = self.stocks.name(), count = stock_symbols.len(), "Fetching stock prices...");
        let stock_prices = quote_all(self.stocks.as_ref(), stock_symbols).await;

        info!(provider = self.crypto.name(), count = crypto_pairs.len(), "Fetching cryptocurrency prices...");
        let crypto_prices = quote_all(self.crypto.as_ref(), crypto_pairs).await;

        let label = self.thresholds.classify(sentiment);

        Ok(Report {
            generated_at: Utc::now(),
            articles: articles.len(),
            sentiment,
            stock_prices,
            crypto_prices,
            label,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
