//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section has defaults matching the stock deployment (CNN crypto
//! page, three equities, three USDT pairs, 10-minute cadence), so the
//! file is optional and may override any subset of keys.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub news: NewsConfig,
    pub sentiment: SentimentConfig,
    pub prices: PricesConfig,
    pub prediction: PredictionConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AgentConfig {
    pub name: String,
    pub poll_interval_secs: u64,
    /// Stop after this many passes. Unset means run until interrupted.
    pub max_passes: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "PULSE-001".to_string(),
            poll_interval_secs: 600,
            max_passes: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NewsConfig {
    pub landing_url: String,
    /// Prefix for relative article links.
    pub base_url: String,
    pub headline_selector: String,
    pub body_selector: String,
    pub max_articles: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            landing_url: "https://edition.cnn.com/business/cryptocurrency".to_string(),
            base_url: "https://edition.cnn.com".to_string(),
            headline_selector: "h3.cnn-search__result-headline".to_string(),
            body_selector: "div.l-container".to_string(),
            max_articles: 20,
            timeout_secs: 15,
            user_agent: "Mozilla/5.0 (compatible; market-pulse/0.1)".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SentimentConfig {
    /// VADER-format lexicon file. The built-in lexicon is used when unset.
    pub lexicon_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PricesConfig {
    pub stock_symbols: Vec<String>,
    pub crypto_pairs: Vec<String>,
    pub stock_base_url: String,
    pub stock_range: String,
    pub stock_interval: String,
    pub exchange_base_url: String,
    pub timeout_secs: u64,
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self {
            stock_symbols: vec!["005930.KS".into(), "AAPL".into(), "GOOG".into()],
            crypto_pairs: vec!["BTC/USDT".into(), "ETH/USDT".into(), "XRP/USDT".into()],
            stock_base_url: "https://query1.finance.yahoo.com".to_string(),
            stock_range: "1d".to_string(),
            stock_interval: "5m".to_string(),
            exchange_base_url: "https://api.binance.com".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PredictionConfig {
    pub up_threshold: f64,
    pub down_threshold: f64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            up_threshold: 0.1,
            down_threshold: -0.1,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            info!(path, "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.agent.poll_interval_secs == 0 {
            bail!("agent.poll_interval_secs must be greater than zero");
        }
        if self.agent.max_passes == Some(0) {
            bail!("agent.max_passes must be at least 1 when set");
        }
        if self.prediction.down_threshold > self.prediction.up_threshold {
            bail!(
                "prediction.down_threshold ({}) must not exceed up_threshold ({})",
                self.prediction.down_threshold,
                self.prediction.up_threshold
            );
        }
        if !(-1.0..=1.0).contains(&self.prediction.up_threshold)
            || !(-1.0..=1.0).contains(&self.prediction.down_threshold)
        {
            bail!("prediction thresholds must lie within [-1, 1]");
        }
        if self.news.timeout_secs == 0 || self.prices.timeout_secs == 0 {
            bail!("request timeouts must be greater than zero");
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.agent.poll_interval_secs)
    }
}
