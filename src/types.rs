//! Shared types for the monitor.
//!
//! Everything here is pass-scoped: produced during one pipeline pass,
//! printed, then dropped. Nothing is persisted between passes.

use chrono::{DateTime, Utc};
use std::fmt;

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

/// A scraped news article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub body: String,
    /// Resolved article link, kept for log context.
    pub url: String,
}

impl Article {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            url: String::new(),
        }
    }

    /// The text that gets scored: title and body joined by a single space.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// Quote currency for every price we report.
pub const QUOTE_CURRENCY: &str = "USD";

/// Latest known price for one requested symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: f64,
    pub currency: String,
}

impl PriceQuote {
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            currency: QUOTE_CURRENCY.to_string(),
        }
    }
}

/// A symbol whose lookup failed this pass.
#[derive(Debug)]
pub struct QuoteFailure {
    pub symbol: String,
    pub error: MonitorError,
}

/// Symbol → price mapping for one batch of lookups.
///
/// Successful quotes keep the order the symbols were requested in.
/// Failed symbols never appear in `quotes`; they are collected in
/// `failures` instead.
#[derive(Debug, Default)]
pub struct PriceTable {
    pub quotes: Vec<PriceQuote>,
    pub failures: Vec<QuoteFailure>,
}

impl PriceTable {
    /// Price for `symbol`, if its lookup succeeded.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.quotes
            .iter()
            .find(|q| q.symbol == symbol)
            .map(|q| q.price)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.quotes.iter().map(|q| q.symbol.as_str())
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// True when symbols were requested and every one of them failed.
    pub fn all_failed(&self) -> bool {
        self.quotes.is_empty() && !self.failures.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// Coarse market direction derived from news sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionLabel {
    Up,
    Down,
    Neutral,
}

impl PredictionLabel {
    /// The sentence printed at the end of a report.
    pub fn headline(&self) -> &'static str {
        match self {
            PredictionLabel::Up => "Expecting markets to go up.",
            PredictionLabel::Down => "Expecting markets to go down.",
            PredictionLabel::Neutral => {
                "Market sentiment is neutral. No significant movement expected."
            }
        }
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionLabel::Up => write!(f, "UP"),
            PredictionLabel::Down => write!(f, "DOWN"),
            PredictionLabel::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Result of one pipeline pass.
#[derive(Debug)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    /// Number of articles that were scored.
    pub articles: usize,
    pub sentiment: f64,
    pub stock_prices: PriceTable,
    pub crypto_prices: PriceTable,
    pub label: PredictionLabel,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Market update at {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(
            f,
            "Sentiment score for recent cryptocurrency news: {:.2} ({} articles)",
            self.sentiment, self.articles
        )?;

        writeln!(f)?;
        for q in &self.stock_prices.quotes {
            writeln!(
                f,
                "Current stock price for {}: {:.2} {}",
                q.symbol, q.price, q.currency
            )?;
        }
        for failure in &self.stock_prices.failures {
            writeln!(f, "Stock price unavailable for {}: {}", failure.symbol, failure.error)?;
        }

        writeln!(f)?;
        for q in &self.crypto_prices.quotes {
            writeln!(
                f,
                "Current cryptocurrency price for {}: {:.2} {}",
                q.symbol, q.price, q.currency
            )?;
        }
        for failure in &self.crypto_prices.failures {
            writeln!(
                f,
                "Cryptocurrency price unavailable for {}: {}",
                failure.symbol, failure.error
            )?;
        }

        writeln!(f)?;
        write!(f, "Prediction: {}", self.label.headline())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Failure taxonomy for a monitoring pass.
///
/// `Transport`, `Parse` and `DataAbsent` on a single article or symbol
/// are recovered where they happen. `Init`, and `Transport` on the news
/// landing page, abort the pass they occur in.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Transport error ({target}): {message}")]
    Transport { target: String, message: String },

    #[error("Parse error ({target}): {message}")]
    Parse { target: String, message: String },

    #[error("No data available for {symbol}")]
    DataAbsent { symbol: String },

    #[error("Sentiment initialisation failed: {0}")]
    Init(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MonitorError {
    pub fn transport(target: impl Into<String>, message: impl fmt::Display) -> Self {
        MonitorError::Transport {
            target: target.into(),
            message: message.to_string(),
        }
    }

    pub fn parse(target: impl Into<String>, message: impl fmt::Display) -> Self {
        MonitorError::Parse {
            target: target.into(),
            message: message.to_string(),
        }
    }

    pub fn data_absent(symbol: impl Into<String>) -> Self {
        MonitorError::DataAbsent {
            symbol: symbol.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
