//! Yahoo Finance equity prices.
//!
//! API: `https://query1.finance.yahoo.com/v8/finance/chart/{symbol}`
//! Query: `range=1d&interval=5m` (today's intraday 5-minute bars).
//! Auth: none, but a browser-like User-Agent is required.
//!
//! Only the last non-null close of the series is used.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::PriceSource;
use crate::config::PricesConfig;
use crate::types::MonitorError;

const PROVIDER_NAME: &str = "yahoo";

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct YahooChartClient {
    http: Client,
    base_url: String,
    range: String,
    interval: String,
}

impl YahooChartClient {
    pub fn new(cfg: &PricesConfig) -> Result<Self, MonitorError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent("Mozilla/5.0")
            .build()
            .map_err(|e| MonitorError::Config(format!("failed to build Yahoo HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: cfg.stock_base_url.trim_end_matches('/').to_string(),
            range: cfg.stock_range.clone(),
            interval: cfg.stock_interval.clone(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}",
            self.base_url,
            urlencoding::encode(symbol),
            self.range,
            self.interval
        )
    }
}

/// Last non-null close in a chart response body.
fn last_close(symbol: &str, body: &str) -> Result<f64, MonitorError> {
    let resp: ChartResponse =
        serde_json::from_str(body).map_err(|e| MonitorError::parse(symbol, e))?;

    if let Some(err) = resp.chart.error {
        debug!(symbol, code = %err.code, description = %err.description, "Yahoo chart error");
        return Err(MonitorError::data_absent(symbol));
    }

    resp.chart
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|r| r.indicators.quote.into_iter().next())
        .and_then(|q| q.close.into_iter().rev().flatten().next())
        .ok_or_else(|| MonitorError::data_absent(symbol))
}

#[async_trait]
impl PriceSource for YahooChartClient {
    async fn latest_price(&self, symbol: &str) -> Result<f64, MonitorError> {
        let url = self.chart_url(symbol);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| MonitorError::transport(symbol, e))?;

        // Unknown symbols come back as 404 with a chart.error body
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| MonitorError::transport(symbol, e))?;

        match last_close(symbol, &body) {
            Err(MonitorError::Parse { .. }) if !status.is_success() => {
                Err(MonitorError::transport(symbol, format!("HTTP {status}")))
            }
            other => other,
        }
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
