//! Binance spot ticker prices.
//!
//! API: `https://api.binance.com/api/v3/ticker/24hr?symbol=BTCUSDT`
//! Auth: none for market data.
//!
//! Pairs are configured in `BASE/QUOTE` form (`BTC/USDT`) and mapped to
//! Binance's concatenated symbol. Only `lastPrice` is used; USDT pairs
//! are reported as USD.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use super::PriceSource;
use crate::config::PricesConfig;
use crate::types::MonitorError;

const PROVIDER_NAME: &str = "binance";

/// Subset of the 24hr ticker payload. Binance sends decimals as strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker24h {
    #[serde(default)]
    last_price: Option<String>,
}

/// Error payload, e.g. `{"code":-1121,"msg":"Invalid symbol."}`.
#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    msg: String,
}

pub struct BinanceTickerClient {
    http: Client,
    base_url: String,
}

impl BinanceTickerClient {
    pub fn new(cfg: &PricesConfig) -> Result<Self, MonitorError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| MonitorError::Config(format!("failed to build Binance HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: cfg.exchange_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn ticker_url(&self, pair: &str) -> String {
        format!(
            "{}/api/v3/ticker/24hr?symbol={}",
            self.base_url,
            exchange_symbol(pair)
        )
    }
}

/// `BTC/USDT` → `BTCUSDT`.
pub fn exchange_symbol(pair: &str) -> String {
    pair.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase()
}

/// Extract `lastPrice` from a ticker response body.
fn last_price(pair: &str, body: &str) -> Result<f64, MonitorError> {
    if let Ok(err) = serde_json::from_str::<ApiError>(body) {
        return Err(MonitorError::parse(pair, format!("Binance error {}: {}", err.code, err.msg)));
    }

    let ticker: Ticker24h =
        serde_json::from_str(body).map_err(|e| MonitorError::parse(pair, e))?;
    let raw = ticker
        .last_price
        .ok_or_else(|| MonitorError::data_absent(pair))?;
    let price: f64 = raw
        .parse()
        .map_err(|e| MonitorError::parse(pair, format!("bad lastPrice {raw:?}: {e}")))?;

    if price <= 0.0 {
        // Binance reports 0 for pairs that have not traded
        return Err(MonitorError::data_absent(pair));
    }
    Ok(price)
}

/// Server errors, rate limiting (429) and IP bans (418) are transport
/// failures; any other status is left to the body parser.
fn is_transport_status(status: StatusCode) -> bool {
    status.is_server_error()
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::IM_A_TEAPOT
}

#[async_trait]
impl PriceSource for BinanceTickerClient {
    async fn latest_price(&self, pair: &str) -> Result<f64, MonitorError> {
        let url = self.ticker_url(pair);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| MonitorError::transport(pair, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| MonitorError::transport(pair, e))?;

        if is_transport_status(status) {
            return Err(MonitorError::transport(pair, format!("HTTP {status}")));
        }
        last_price(pair, &body)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
