//! Price providers.
//!
//! Defines the `PriceSource` trait and implementations for:
//! - Yahoo Finance chart API (equities)
//! - Binance spot ticker (crypto trading pairs)
//!
//! `quote_all` fans a symbol list out over a source one lookup at a time
//! and collects successes and failures separately, so one bad symbol
//! never hides another symbol's price.

pub mod binance;
pub mod yahoo;

use async_trait::async_trait;
use tracing::{debug, warn};

#[cfg(test)]
use mockall::automock;

use crate::types::{MonitorError, PriceQuote, PriceTable, QuoteFailure};

/// Abstraction over a latest-price lookup.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Latest known price for `symbol`, in USD.
    async fn latest_price(&self, symbol: &str) -> Result<f64, MonitorError>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Look up every symbol independently.
///
/// Symbols are queried in order; each failure is logged and recorded in
/// `PriceTable::failures`, and the remaining symbols are still queried.
pub async fn quote_all<S>(source: &S, symbols: &[String]) -> PriceTable
where
    S: PriceSource + ?Sized,
{
    let mut table = PriceTable::default();

    for symbol in symbols {
        match source.latest_price(symbol).await {
            Ok(price) if price.is_finite() => {
                debug!(provider = source.name(), symbol = %symbol, price, "Quote received");
                table.quotes.push(PriceQuote::new(symbol.clone(), price));
            }
            Ok(price) => {
                warn!(provider = source.name(), symbol = %symbol, price, "Non-finite price dropped");
                table.failures.push(QuoteFailure {
                    symbol: symbol.clone(),
                    error: MonitorError::parse(symbol.clone(), format!("non-finite price {price}")),
                });
            }
            Err(e) => {
                warn!(provider = source.name(), symbol = %symbol, error = %e, "Quote failed");
                table.failures.push(QuoteFailure {
                    symbol: symbol.clone(),
                    error: e,
                });
            }
        }
    }

    table
}
