//! Supervised polling loop.
//!
//! Runs a pass, hands the report to the caller, sleeps for the poll
//! interval and repeats. A failed pass is logged and counted; the loop
//! carries on with the next one. Only the shutdown future or
//! `max_passes` ends it.

use std::future::Future;
use std::time::Duration;
use tracing::{error, info};

use super::pipeline::PredictionPipeline;
use crate::types::{MonitorError, Report};

/// Counters for a finished polling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub passes: u64,
    pub succeeded: u64,
    pub failed: u64,
}

pub struct Poller {
    pipeline: PredictionPipeline,
    stock_symbols: Vec<String>,
    crypto_pairs: Vec<String>,
    interval: Duration,
    max_passes: Option<u64>,
}

impl Poller {
    pub fn new(
        pipeline: PredictionPipeline,
        stock_symbols: Vec<String>,
        crypto_pairs: Vec<String>,
        interval: Duration,
    ) -> Self {
        Self {
            pipeline,
            stock_symbols,
            crypto_pairs,
            interval,
            max_passes: None,
        }
    }

    /// Stop after `n` passes instead of running until shutdown.
    pub fn with_max_passes(mut self, n: Option<u64>) -> Self {
        self.max_passes = n;
        self
    }

    /// Poll until `shutdown` resolves or `max_passes` is reached.
    ///
    /// `on_pass` is called once per finished pass with its report or the
    /// error that aborted it.
    pub async fn run<F, R>(&self, shutdown: F, mut on_pass: R) -> PollStats
    where
        F: Future<Output = ()>,
        R: FnMut(Result<&Report, &MonitorError>),
    {
        let mut stats = PollStats::default();
        tokio::pin!(shutdown);

        info!(
            interval_secs = self.interval.as_secs(),
            max_passes = ?self.max_passes,
            "Entering polling loop. Press Ctrl+C to stop."
        );

        loop {
            if self.limit_reached(stats.passes) {
                info!(passes = stats.passes, "Pass limit reached.");
                break;
            }

            stats.passes += 1;
            info!(pass = stats.passes, "Starting pass");

            let outcome = tokio::select! {
                r = self.pipeline.run_once(&self.stock_symbols, &self.crypto_pairs) => r,
                _ = &mut shutdown => {
                    info!("Shutdown signal received mid-pass.");
                    stats.passes -= 1;
                    break;
                }
            };

            match &outcome {
                Ok(report) => {
                    stats.succeeded += 1;
                    info!(
                        pass = stats.passes,
                        articles = report.articles,
                        sentiment = format!("{:.2}", report.sentiment),
                        label = %report.label,
                        stocks = report.stock_prices.len(),
                        stock_failures = report.stock_prices.failures.len(),
                        crypto = report.crypto_prices.len(),
                        crypto_failures = report.crypto_prices.failures.len(),
                        "Pass complete"
                    );
                }
                Err(e) => {
                    stats.failed += 1;
                    error!(pass = stats.passes, error = %e, "Pass failed, continuing to next");
                }
            }
            on_pass(outcome.as_ref());

            if self.limit_reached(stats.passes) {
                info!(passes = stats.passes, "Pass limit reached.");
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = &mut shutdown => {
                    info!("Shutdown signal received.");
                    break;
                }
            }
        }

        stats
    }

    fn limit_reached(&self, passes: u64) -> bool {
        self.max_passes.is_some_and(|max| passes >= max)
    }
}
