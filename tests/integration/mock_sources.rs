//! In-memory collaborators for integration testing.
//!
//! `ScriptedNews` replays a fixed list of per-pass outcomes and records
//! how often it was called. Prices and polarity are `mockall` mocks.

use async_trait::async_trait;
use mockall::mock;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use market_pulse::news::NewsFetcher;
use market_pulse::prices::PriceSource;
use market_pulse::sentiment::PolarityModel;
use market_pulse::types::{Article, MonitorError};

mock! {
    pub Prices {}

    #[async_trait]
    impl PriceSource for Prices {
        async fn latest_price(&self, symbol: &str) -> Result<f64, MonitorError>;
        fn name(&self) -> &'static str;
    }
}

mock! {
    pub Polarity {}

    impl PolarityModel for Polarity {
        fn polarity(&self, text: &str) -> f64;
    }
}

/// One scripted pass: either a set of articles or a landing-page failure.
#[derive(Debug, Clone)]
pub enum NewsOutcome {
    Articles(Vec<Article>),
    Unreachable,
}

/// A news source that plays back scripted outcomes, one per call.
/// Once the script runs out the last outcome repeats.
pub struct ScriptedNews {
    script: Arc<Mutex<VecDeque<NewsOutcome>>>,
    last: Arc<Mutex<Option<NewsOutcome>>>,
    calls: Arc<Mutex<u64>>,
}

impl ScriptedNews {
    pub fn new(script: Vec<NewsOutcome>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            last: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Handle for reading the call count after the source is boxed.
    pub fn call_counter(&self) -> Arc<Mutex<u64>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl NewsFetcher for ScriptedNews {
    async fn fetch_articles(&self) -> Result<Vec<Article>, MonitorError> {
        *self.calls.lock().unwrap() += 1;

        let next = self.script.lock().unwrap().pop_front();
        let outcome = match next {
            Some(o) => {
                *self.last.lock().unwrap() = Some(o.clone());
                o
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or(NewsOutcome::Articles(Vec::new())),
        };

        match outcome {
            NewsOutcome::Articles(a) => Ok(a),
            NewsOutcome::Unreachable => Err(MonitorError::transport(
                "https://news.example/crypto",
                "connection refused",
            )),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Price mock: listed symbols resolve, everything else has no data.
pub fn prices_from(known: &'static [(&'static str, f64)]) -> MockPrices {
    let mut p = MockPrices::new();
    p.expect_name().return_const("mock");
    p.expect_latest_price().returning(move |symbol| {
        known
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, price)| *price)
            .ok_or_else(|| MonitorError::data_absent(symbol))
    });
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_news_replays_then_repeats() {
        let news = ScriptedNews::new(vec![
            NewsOutcome::Unreachable,
            NewsOutcome::Articles(vec![Article::new("t", "b")]),
        ]);
        let calls = news.call_counter();

        assert!(news.fetch_articles().await.is_err());
        assert_eq!(news.fetch_articles().await.unwrap().len(), 1);
        assert_eq!(news.fetch_articles().await.unwrap().len(), 1);
        assert_eq!(*calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_prices_from_known_and_unknown() {
        let p = prices_from(&[("AAPL", 190.0)]);
        assert_eq!(p.latest_price("AAPL").await.unwrap(), 190.0);
        assert!(matches!(
            p.latest_price("XXXX").await,
            Err(MonitorError::DataAbsent { .. })
        ));
    }
}
