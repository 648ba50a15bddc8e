//! End-to-end passes through the public API.
//!
//! Wires `PredictionPipeline` and `Poller` to scripted news, mocked
//! prices and a mocked polarity model, then checks the reports and
//! loop counters.

use mockall::Sequence;
use std::sync::Arc;
use std::time::Duration;

use market_pulse::config::AppConfig;
use market_pulse::engine::pipeline::{PredictionPipeline, Thresholds};
use market_pulse::engine::poller::{PollStats, Poller};
use market_pulse::sentiment::{LexiconSource, SentimentScorer};
use market_pulse::types::{Article, PredictionLabel};

use crate::mock_sources::{prices_from, MockPolarity, NewsOutcome, ScriptedNews};

const STOCKS: &[(&str, f64)] = &[("AAPL", 190.25), ("GOOG", 141.8)];
const CRYPTO: &[(&str, f64)] = &[("BTC/USDT", 64012.34), ("ETH/USDT", 3120.5)];

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn three_articles() -> Vec<Article> {
    vec![
        Article::new("Bitcoin ETF inflows", "Funds added exposure."),
        Article::new("Exchange outage", "Withdrawals paused."),
        Article::new("Ether upgrade ships", "Developers confirmed the release."),
    ]
}

fn polarity_sequence(scores: &'static [f64]) -> SentimentScorer {
    let mut model = MockPolarity::new();
    let mut seq = Sequence::new();
    for &p in scores {
        model
            .expect_polarity()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| p);
    }
    SentimentScorer::with_model(Arc::new(model))
}

#[tokio::test]
async fn test_pass_with_known_scores_predicts_up() {
    let pipeline = PredictionPipeline::new(
        Box::new(ScriptedNews::new(vec![NewsOutcome::Articles(three_articles())])),
        polarity_sequence(&[0.5, -0.2, 0.3]),
        Box::new(prices_from(STOCKS)),
        Box::new(prices_from(CRYPTO)),
        Thresholds::default(),
    );

    let report = pipeline
        .run_once(&symbols(&["AAPL", "GOOG"]), &symbols(&["BTC/USDT", "ETH/USDT"]))
        .await
        .unwrap();

    assert!((report.sentiment - 0.2).abs() < 1e-12);
    assert_eq!(report.label, PredictionLabel::Up);
    assert_eq!(report.stock_prices.get("GOOG"), Some(141.8));
    assert_eq!(report.crypto_prices.get("ETH/USDT"), Some(3120.5));

    let printed = report.to_string();
    assert!(printed.contains("Current stock price for AAPL: 190.25 USD"));
    assert!(printed.contains("Current cryptocurrency price for BTC/USDT: 64012.34 USD"));
    assert!(printed.contains("Prediction: Expecting markets to go up."));
}

#[tokio::test]
async fn test_symbol_without_bars_is_omitted() {
    let pipeline = PredictionPipeline::new(
        Box::new(ScriptedNews::new(vec![NewsOutcome::Articles(vec![])])),
        SentimentScorer::new(LexiconSource::Builtin),
        Box::new(prices_from(STOCKS)),
        Box::new(prices_from(CRYPTO)),
        Thresholds::default(),
    );

    let requested = symbols(&["XXXX", "AAPL"]);
    let report = pipeline.run_once(&requested, &[]).await.unwrap();

    assert!(report.stock_prices.contains("AAPL"));
    assert!(!report.stock_prices.contains("XXXX"));
    assert!(report
        .stock_prices
        .symbols()
        .all(|s| requested.iter().any(|r| r == s)));
    assert_eq!(report.sentiment, 0.0);
    assert_eq!(report.label, PredictionLabel::Neutral);
}

#[tokio::test]
async fn test_loop_recovers_after_unreachable_news() {
    let news = ScriptedNews::new(vec![
        NewsOutcome::Unreachable,
        NewsOutcome::Articles(vec![Article::new(
            "Crypto crash deepens",
            "Panic and fear spread as losses mount after exchange fraud",
        )]),
    ]);
    let calls = news.call_counter();

    let pipeline = PredictionPipeline::new(
        Box::new(news),
        SentimentScorer::new(LexiconSource::Builtin),
        Box::new(prices_from(STOCKS)),
        Box::new(prices_from(CRYPTO)),
        Thresholds::default(),
    );
    let poller = Poller::new(
        pipeline,
        symbols(&["AAPL"]),
        symbols(&["BTC/USDT"]),
        Duration::from_millis(1),
    )
    .with_max_passes(Some(3));

    let mut labels = Vec::new();
    let stats = poller
        .run(std::future::pending(), |r| {
            if let Ok(report) = r {
                labels.push(report.label);
            }
        })
        .await;

    assert_eq!(
        stats,
        PollStats {
            passes: 3,
            succeeded: 2,
            failed: 1,
        }
    );
    assert_eq!(*calls.lock().unwrap(), 3);
    assert_eq!(labels, vec![PredictionLabel::Down, PredictionLabel::Down]);
}

#[tokio::test]
async fn test_missing_lexicon_fails_pass_but_not_loop() {
    let pipeline = PredictionPipeline::new(
        Box::new(ScriptedNews::new(vec![NewsOutcome::Articles(three_articles())])),
        SentimentScorer::new(LexiconSource::File("does/not/exist.txt".into())),
        Box::new(prices_from(STOCKS)),
        Box::new(prices_from(CRYPTO)),
        Thresholds::default(),
    );
    let poller = Poller::new(pipeline, vec![], vec![], Duration::from_millis(1))
        .with_max_passes(Some(2));

    let stats = poller.run(std::future::pending(), |_| {}).await;
    assert_eq!(stats.passes, 2);
    assert_eq!(stats.failed, 2);
}

#[tokio::test]
async fn test_configured_thresholds_flow_through() {
    let cfg = AppConfig::from_toml(
        r#"
        [prediction]
        up_threshold = 0.5
        down_threshold = -0.5
        "#,
    )
    .unwrap();

    let pipeline = PredictionPipeline::new(
        Box::new(ScriptedNews::new(vec![NewsOutcome::Articles(three_articles())])),
        polarity_sequence(&[0.4, 0.4, 0.4]),
        Box::new(prices_from(STOCKS)),
        Box::new(prices_from(CRYPTO)),
        Thresholds::from(&cfg.prediction),
    );

    let report = pipeline.run_once(&[], &[]).await.unwrap();
    assert_eq!(report.label, PredictionLabel::Neutral);
}
