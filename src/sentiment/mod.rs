//! News sentiment scoring.
//!
//! `SentimentScorer` averages the compound polarity of each article's
//! title and body. The polarity model is built lazily from a lexicon on
//! first use; a failed build is reported to the caller and retried on
//! the next call.

pub mod lexicon;
pub mod vader;

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

#[cfg(test)]
use mockall::automock;

use crate::types::{Article, MonitorError};
use lexicon::Lexicon;
use vader::VaderModel;

/// A model that maps text to a compound polarity score in [-1, 1].
#[cfg_attr(test, automock)]
pub trait PolarityModel: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Where the lexicon comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconSource {
    Builtin,
    /// VADER-format text file (`token<TAB>mean<TAB>...`).
    File(String),
}

impl From<Option<String>> for LexiconSource {
    fn from(path: Option<String>) -> Self {
        match path {
            Some(p) => LexiconSource::File(p),
            None => LexiconSource::Builtin,
        }
    }
}

pub struct SentimentScorer {
    source: LexiconSource,
    model: OnceCell<Arc<dyn PolarityModel>>,
}

impl SentimentScorer {
    /// Scorer that builds a `VaderModel` from `source` on first use.
    pub fn new(source: LexiconSource) -> Self {
        Self {
            source,
            model: OnceCell::new(),
        }
    }

    /// Scorer with a ready-made model; no lexicon is loaded.
    pub fn with_model(model: Arc<dyn PolarityModel>) -> Self {
        Self {
            source: LexiconSource::Builtin,
            model: OnceCell::from(model),
        }
    }

    /// Whether the model has been initialised.
    pub fn is_ready(&self) -> bool {
        self.model.initialized()
    }

    async fn model(&self) -> Result<&Arc<dyn PolarityModel>, MonitorError> {
        self.model
            .get_or_try_init(|| async {
                let lexicon = match &self.source {
                    LexiconSource::Builtin => Lexicon::builtin(),
                    LexiconSource::File(path) => Lexicon::load(path).await?,
                };
                info!(source = ?self.source, entries = lexicon.len(), "Sentiment lexicon loaded");
                Ok::<Arc<dyn PolarityModel>, MonitorError>(Arc::new(VaderModel::new(lexicon)))
            })
            .await
    }

    /// Mean compound polarity over `articles`; exactly 0.0 when empty.
    pub async fn score(&self, articles: &[Article]) -> Result<f64, MonitorError> {
        let model = self.model().await?;
        Ok(mean_polarity(model.as_ref(), articles))
    }
}

/// Average of per-article polarity, clamped to [-1, 1]. Articles whose
/// polarity is not finite are scored 0.0.
pub fn mean_polarity(model: &dyn PolarityModel, articles: &[Article]) -> f64 {
    if articles.is_empty() {
        return 0.0;
    }

    let total: f64 = articles
        .iter()
        .map(|a| {
            let p = model.polarity(&a.text());
            debug!(title = %a.title, polarity = p, "Article scored");
            if p.is_finite() {
                p
            } else {
                warn!(title = %a.title, polarity = p, "Non-finite polarity, scoring 0.0");
                0.0
            }
        })
        .sum();

    (total / articles.len() as f64).clamp(-1.0, 1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article::new(format!("Headline {i}"), format!("Body {i}")))
            .collect()
    }

    #[test]
    fn test_mean_of_mocked_scores() {
        let mut model = MockPolarityModel::new();
        let mut seq = Sequence::new();
        for p in [0.5, -0.2, 0.3] {
            model
                .expect_polarity()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| p);
        }
        let score = mean_polarity(&model, &articles(3));
        assert!((score - 0.2).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn test_empty_is_exactly_zero() {
        let mut model = MockPolarityModel::new();
        model.expect_polarity().never();
        assert_eq!(mean_polarity(&model, &[]), 0.0);
    }

    #[test]
    fn test_scores_title_and_body_together() {
        let mut model = MockPolarityModel::new();
        model
            .expect_polarity()
            .withf(|text| text == "Bitcoin soars Investors cheer")
            .times(1)
            .returning(|_| 0.9);
        let a = vec![Article::new("Bitcoin soars", "Investors cheer")];
        assert_eq!(mean_polarity(&model, &a), 0.9);
    }

    #[test]
    fn test_out_of_range_model_is_clamped() {
        let mut model = MockPolarityModel::new();
        model.expect_polarity().returning(|_| 3.0);
        assert_eq!(mean_polarity(&model, &articles(2)), 1.0);
    }

    #[test]
    fn test_non_finite_polarity_stays_in_range() {
        let mut model = MockPolarityModel::new();
        let mut seq = Sequence::new();
        for p in [f64::NAN, 0.6] {
            model
                .expect_polarity()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| p);
        }
        let score = mean_polarity(&model, &articles(2));
        assert!((score - 0.3).abs() < 1e-12, "got {score}");
    }

    #[tokio::test]
    async fn test_lexicon_file_with_infinite_valence_is_rejected() {
        let path = std::env::temp_dir().join(format!("pulse_lexicon_inf_{}.txt", std::process::id()));
        tokio::fs::write(&path, "moon\tinf\t0.5\nrekt\tNaN\t0.5\n")
            .await
            .unwrap();

        let scorer = SentimentScorer::new(LexiconSource::File(path.to_string_lossy().into_owned()));
        let result = scorer
            .score(&[Article::new("Bitcoin to the moon", "")])
            .await;
        let _ = tokio::fs::remove_file(&path).await;

        assert!(matches!(result, Err(MonitorError::Init(_))), "got {result:?}");
        assert!(!scorer.is_ready());
    }

    #[tokio::test]
    async fn test_builtin_scorer_initialises_lazily() {
        let scorer = SentimentScorer::new(LexiconSource::Builtin);
        assert!(!scorer.is_ready());
        let a = vec![Article::new("Great gains", "Investors are happy and optimistic")];
        let s = scorer.score(&a).await.unwrap();
        assert!(scorer.is_ready());
        assert!(s > 0.0 && s <= 1.0, "got {s}");
    }

    #[tokio::test]
    async fn test_builtin_scorer_negative_news() {
        let scorer = SentimentScorer::new(LexiconSource::Builtin);
        let a = vec![Article::new(
            "Crypto crash deepens",
            "Panic and fear as losses mount after exchange fraud",
        )];
        let s = scorer.score(&a).await.unwrap();
        assert!(s < -0.1, "got {s}");
    }

    #[tokio::test]
    async fn test_missing_lexicon_is_init_error_and_retried() {
        let scorer = SentimentScorer::new(LexiconSource::File("no/such/lexicon.txt".into()));
        let err = scorer.score(&articles(1)).await.unwrap_err();
        assert!(matches!(err, MonitorError::Init(_)));
        assert!(!scorer.is_ready());
        // Empty input still needs a scorer, so it fails the same way
        assert!(scorer.score(&[]).await.is_err());
    }

    #[tokio::test]
    async fn test_with_model_skips_lexicon() {
        let mut model = MockPolarityModel::new();
        model.expect_polarity().returning(|_| -0.4);
        let scorer = SentimentScorer::with_model(Arc::new(model));
        assert!(scorer.is_ready());
        assert_eq!(scorer.score(&articles(2)).await.unwrap(), -0.4);
    }

    #[test]
    fn test_lexicon_source_from_option() {
        assert_eq!(LexiconSource::from(None), LexiconSource::Builtin);
        assert_eq!(
            LexiconSource::from(Some("lex.txt".to_string())),
            LexiconSource::File("lex.txt".into())
        );
    }
}
