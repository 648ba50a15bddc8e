//! News sources.
//!
//! Defines the `NewsFetcher` trait. The pipeline only ever sees a list
//! of articles, so the scraping strategy can change without touching
//! anything downstream.

pub mod html;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::types::{Article, MonitorError};

/// Abstraction over a news source.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NewsFetcher: Send + Sync {
    /// Fetch the current set of articles.
    ///
    /// Articles that cannot be retrieved individually are skipped. An
    /// error means the source itself was unreachable or unusable.
    async fn fetch_articles(&self) -> Result<Vec<Article>, MonitorError>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}
