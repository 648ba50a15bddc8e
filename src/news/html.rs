//! HTML news scraper.
//!
//! Fetches a landing page, picks headline elements by CSS selector,
//! follows each headline's link and concatenates the article's content
//! blocks into a body. Defaults target CNN's cryptocurrency section:
//!
//! Landing: `https://edition.cnn.com/business/cryptocurrency`
//! Headlines: `h3.cnn-search__result-headline`
//! Content: `div.l-container`
//!
//! One GET for the landing page plus one per article. No caching, no
//! retry.

use async_trait::async_trait;
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::NewsFetcher;
use crate::config::NewsConfig;
use crate::types::{Article, MonitorError};

const SOURCE_NAME: &str = "html";

/// A headline pulled from the landing page, before its article is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Headline {
    title: String,
    url: String,
}

pub struct HtmlNewsFetcher {
    http: Client,
    landing_url: String,
    base_url: Url,
    headlines: Selector,
    link: Selector,
    body: Selector,
    max_articles: usize,
}

impl HtmlNewsFetcher {
    pub fn new(cfg: &NewsConfig) -> Result<Self, MonitorError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(cfg.user_agent.as_str())
            .build()
            .map_err(|e| MonitorError::Config(format!("failed to build news HTTP client: {e}")))?;

        let base_url = Url::parse(&cfg.base_url)
            .map_err(|e| MonitorError::Config(format!("invalid news.base_url {:?}: {e}", cfg.base_url)))?;

        Ok(Self {
            http,
            landing_url: cfg.landing_url.clone(),
            base_url,
            headlines: parse_selector(&cfg.headline_selector)?,
            link: parse_selector("a")?,
            body: parse_selector(&cfg.body_selector)?,
            max_articles: cfg.max_articles,
        })
    }

    /// GET a page and return its body as text.
    async fn get_page(&self, url: &str) -> Result<String, MonitorError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| MonitorError::transport(url, e))?;

        if !resp.status().is_success() {
            return Err(MonitorError::transport(url, format!("HTTP {}", resp.status())));
        }

        resp.text().await.map_err(|e| MonitorError::transport(url, e))
    }

    /// Extract up to `max_articles` headlines from the landing page.
    ///
    /// Each entry is either a headline or the parse error for the
    /// element that had no usable link.
    fn parse_headlines(&self, page: &str) -> Vec<Result<Headline, MonitorError>> {
        let doc = Html::parse_document(page);
        doc.select(&self.headlines)
            .take(self.max_articles)
            .map(|el| self.headline_from(el))
            .collect()
    }

    fn headline_from(&self, el: ElementRef<'_>) -> Result<Headline, MonitorError> {
        let title = collapse_whitespace(el.text());

        let anchor = el
            .select(&self.link)
            .next()
            .ok_or_else(|| MonitorError::parse(&title, "headline has no link"))?;
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| MonitorError::parse(&title, "headline link has no href"))?;
        let url = self
            .base_url
            .join(href.trim())
            .map_err(|e| MonitorError::parse(&title, format!("bad link {href:?}: {e}")))?;

        Ok(Headline {
            title,
            url: url.to_string(),
        })
    }

    /// Concatenate every content block of an article page in document order.
    fn parse_body(&self, page: &str) -> String {
        let doc = Html::parse_document(page);
        doc.select(&self.body)
            .map(|el| collapse_whitespace(el.text()))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl NewsFetcher for HtmlNewsFetcher {
    async fn fetch_articles(&self) -> Result<Vec<Article>, MonitorError> {
        let landing = self.get_page(&self.landing_url).await?;
        let headlines = self.parse_headlines(&landing);
        debug!(url = %self.landing_url, count = headlines.len(), "Headlines found");

        let mut articles = Vec::with_capacity(headlines.len());
        for headline in headlines {
            let headline = match headline {
                Ok(h) => h,
                Err(e) => {
                    warn!(error = %e, "Skipping headline");
                    continue;
                }
            };

            match self.get_page(&headline.url).await {
                Ok(page) => {
                    let body = self.parse_body(&page);
                    articles.push(Article {
                        title: headline.title,
                        body,
                        url: headline.url,
                    });
                }
                Err(e) => {
                    warn!(url = %headline.url, error = %e, "Article fetch failed, skipping");
                }
            }
        }

        info!(url = %self.landing_url, articles = articles.len(), "News fetched");
        Ok(articles)
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }
}

fn parse_selector(css: &str) -> Result<Selector, MonitorError> {
    Selector::parse(css)
        .map_err(|e| MonitorError::Config(format!("invalid CSS selector {css:?}: {e}")))
}

/// Join text nodes and squeeze runs of whitespace to single spaces.
fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
