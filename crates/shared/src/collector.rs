use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::models::Article;

/// Default AI news feeds polled by collect-news.
pub const DEFAULT_FEEDS: &[(&str, &str)] = &[
    (
        "TechCrunch AI",
        "https://techcrunch.com/category/artificial-intelligence/feed/",
    ),
    (
        "VentureBeat AI",
        "https://venturebeat.com/category/ai/feed/",
    ),
    (
        "MIT Technology Review",
        "https://www.technologyreview.com/feed/",
    ),
    ("The Verge", "https://www.theverge.com/rss/index.xml"),
    (
        "Ars Technica",
        "https://feeds.arstechnica.com/arstechnica/index",
    ),
];

// Weighted keyword lists for the relevance filter. Named labs and model
// families are stronger signals than generic AI vocabulary.
const HIGH_VALUE_KEYWORDS: &[&str] = &[
    "openai",
    "anthropic",
    "deepmind",
    "gpt",
    "claude",
    "gemini",
    "large language model",
    "llm",
];
const GENERAL_KEYWORDS: &[&str] = &[
    "artificial intelligence",
    "machine learning",
    "neural network",
    "deep learning",
    "chatbot",
    "generative",
    "model",
];

const HIGH_VALUE_WEIGHT: f64 = 2.0;
const GENERAL_WEIGHT: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;
const RELEVANCE_THRESHOLD: f64 = 2.0;

const FEED_CONCURRENCY: usize = 5;

/// Fetches the default feed list and turns entries into Article records.
pub struct NewsCollector {
    client: Client,
}

impl NewsCollector {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; AiNewsMonitor/1.0)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch all default feeds and return every entry newer than the cutoff.
    /// A failing feed is skipped, never fatal for the run.
    pub async fn collect_feeds(&self, days_back: i64, now: DateTime<Utc>) -> Vec<Article> {
        let since = now - Duration::days(days_back);

        let per_feed: Vec<Vec<Article>> = stream::iter(DEFAULT_FEEDS)
            .map(|(source, feed_url)| self.fetch_feed_or_empty(source, feed_url, since))
            .buffer_unordered(FEED_CONCURRENCY)
            .collect()
            .await;

        per_feed.into_iter().flatten().collect()
    }

    async fn fetch_feed_or_empty(
        &self,
        source: &str,
        feed_url: &str,
        since: DateTime<Utc>,
    ) -> Vec<Article> {
        match self.fetch_feed(source, feed_url, since).await {
            Ok(articles) => {
                debug!("{}: {} entries after cutoff", source, articles.len());
                articles
            }
            Err(e) => {
                warn!("Skipping feed {}: {:#}", source, e);
                Vec::new()
            }
        }
    }

    async fn fetch_feed(
        &self,
        source: &str,
        feed_url: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Article>> {
        let parsed_url = Url::parse(feed_url).context("Invalid feed URL")?;

        let response = self
            .client
            .get(parsed_url)
            .send()
            .await
            .context("Failed to send HTTP request")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        let body = response.bytes().await.context("Failed to read feed body")?;
        let feed = feed_rs::parser::parse(&body[..]).context("Failed to parse feed")?;

        let mut articles = Vec::new();
        for entry in feed.entries {
            let published = match entry.published.or(entry.updated) {
                Some(ts) if ts >= since => ts,
                _ => continue,
            };

            let title = match entry.title {
                Some(text) if !text.content.trim().is_empty() => {
                    text.content.trim().to_string()
                }
                _ => continue,
            };

            let link = match entry.links.first() {
                Some(link) if !link.href.is_empty() => link.href.clone(),
                _ => continue,
            };

            let summary = entry
                .summary
                .map(|text| flatten_html(&text.content))
                .unwrap_or_default();

            articles.push(Article {
                title,
                summary,
                source: source.to_string(),
                link,
                published: published.to_rfc3339(),
                relevance_score: None,
                priority_level: String::new(),
            });
        }

        Ok(articles)
    }

    /// Score each article against the AI keyword lists, keep the ones above
    /// the threshold, and stamp relevance and priority onto the survivors.
    pub fn filter_relevant(&self, articles: Vec<Article>) -> Vec<Article> {
        let mut relevant: Vec<Article> = articles
            .into_iter()
            .filter_map(|mut article| {
                let score = relevance_score(&article);
                if score < RELEVANCE_THRESHOLD {
                    return None;
                }
                article.relevance_score = Some(score);
                article.priority_level = priority_for_score(score).to_string();
                Some(article)
            })
            .collect();

        // Highest-scoring stories lead the dump
        relevant.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        relevant
    }
}

fn relevance_score(article: &Article) -> f64 {
    let text = article.classification_text();
    let mut score = 0.0;

    for keyword in HIGH_VALUE_KEYWORDS {
        if text.contains(keyword) {
            score += HIGH_VALUE_WEIGHT;
        }
    }
    for keyword in GENERAL_KEYWORDS {
        if text.contains(keyword) {
            score += GENERAL_WEIGHT;
        }
    }

    score.min(MAX_SCORE)
}

fn priority_for_score(score: f64) -> &'static str {
    if score >= 8.0 {
        "Critical"
    } else if score >= 5.0 {
        "High"
    } else if score >= 3.0 {
        "Medium"
    } else {
        "Low"
    }
}

/// Collapse an HTML fragment to a single line of plain text.
fn flatten_html(html: &str) -> String {
    let text = html2text::from_read(html.as_bytes(), 200);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, summary: &str) -> Article {
        Article {
            title: title.to_string(),
            summary: summary.to_string(),
            source: "Test Source".to_string(),
            link: "https://example.com".to_string(),
            published: "2026-08-01T00:00:00Z".to_string(),
            relevance_score: None,
            priority_level: String::new(),
        }
    }

    // ==================== Relevance Scoring Tests ====================

    #[test]
    fn test_score_accumulates_weighted_hits() {
        let a = article(
            "OpenAI ships new model",
            "A large language model for machine learning workloads.",
        );
        // openai (2) + large language model (2) + machine learning (1) + model (1)
        assert_eq!(relevance_score(&a), 6.0);
    }

    #[test]
    fn test_score_caps_at_max() {
        let a = article(
            "OpenAI Anthropic DeepMind GPT Claude Gemini",
            "A large language model, machine learning, neural network, deep learning chatbot.",
        );
        assert_eq!(relevance_score(&a), MAX_SCORE);
    }

    #[test]
    fn test_score_zero_for_unrelated_text() {
        let a = article("Steel prices rise", "Commodity markets this week.");
        assert_eq!(relevance_score(&a), 0.0);
    }

    #[test]
    fn test_priority_thresholds() {
        assert_eq!(priority_for_score(9.0), "Critical");
        assert_eq!(priority_for_score(8.0), "Critical");
        assert_eq!(priority_for_score(6.5), "High");
        assert_eq!(priority_for_score(3.0), "Medium");
        assert_eq!(priority_for_score(2.0), "Low");
    }

    // ==================== Filtering Tests ====================

    #[test]
    fn test_filter_drops_below_threshold_and_stamps_survivors() {
        let collector = NewsCollector::new().unwrap();
        let articles = vec![
            article("Steel prices rise", "Commodity markets."),
            article("Claude update", "An improved chatbot model."),
        ];

        let relevant = collector.filter_relevant(articles);

        assert_eq!(relevant.len(), 1);
        assert_eq!(relevant[0].title, "Claude update");
        assert_eq!(relevant[0].relevance_score, Some(4.0));
        assert_eq!(relevant[0].priority_level, "Medium");
    }

    #[test]
    fn test_filter_sorts_by_score_descending() {
        let collector = NewsCollector::new().unwrap();
        let articles = vec![
            article("A chatbot appears", "Some generative text."),
            article("OpenAI ships GPT update", "A large language model release."),
        ];

        let relevant = collector.filter_relevant(articles);

        assert_eq!(relevant.len(), 2);
        assert_eq!(relevant[0].title, "OpenAI ships GPT update");
    }

    // ==================== HTML Flattening Tests ====================

    #[test]
    fn test_flatten_html_strips_markup_and_newlines() {
        let flattened = flatten_html("<p>First line</p>\n<p>Second line</p>");
        assert_eq!(flattened, "First line Second line");
    }
}
