//! Analysis client: the two remote operations and their failure policy.
//!
//! Trending discovery is non-critical — every failure is absorbed into a
//! static fallback list. Sentiment analysis is critical — failures
//! propagate to the caller untouched.

use std::sync::Arc;

use chrono::Local;

use crate::core::model::{SentimentRecord, TrendingTopic};
use crate::core::parse::{parse_sentiment, parse_trending};
use crate::core::provider::{GroundedProvider, ProviderError, Result};

const TRENDING_PROMPT: &str = "What are the top 6 trending specific topics or news headlines \
right now globally? Return a simple list. Format each line as: Category: Topic Name.";

/// Clone-able handle around the provider; spawned tasks take cheap copies.
#[derive(Clone)]
pub struct AnalysisClient {
    provider: Arc<dyn GroundedProvider>,
}

impl AnalysisClient {
    pub fn new(provider: Arc<dyn GroundedProvider>) -> Self {
        Self { provider }
    }

    /// The static list substituted whenever trending discovery fails.
    pub fn fallback_trending() -> Vec<TrendingTopic> {
        vec![
            TrendingTopic {
                id: "trend-0".to_string(),
                category: "Tech".to_string(),
                name: "Artificial Intelligence".to_string(),
            },
            TrendingTopic {
                id: "trend-1".to_string(),
                category: "Space".to_string(),
                name: "SpaceX Starship".to_string(),
            },
            TrendingTopic {
                id: "trend-2".to_string(),
                category: "Climate".to_string(),
                name: "Global Renewable Energy".to_string(),
            },
        ]
    }

    /// Fetch up to six current trending topics.
    ///
    /// Never fails: a missing credential, a transport/API failure, or a
    /// reply with no usable lines all yield the fallback list.
    pub async fn fetch_trending(&self) -> Vec<TrendingTopic> {
        match self.provider.generate_grounded(TRENDING_PROMPT).await {
            Ok(reply) => {
                let topics = parse_trending(&reply.text);
                if topics.is_empty() {
                    log::warn!("trending reply had no usable lines; using fallback list");
                    Self::fallback_trending()
                } else {
                    log::info!("loaded {} trending topics", topics.len());
                    topics
                }
            }
            Err(e) => {
                log::warn!("trending fetch failed ({e}); using fallback list");
                Self::fallback_trending()
            }
        }
    }

    /// Analyze current sentiment for a non-empty topic. Stamps the record
    /// with the local completion time. Failures propagate.
    pub async fn analyze_sentiment(&self, topic: &str) -> Result<SentimentRecord> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ProviderError::InvalidRequest("empty topic".to_string()));
        }

        log::info!("analyzing sentiment for {topic:?} via {}", self.provider.id());
        let prompt = sentiment_prompt(topic);
        let reply = self.provider.generate_grounded(&prompt).await?;

        let analyzed_at = Local::now().format("%H:%M:%S").to_string();
        let record = parse_sentiment(topic, &reply.text, &reply.citations, analyzed_at);

        if !record.anomalies.is_empty() {
            log::warn!(
                "sentiment reply for {topic:?} parsed with anomalies: {:?}",
                record.anomalies
            );
        }

        Ok(record)
    }
}

fn sentiment_prompt(topic: &str) -> String {
    format!(
        "Perform a sentiment analysis on the topic: \"{topic}\".\n\
         Use Google Search to find the latest news, opinions, and discussions.\n\
         \n\
         Strictly follow this output format (do not use markdown for keys):\n\
         CLASSIFICATION: <Positive, Negative, or Neutral>\n\
         SCORE: <A number between -100 (very negative) and 100 (very positive)>\n\
         SUMMARY: <A concise summary of the general sentiment, max 3 sentences>\n\
         KEY_POINTS:\n\
         - <Point 1>\n\
         - <Point 2>\n\
         - <Point 3>"
    )
}
