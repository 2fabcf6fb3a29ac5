//! Sentiment tagging for free-text answers.

use tracing::warn;

use super::{parse_sentiment_label, InferenceClient, SENTIMENT_MODEL};

/// Label recorded when no real classification happened.
pub const NEUTRAL_SENTIMENT: &str = "Neutral";

impl InferenceClient {
    /// Labels an answer with the classifier's top sentiment class.
    ///
    /// Empty or whitespace-only text never leaves the process. Every failure
    /// mode degrades to `"Neutral"`; saving an answer must not depend on the
    /// classifier being up.
    pub async fn analyze_sentiment(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return NEUTRAL_SENTIMENT.to_string();
        }

        match self.call_model(SENTIMENT_MODEL, text).await {
            Ok(body) => parse_sentiment_label(&body).unwrap_or_else(|| {
                warn!("sentiment response shape unexpected; defaulting to Neutral");
                NEUTRAL_SENTIMENT.to_string()
            }),
            Err(err) => {
                warn!("sentiment call failed: {err}; defaulting to Neutral");
                NEUTRAL_SENTIMENT.to_string()
            }
        }
    }
}
