//! Hosted-model client, the single entry point for inference HTTP calls.
//!
//! ARCHITECTURAL RULE: no other module issues inference requests. Question
//! generation, sentiment tagging, and translation all route through
//! [`InferenceClient`], and every remote failure degrades to fallback
//! content instead of surfacing an error to the caller.

pub mod cache;
pub mod questions;
pub mod sentiment;
pub mod translate;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use cache::PromptCache;

/// Hosted inference endpoint. Model ids are appended as path segments.
const INFERENCE_API_BASE: &str = "https://api-inference.huggingface.co/models";

/// Text-generation model for question drafting.
pub const GENERATION_MODEL: &str = "gpt2";

/// Binary sentiment classifier applied to candidate answers.
pub const SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// English-to-Hindi translation model.
pub const HINDI_TRANSLATION_MODEL: &str = "Helsinki-NLP/opus-mt-en-hi";

/// Hosted models cold-start, so this is deliberately generous.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Successful generations memoized per prompt, FIFO-evicted past this.
const PROMPT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("no inference credential configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct SentimentScore {
    label: String,
    #[allow(dead_code)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct TranslationText {
    translation_text: String,
}

/// Client for the hosted inference API.
///
/// Cheap to clone; the HTTP connection pool and the prompt cache are shared
/// across clones.
#[derive(Clone)]
pub struct InferenceClient {
    http: Client,
    api_token: Option<String>,
    prompt_cache: Arc<PromptCache>,
}

impl InferenceClient {
    pub fn new(api_token: Option<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_token,
            prompt_cache: Arc::new(PromptCache::new(PROMPT_CACHE_CAPACITY)),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_token.is_some()
    }

    /// One POST to a hosted model, single attempt, no retries. Callers pick
    /// their own fallback on error.
    async fn call_model(
        &self,
        model: &str,
        inputs: &str,
    ) -> Result<serde_json::Value, InferenceError> {
        let token = self
            .api_token
            .as_deref()
            .ok_or(InferenceError::MissingCredential)?;
        let url = format!("{INFERENCE_API_BASE}/{model}");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&InferenceRequest { inputs })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Free-text generation with the prompt memo.
    ///
    /// `None` covers every failure mode: missing credential, transport or
    /// API errors, and unusable response shapes. Only real generations are
    /// cached, so a failed prompt is retried on the next request.
    pub async fn generate_text(&self, prompt: &str) -> Option<String> {
        if self.api_token.is_none() {
            warn!("no inference credential configured; using fallback content");
            return None;
        }

        if let Some(hit) = self.prompt_cache.get(prompt) {
            debug!("prompt cache hit ({} chars)", hit.len());
            return Some(hit);
        }

        match self.call_model(GENERATION_MODEL, prompt).await {
            Ok(body) => match parse_generated_text(&body) {
                Some(text) => {
                    self.prompt_cache.insert(prompt, &text);
                    Some(text)
                }
                None => {
                    warn!("generation response had no usable text");
                    None
                }
            },
            Err(err) => {
                warn!("generation call failed: {err}");
                None
            }
        }
    }
}

/// Generation responses arrive as `[{"generated_text": "..."}]`.
fn parse_generated_text(body: &serde_json::Value) -> Option<String> {
    let list: Vec<GeneratedText> = serde_json::from_value(body.clone()).ok()?;
    let text = list.into_iter().next()?.generated_text.trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Sentiment responses nest one list per input: `[[{"label", "score"}, ..]]`.
/// The first entry carries the top-scoring label.
fn parse_sentiment_label(body: &serde_json::Value) -> Option<String> {
    let nested: Vec<Vec<SentimentScore>> = serde_json::from_value(body.clone()).ok()?;
    nested
        .into_iter()
        .next()?
        .into_iter()
        .next()
        .map(|s| s.label)
}

/// Translation responses arrive as `[{"translation_text": "..."}]`.
fn parse_translation_text(body: &serde_json::Value) -> Option<String> {
    let list: Vec<TranslationText> = serde_json::from_value(body.clone()).ok()?;
    list.into_iter().next().map(|t| t.translation_text)
}
