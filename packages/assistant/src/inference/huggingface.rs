//! Hugging Face inference API backend.
//!
//! Uses a summarization model for `summarize` and an extractive
//! question-answering model for `answer`, both hosted behind the
//! inference API.
//!
//! # Example
//!
//! ```rust,ignore
//! use travel_assistant::inference::HuggingFaceBackend;
//!
//! let backend = HuggingFaceBackend::new("hf_...")
//!     .with_summarize_model("facebook/bart-large-cnn");
//! let summary = backend.summarize(&text).await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::{AssistantError, Result};
use crate::inference::bounded::{summarize_bounded, truncate_chars};
use crate::security::credentials::SecretString;
use crate::traits::inference::InferenceBackend;
use crate::types::config::{BackendConfig, BackendProvider};

/// Upper bound on generated summary length, in tokens.
const SUMMARY_MAX_LENGTH: u32 = 512;

/// Lower bound on generated summary length, in tokens.
const SUMMARY_MIN_LENGTH: u32 = 50;

/// Hugging Face-hosted summarization + QA backend.
#[derive(Clone)]
pub struct HuggingFaceBackend {
    client: Client,
    api_key: SecretString,
    base_url: String,
    summarize_model: String,
    answer_model: String,
    max_input_chars: usize,
}

impl HuggingFaceBackend {
    /// Create a backend with the default models and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(&BackendConfig::new(BackendProvider::HuggingFace, api_key))
    }

    /// Create from a backend configuration.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            base_url: config.endpoint.clone(),
            summarize_model: config.summarize_model.clone(),
            answer_model: config.answer_model.clone(),
            max_input_chars: config.max_input_chars,
        }
    }

    /// Set the summarization model.
    pub fn with_summarize_model(mut self, model: impl Into<String>) -> Self {
        self.summarize_model = model.into();
        self
    }

    /// Set the question-answering model.
    pub fn with_answer_model(mut self, model: impl Into<String>) -> Self {
        self.answer_model = model.into();
        self
    }

    /// Set a custom base URL (for dedicated endpoints or proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the input bound, in characters.
    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max.max(1);
        self
    }

    // =========================================================================
    // Internal methods
    // =========================================================================

    /// POST a payload to a model and return the raw JSON response.
    async fn invoke<T: Serialize + ?Sized>(&self, model: &str, payload: &T) -> Result<serde_json::Value> {
        let mut request = self
            .client
            .post(format!("{}/{}", self.base_url, model))
            .header("Content-Type", "application/json")
            .json(payload);
        if !self.api_key.is_empty() {
            request = request.header("Authorization", self.api_key.bearer());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AssistantError::inference(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistantError::inference(format!(
                "Hugging Face API error ({status}): {error_text}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AssistantError::inference(format!("unreadable response: {e}")))
    }

    /// Summarize one chunk that already fits the input bound.
    async fn summarize_chunk(&self, chunk: String) -> Result<String> {
        let payload = json!({
            "inputs": chunk,
            "parameters": {
                "max_length": SUMMARY_MAX_LENGTH,
                "min_length": SUMMARY_MIN_LENGTH,
                "truncation": "only_first",
            },
            "options": { "wait_for_model": true },
        });

        let response = self.invoke(&self.summarize_model, &payload).await?;
        parse_summary(response)
    }
}

#[async_trait]
impl InferenceBackend for HuggingFaceBackend {
    async fn summarize(&self, text: &str) -> Result<String> {
        debug!(model = %self.summarize_model, chars = text.len(), "Summarizing");
        summarize_bounded(text, self.max_input_chars, |chunk| self.summarize_chunk(chunk)).await
    }

    async fn answer(&self, text: &str, question: &str) -> Result<String> {
        let context = truncate_chars(text, self.max_input_chars);
        debug!(model = %self.answer_model, chars = context.len(), "Answering question");

        let payload = json!({
            "inputs": { "question": question, "context": context },
            "options": { "wait_for_model": true },
        });

        let response = self.invoke(&self.answer_model, &payload).await?;
        parse_answer(response)
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    #[serde(alias = "generated_text")]
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct QaAnswer {
    #[serde(alias = "generated_text")]
    answer: String,
}

/// Accepts `[{"summary_text": ..}]`, `{"summary_text": ..}` or the
/// `generated_text` equivalents returned by text2text models.
fn parse_summary(value: serde_json::Value) -> Result<String> {
    let item = match value {
        serde_json::Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    }
    .ok_or_else(|| AssistantError::inference("empty summary response"))?;

    let parsed: GeneratedText = serde_json::from_value(item)
        .map_err(|e| AssistantError::inference(format!("malformed summary response: {e}")))?;

    non_empty(parsed.summary_text, "summary")
}

/// Accepts `{"answer": ..}` or a ranked list of such objects, and the
/// `generated_text` shape returned when a text2text model is configured.
fn parse_answer(value: serde_json::Value) -> Result<String> {
    let item = match value {
        serde_json::Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    }
    .ok_or_else(|| AssistantError::inference("empty answer response"))?;

    let parsed: QaAnswer = serde_json::from_value(item)
        .map_err(|e| AssistantError::inference(format!("malformed answer response: {e}")))?;

    non_empty(parsed.answer, "answer")
}

fn non_empty(text: String, what: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(AssistantError::inference(format!("backend returned an empty {what}")))
    } else {
        Ok(trimmed.to_string())
    }
}
