//! OpenAI-compatible chat-completion backend.
//!
//! Works against OpenAI and any gateway that speaks the
//! `/chat/completions` protocol (Azure, vLLM, Ollama, OpenRouter).
//!
//! # Example
//!
//! ```rust,ignore
//! use travel_assistant::inference::ChatBackend;
//!
//! let backend = ChatBackend::new("sk-...").with_answer_model("gpt-4o");
//! let answer = backend.answer(&text, "What museum is mentioned?").await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AssistantError, Result};
use crate::inference::bounded::{summarize_bounded, truncate_chars};
use crate::security::credentials::SecretString;
use crate::traits::inference::InferenceBackend;
use crate::types::config::{BackendConfig, BackendProvider};

const SUMMARIZE_PROMPT: &str = r#"You are a travel research assistant. Summarize the key points of the provided travel material.

- Keep destinations, landmarks, dates, prices and practical tips.
- Drop repetition, filler and sponsor messages.
- Be factual. Only include what the material states.
- Answer in plain prose, a few short paragraphs at most."#;

const ANSWER_PROMPT: &str = r#"You are a travel advisor. Answer the user's question using ONLY the provided material.

If the material does not contain the answer, say so briefly instead of guessing."#;

/// Chat-completion backend with a model per capability.
#[derive(Clone)]
pub struct ChatBackend {
    client: Client,
    api_key: SecretString,
    base_url: String,
    summarize_model: String,
    answer_model: String,
    max_input_chars: usize,
}

impl ChatBackend {
    /// Create a backend with the default models and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(&BackendConfig::new(BackendProvider::OpenAI, api_key))
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

    /// Set a custom base URL (for Azure, proxies, etc.).
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

    /// Make a chat completion request with a specific model.
    async fn chat_with_model(&self, system: &str, user: &str, model: &str) -> Result<String> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: Some(0.0),
            max_tokens: Some(1024),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", self.api_key.bearer())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::inference(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistantError::inference(format!(
                "chat API error ({status}): {error_text}"
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::inference(format!("malformed chat response: {e}")))?;

        first_content(chat_response)
    }

    async fn summarize_chunk(&self, chunk: String) -> Result<String> {
        self.chat_with_model(SUMMARIZE_PROMPT, &chunk, &self.summarize_model)
            .await
    }
}

#[async_trait]
impl InferenceBackend for ChatBackend {
    async fn summarize(&self, text: &str) -> Result<String> {
        debug!(model = %self.summarize_model, chars = text.len(), "Summarizing");
        summarize_bounded(text, self.max_input_chars, |chunk| self.summarize_chunk(chunk)).await
    }

    async fn answer(&self, text: &str, question: &str) -> Result<String> {
        let context = truncate_chars(text, self.max_input_chars);
        debug!(model = %self.answer_model, chars = context.len(), "Answering question");

        let user = format!("Material:\n{}\n\nQuestion: {}", context, question);
        self.chat_with_model(ANSWER_PROMPT, &user, &self.answer_model)
            .await
    }

    fn name(&self) -> &str {
        "openai"
    }
}

fn first_content(response: ChatResponse) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| AssistantError::inference("no response from chat backend"))?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AssistantError::inference("chat backend returned empty content"));
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
