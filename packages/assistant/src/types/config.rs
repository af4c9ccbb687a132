//! Configuration types for the pipeline and inference backends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AssistantError;
use crate::security::credentials::SecretString;

/// Configuration for the aggregation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum number of sources extracted at the same time.
    ///
    /// Results are always reassembled in input order, so this only
    /// affects throughput. Default: 4.
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

impl PipelineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set concurrency (clamped to at least 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Which hosted inference service a backend talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendProvider {
    /// Hugging Face inference API (summarization + extractive QA models)
    HuggingFace,

    /// OpenAI-compatible chat completions
    OpenAI,
}

impl BackendProvider {
    /// Default API base URL for the provider.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::HuggingFace => "https://api-inference.huggingface.co/models",
            Self::OpenAI => "https://api.openai.com/v1",
        }
    }

    /// Default model used for summarization.
    pub fn default_summarize_model(&self) -> &'static str {
        match self {
            Self::HuggingFace => "google/flan-t5-large",
            Self::OpenAI => "gpt-4o-mini",
        }
    }

    /// Default model used for question answering.
    pub fn default_answer_model(&self) -> &'static str {
        match self {
            Self::HuggingFace => "deepset/roberta-base-squad2",
            Self::OpenAI => "gpt-4o",
        }
    }

    /// Default input bound, in characters.
    pub fn default_max_input_chars(&self) -> usize {
        match self {
            Self::HuggingFace => 4_000,
            Self::OpenAI => 12_000,
        }
    }
}

impl fmt::Display for BackendProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HuggingFace => f.write_str("huggingface"),
            Self::OpenAI => f.write_str("openai"),
        }
    }
}

impl FromStr for BackendProvider {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "openai" | "chat" => Ok(Self::OpenAI),
            other => Err(AssistantError::config(format!(
                "unknown backend provider: {other}"
            ))),
        }
    }
}

/// Configuration for an inference backend.
///
/// Endpoint, credential and a model id per capability; everything else
/// has provider defaults.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub provider: BackendProvider,

    /// API base URL
    pub endpoint: String,

    /// Bearer token for the provider
    pub api_key: SecretString,

    /// Model used by `summarize`
    pub summarize_model: String,

    /// Model used by `answer`
    pub answer_model: String,

    /// Longest input sent in a single call, in characters
    pub max_input_chars: usize,

    /// Per-request timeout
    pub timeout: Duration,
}

impl BackendConfig {
    /// Create a config with provider defaults.
    pub fn new(provider: BackendProvider, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            endpoint: provider.default_endpoint().to_string(),
            api_key: SecretString::new(api_key),
            summarize_model: provider.default_summarize_model().to_string(),
            answer_model: provider.default_answer_model().to_string(),
            max_input_chars: provider.default_max_input_chars(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Set a custom endpoint (proxies, self-hosted gateways).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
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

    /// Set the input bound (clamped to at least 1).
    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max.max(1);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
