//! Inference backend implementations.
//!
//! # Available Backends
//!
//! - `HuggingFaceBackend` - summarization and extractive QA models
//! - `ChatBackend` - OpenAI-compatible chat completions
//! - `MockBackend` (in `testing`) - for tests
//!
//! # Example
//!
//! ```rust,ignore
//! use travel_assistant::types::config::{BackendConfig, BackendProvider};
//!
//! let backend = BackendConfig::new(BackendProvider::HuggingFace, token).build()?;
//! let assistant = TravelAssistant::new(extractor, backend);
//! ```

pub mod bounded;
mod huggingface;
mod openai;

use std::sync::Arc;

use tracing::info;

use crate::error::{AssistantError, Result};
use crate::types::config::{BackendConfig, BackendProvider};

pub use huggingface::HuggingFaceBackend;
pub use openai::ChatBackend;

// Re-export from traits for convenience
pub use crate::traits::inference::InferenceBackend;

impl BackendConfig {
    /// Construct the configured backend as a shareable handle.
    pub fn build(&self) -> Result<Arc<dyn InferenceBackend>> {
        if self.endpoint.trim().is_empty() {
            return Err(AssistantError::config("backend endpoint is empty"));
        }
        if self.provider == BackendProvider::OpenAI && self.api_key.is_empty() {
            return Err(AssistantError::config("chat backend requires an API key"));
        }

        info!(
            provider = %self.provider,
            endpoint = %self.endpoint,
            summarize_model = %self.summarize_model,
            answer_model = %self.answer_model,
            max_input_chars = self.max_input_chars,
            "Inference backend configured"
        );

        let backend: Arc<dyn InferenceBackend> = match self.provider {
            BackendProvider::HuggingFace => Arc::new(HuggingFaceBackend::from_config(self)),
            BackendProvider::OpenAI => Arc::new(ChatBackend::from_config(self)),
        };
        Ok(backend)
    }
}
