//! Inference backend trait.
//!
//! The pipeline needs exactly two capabilities from a language model:
//! - Summarization of the combined source text
//! - Answering a question grounded in that text
//!
//! Backends are constructed once at startup and shared by every request,
//! so they must not keep per-request state.

use async_trait::async_trait;

use crate::error::Result;

/// Text-generation backend with a fixed capability set.
///
/// Implementations wrap specific providers and handle prompting, input
/// bounds and response parsing:
/// - `HuggingFaceBackend` - summarization and extractive QA models
/// - `ChatBackend` - OpenAI-compatible chat completions
/// - `MockBackend` - deterministic responses for tests
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Condense `text`, preserving its salient facts.
    ///
    /// Input longer than the backend's bound must be truncated or
    /// chunk-and-reduced rather than rejected.
    async fn summarize(&self, text: &str) -> Result<String>;

    /// Answer `question` using only `text` as context.
    async fn answer(&self, text: &str, question: &str) -> Result<String>;

    /// Get the backend name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
