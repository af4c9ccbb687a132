//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the assistant
//! without parsing real PDFs or making network calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{AssistantError, Result};
use crate::traits::{
    decoder::DocumentDecoder, inference::InferenceBackend, transcript::TranscriptService,
};
use crate::types::source::TranscriptEntry;

// =============================================================================
// Document decoding
// =============================================================================

/// A mock decoder that maps known byte blobs to canned pages.
///
/// Any unregistered input is treated as a corrupt document.
#[derive(Default, Clone)]
pub struct MockDecoder {
    documents: Arc<RwLock<HashMap<Vec<u8>, Vec<String>>>>,
    decode_calls: Arc<RwLock<usize>>,
}

impl MockDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document's bytes and the pages it decodes to.
    pub fn with_document(
        self,
        bytes: impl Into<Vec<u8>>,
        pages: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.documents
            .write()
            .unwrap()
            .insert(bytes.into(), pages.into_iter().map(Into::into).collect());
        self
    }

    /// Number of times `decode` was called.
    pub fn decode_call_count(&self) -> usize {
        *self.decode_calls.read().unwrap()
    }
}

impl DocumentDecoder for MockDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<String>> {
        *self.decode_calls.write().unwrap() += 1;

        self.documents
            .read()
            .unwrap()
            .get(bytes)
            .cloned()
            .ok_or_else(|| AssistantError::decode("unrecognized document bytes"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// =============================================================================
// Transcripts
// =============================================================================

/// A mock transcript service with canned transcripts and optional latency.
#[derive(Default, Clone)]
pub struct MockTranscriptService {
    transcripts: Arc<RwLock<HashMap<String, Vec<TranscriptEntry>>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    fetch_calls: Arc<RwLock<Vec<String>>>,
}

impl MockTranscriptService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transcript; entries are spaced two seconds apart.
    pub fn with_transcript(self, identifier: impl Into<String>, lines: &[&str]) -> Self {
        let entries = lines
            .iter()
            .enumerate()
            .map(|(i, line)| TranscriptEntry::new(*line, i as f64 * 2.0, 2.0))
            .collect();
        self.transcripts
            .write()
            .unwrap()
            .insert(identifier.into(), entries);
        self
    }

    /// Delay every fetch of `identifier`.
    pub fn with_delay(self, identifier: impl Into<String>, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(identifier.into(), delay);
        self
    }

    /// Identifiers requested so far, in call order.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.read().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptService for MockTranscriptService {
    async fn fetch(&self, identifier: &str) -> Result<Vec<TranscriptEntry>> {
        self.fetch_calls
            .write()
            .unwrap()
            .push(identifier.to_string());

        let delay = self.delays.read().unwrap().get(identifier).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.transcripts
            .read()
            .unwrap()
            .get(identifier)
            .cloned()
            .ok_or_else(|| AssistantError::unavailable(identifier, "no transcript available"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// =============================================================================
// Inference
// =============================================================================

/// Record of a call made to the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockBackendCall {
    Summarize { text_len: usize },
    Answer { text_len: usize, question: String },
}

/// A mock inference backend for testing.
///
/// Returns deterministic responses:
/// - `summarize` returns the first sentence of the text
/// - `answer` returns the sentence sharing the most words with the question
#[derive(Default, Clone)]
pub struct MockBackend {
    summary: Option<String>,
    summarize_error: Option<String>,
    answer_error: Option<String>,
    latency: Option<Duration>,
    calls: Arc<RwLock<Vec<MockBackendCall>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a fixed summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Make every `summarize` call fail with this cause.
    pub fn fail_summarize(mut self, cause: impl Into<String>) -> Self {
        self.summarize_error = Some(cause.into());
        self
    }

    /// Make every `answer` call fail with this cause.
    pub fn fail_answer(mut self, cause: impl Into<String>) -> Self {
        self.answer_error = Some(cause.into());
        self
    }

    /// Delay every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockBackendCall> {
        self.calls.read().unwrap().clone()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    async fn summarize(&self, text: &str) -> Result<String> {
        self.calls.write().unwrap().push(MockBackendCall::Summarize {
            text_len: text.len(),
        });
        self.simulate_latency().await;

        if let Some(cause) = &self.summarize_error {
            return Err(AssistantError::inference(cause.clone()));
        }
        if let Some(summary) = &self.summary {
            return Ok(summary.clone());
        }

        sentences(text)
            .next()
            .map(str::to_string)
            .ok_or_else(|| AssistantError::inference("nothing to summarize"))
    }

    async fn answer(&self, text: &str, question: &str) -> Result<String> {
        self.calls.write().unwrap().push(MockBackendCall::Answer {
            text_len: text.len(),
            question: question.to_string(),
        });
        self.simulate_latency().await;

        if let Some(cause) = &self.answer_error {
            return Err(AssistantError::inference(cause.clone()));
        }

        let wanted = keywords(question);
        let best = sentences(text)
            .map(|sentence| {
                let overlap = keywords(sentence)
                    .iter()
                    .filter(|w| wanted.contains(*w))
                    .count();
                (overlap, sentence)
            })
            .filter(|(overlap, _)| *overlap > 0)
            .max_by_key(|(overlap, _)| *overlap);

        Ok(match best {
            Some((_, sentence)) => sentence.to_string(),
            None => "The provided material does not say.".to_string(),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn sentences(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split_inclusive(|c: char| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn keywords(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 3)
        .map(str::to_lowercase)
        .collect()
}
