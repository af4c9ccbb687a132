//! Extraction and aggregation outputs.

use serde::Serialize;

use crate::error::{AssistantError, ErrorKind};
use crate::types::source::Source;

/// Outcome of extracting a single source.
///
/// Holds either the extracted text or the captured error, never both.
#[derive(Debug)]
pub struct ExtractionResult {
    /// The source that was extracted
    pub source: Source,

    /// Extracted text, or the reason it could not be produced
    pub outcome: Result<String, AssistantError>,
}

impl ExtractionResult {
    pub fn success(source: Source, text: impl Into<String>) -> Self {
        Self {
            source,
            outcome: Ok(text.into()),
        }
    }

    pub fn failure(source: Source, error: AssistantError) -> Self {
        Self {
            source,
            outcome: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn text(&self) -> Option<&str> {
        self.outcome.as_deref().ok()
    }

    pub fn error(&self) -> Option<&AssistantError> {
        self.outcome.as_ref().err()
    }
}

/// Where in the pipeline a failure happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum FailureStage {
    /// Extraction of the source at `index` in the request
    Source { index: usize, source: Source },

    /// The summarize inference call
    Summarize,

    /// The answer inference call
    Answer,
}

/// A captured, reported failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    #[serde(flatten)]
    pub stage: FailureStage,

    pub kind: ErrorKind,

    /// Human-readable cause
    pub message: String,
}

impl Failure {
    /// Record a failed source extraction.
    pub fn source(index: usize, source: Source, error: &AssistantError) -> Self {
        Self {
            stage: FailureStage::Source { index, source },
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    /// Record a failed summarize call.
    pub fn summarize(error: &AssistantError) -> Self {
        Self {
            stage: FailureStage::Summarize,
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    /// Record a failed answer call.
    pub fn answer(error: &AssistantError) -> Self {
        Self {
            stage: FailureStage::Answer,
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    /// The failed source, if this is an extraction failure.
    pub fn failed_source(&self) -> Option<&Source> {
        match &self.stage {
            FailureStage::Source { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Combined text of a batch of sources plus per-source failures.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregatedContent {
    /// Successful extractions concatenated in input order
    pub combined_text: String,

    /// One entry per failed source, in input order
    pub failures: Vec<Failure>,

    /// Sources left unprocessed because aggregation was cancelled
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pending: Vec<Source>,
}

impl AggregatedContent {
    /// Check whether any text was collected.
    pub fn has_text(&self) -> bool {
        !self.combined_text.is_empty()
    }

    /// Check whether aggregation stopped before every source was processed.
    pub fn is_partial(&self) -> bool {
        !self.pending.is_empty()
    }
}
