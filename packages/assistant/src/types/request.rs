//! Pipeline request and result types.

use serde::Serialize;

use crate::types::content::Failure;
use crate::types::source::Source;

/// Sources plus an optional question, as collected by the caller.
#[derive(Debug, Clone, Default)]
pub struct PipelineRequest {
    pub sources: Vec<Source>,
    pub question: Option<String>,
}

impl PipelineRequest {
    pub fn new(sources: Vec<Source>) -> Self {
        Self {
            sources,
            question: None,
        }
    }

    /// Add a source.
    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    /// Set the question.
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// The question, if present and not blank.
    pub fn question(&self) -> Option<&str> {
        self.question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

/// What the pipeline produced for one request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineResult {
    pub summary: Option<String>,
    pub answer: Option<String>,

    /// Aggregation failures first, then inference failures
    pub failures: Vec<Failure>,

    /// Set when the run was cancelled before every step finished
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
}

impl PipelineResult {
    /// Check if nothing was produced and nothing failed.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.answer.is_none() && self.failures.is_empty()
    }

    /// Check if every attempted step succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}
