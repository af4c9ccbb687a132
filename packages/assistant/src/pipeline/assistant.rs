//! The travel assistant pipeline: aggregate, summarize, answer.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::pipeline::{aggregate::ContentAggregator, extract::SourceExtractor};
use crate::traits::inference::InferenceBackend;
use crate::types::{
    config::PipelineConfig,
    content::{AggregatedContent, Failure},
    request::{PipelineRequest, PipelineResult},
};

/// Orchestrates one request end to end.
///
/// Holds no request state: a single instance can serve any number of
/// concurrent `run` calls.
///
/// # Example
///
/// ```rust,ignore
/// let extractor = SourceExtractor::new(Arc::new(PdfDecoder::new()), Arc::new(YouTubeTranscriptService::new()));
/// let assistant = TravelAssistant::new(extractor, backend);
///
/// let result = assistant
///     .run(PipelineRequest::new(sources).with_question("Best time to visit Zermatt?"))
///     .await;
/// ```
#[derive(Clone)]
pub struct TravelAssistant {
    aggregator: ContentAggregator,
    backend: Arc<dyn InferenceBackend>,
}

impl TravelAssistant {
    /// Create with the default pipeline configuration.
    pub fn new(extractor: SourceExtractor, backend: Arc<dyn InferenceBackend>) -> Self {
        Self::with_config(extractor, backend, &PipelineConfig::default())
    }

    pub fn with_config(
        extractor: SourceExtractor,
        backend: Arc<dyn InferenceBackend>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            aggregator: ContentAggregator::new(extractor, config),
            backend,
        }
    }

    /// The aggregation stage, for callers that only need combined text.
    pub fn aggregator(&self) -> &ContentAggregator {
        &self.aggregator
    }

    /// Run the pipeline to completion.
    pub async fn run(&self, request: PipelineRequest) -> PipelineResult {
        self.run_until(request, &CancellationToken::new()).await
    }

    /// Run the pipeline, stopping early if `cancel` fires.
    ///
    /// A cancelled run keeps the failures of sources that finished, skips
    /// any inference not yet completed, and sets `cancelled`.
    pub async fn run_until(
        &self,
        request: PipelineRequest,
        cancel: &CancellationToken,
    ) -> PipelineResult {
        let question = request.question().map(str::to_string);

        // 1. Aggregate
        let AggregatedContent {
            combined_text,
            failures,
            pending,
        } = self.aggregator.aggregate_until(request.sources, cancel).await;

        let mut result = PipelineResult {
            failures,
            cancelled: !pending.is_empty(),
            ..Default::default()
        };

        if combined_text.is_empty() {
            info!(
                failures = result.failures.len(),
                "No text collected, skipping inference"
            );
            return result;
        }
        if cancel.is_cancelled() {
            result.cancelled = true;
            return result;
        }

        // 2 + 3. Summarize and (optionally) answer
        let text = combined_text.as_str();
        let summarize = self.backend.summarize(text);
        let answer = async {
            match question.as_deref() {
                Some(question) => Some(self.backend.answer(text, question).await),
                None => None,
            }
        };

        info!(
            backend = self.backend.name(),
            chars = text.len(),
            question = question.is_some(),
            "Running inference"
        );

        let (summary, answer) = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Inference cancelled");
                result.cancelled = true;
                return result;
            }
            outcome = async { tokio::join!(summarize, answer) } => outcome,
        };

        match summary {
            Ok(summary) => result.summary = Some(summary),
            Err(e) => {
                warn!(error = %e, "Summarize failed");
                result.failures.push(Failure::summarize(&e));
            }
        }

        match answer {
            Some(Ok(answer)) => result.answer = Some(answer),
            Some(Err(e)) => {
                warn!(error = %e, "Answer failed");
                result.failures.push(Failure::answer(&e));
            }
            None => {}
        }

        info!(
            summary = result.summary.is_some(),
            answer = result.answer.is_some(),
            failures = result.failures.len(),
            "Pipeline complete"
        );

        result
    }
}
