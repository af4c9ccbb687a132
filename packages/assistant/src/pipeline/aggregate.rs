//! Content aggregation - extract many sources, combine in input order.

use futures::stream::{self, StreamExt};
use std::pin::pin;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::pipeline::extract::SourceExtractor;
use crate::types::{
    config::PipelineConfig,
    content::{AggregatedContent, ExtractionResult, Failure},
    source::Source,
};

/// Fans extraction out over a batch of sources.
///
/// Up to `concurrency` sources are extracted at once. Completion order
/// does not matter: results are slotted by index and combined in input
/// order.
#[derive(Clone)]
pub struct ContentAggregator {
    extractor: SourceExtractor,
    concurrency: usize,
}

impl ContentAggregator {
    pub fn new(extractor: SourceExtractor, config: &PipelineConfig) -> Self {
        Self {
            extractor,
            concurrency: config.concurrency.max(1),
        }
    }

    /// Extract every source and combine the results.
    pub async fn aggregate(&self, sources: Vec<Source>) -> AggregatedContent {
        self.aggregate_until(sources, &CancellationToken::new()).await
    }

    /// Like [`aggregate`](Self::aggregate), but stops when `cancel` fires.
    ///
    /// Extractions still in flight are dropped. Completed work is kept and
    /// combined as usual; unprocessed sources are listed in `pending`.
    pub async fn aggregate_until(
        &self,
        sources: Vec<Source>,
        cancel: &CancellationToken,
    ) -> AggregatedContent {
        let total = sources.len();
        info!(sources = total, concurrency = self.concurrency, "Aggregating sources");

        let mut slots: Vec<Option<ExtractionResult>> = (0..total).map(|_| None).collect();

        {
            let mut completed = pin!(stream::iter(sources.iter().cloned().enumerate())
                .map(|(index, source)| async move {
                    (index, self.extractor.extract(source).await)
                })
                .buffer_unordered(self.concurrency));

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        let done = slots.iter().filter(|s| s.is_some()).count();
                        warn!(completed = done, total, "Aggregation cancelled");
                        break;
                    }
                    next = completed.next() => match next {
                        Some((index, result)) => slots[index] = Some(result),
                        None => break,
                    },
                }
            }
        }

        let content = combine(sources, slots);
        info!(
            chars = content.combined_text.len(),
            failures = content.failures.len(),
            pending = content.pending.len(),
            "Aggregation complete"
        );
        content
    }
}

/// Combine slotted results in input order.
fn combine(sources: Vec<Source>, slots: Vec<Option<ExtractionResult>>) -> AggregatedContent {
    let mut content = AggregatedContent::default();

    for (index, (source, slot)) in sources.into_iter().zip(slots).enumerate() {
        match slot {
            Some(ExtractionResult {
                outcome: Ok(text), ..
            }) => content.combined_text.push_str(&text),
            Some(ExtractionResult {
                source,
                outcome: Err(error),
            }) => {
                warn!(
                    source_index = index,
                    source = %source,
                    kind = %error.kind(),
                    error = %error,
                    "Source extraction failed"
                );
                content.failures.push(Failure::source(index, source, &error));
            }
            None => content.pending.push(source),
        }
    }

    content
}
