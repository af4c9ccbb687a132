//! Source extraction - one raw source to plain text.

use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

use crate::error::{AssistantError, Result};
use crate::traits::{decoder::DocumentDecoder, transcript::TranscriptService};
use crate::types::{content::ExtractionResult, source::Source};

/// Converts sources into plain text using the injected collaborators.
///
/// Never fails outright: errors are captured in the returned
/// [`ExtractionResult`] so one bad source cannot abort a batch.
#[derive(Clone)]
pub struct SourceExtractor {
    decoder: Arc<dyn DocumentDecoder>,
    transcripts: Arc<dyn TranscriptService>,
}

impl SourceExtractor {
    pub fn new(decoder: Arc<dyn DocumentDecoder>, transcripts: Arc<dyn TranscriptService>) -> Self {
        Self {
            decoder,
            transcripts,
        }
    }

    /// Extract the text of a single source.
    pub async fn extract(&self, source: Source) -> ExtractionResult {
        let outcome = match &source {
            Source::Document { bytes, .. } => self.extract_document(bytes.clone()).await,
            Source::Transcript { identifier } => self.extract_transcript(identifier).await,
        };

        if let Ok(text) = &outcome {
            debug!(source = %source, chars = text.len(), "Extracted source");
        }

        ExtractionResult { source, outcome }
    }

    /// Decode on the blocking pool and join pages in page order.
    async fn extract_document(&self, bytes: Bytes) -> Result<String> {
        let decoder = Arc::clone(&self.decoder);
        let pages = tokio::task::spawn_blocking(move || decoder.decode(&bytes))
            .await
            .map_err(|e| AssistantError::decode(format!("decoder task failed: {e}")))??;

        Ok(pages.concat())
    }

    /// Fetch the transcript and join entry texts with single spaces.
    async fn extract_transcript(&self, identifier: &str) -> Result<String> {
        let entries = self.transcripts.fetch(identifier).await?;

        Ok(entries
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::{MockDecoder, MockTranscriptService};

    fn extractor(decoder: MockDecoder, transcripts: MockTranscriptService) -> SourceExtractor {
        SourceExtractor::new(Arc::new(decoder), Arc::new(transcripts))
    }

    #[tokio::test]
    async fn test_document_pages_concatenated_in_order() {
        let decoder = MockDecoder::new().with_document(
            b"doc-a".to_vec(),
            vec!["Paris is the capital of France.", "The Louvre is a museum."],
        );
        let extractor = extractor(decoder, MockTranscriptService::new());

        let result = extractor.extract(Source::document(b"doc-a".to_vec())).await;
        assert_eq!(
            result.text(),
            Some("Paris is the capital of France.The Louvre is a museum.")
        );
    }

    #[tokio::test]
    async fn test_empty_pages_contribute_nothing() {
        let decoder =
            MockDecoder::new().with_document(b"scan".to_vec(), vec!["Cover", "", "Back"]);
        let extractor = extractor(decoder, MockTranscriptService::new());

        let result = extractor.extract(Source::document(b"scan".to_vec())).await;
        assert_eq!(result.text(), Some("CoverBack"));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_decode_failure() {
        let extractor = extractor(MockDecoder::new(), MockTranscriptService::new());

        let result = extractor.extract(Source::document(b"garbage".to_vec())).await;
        assert_eq!(result.error().map(|e| e.kind()), Some(ErrorKind::DecodeFailure));
    }

    #[tokio::test]
    async fn test_real_pdf_decoder_on_garbage() {
        let extractor = SourceExtractor::new(
            Arc::new(crate::decoders::PdfDecoder::new()),
            Arc::new(MockTranscriptService::new()),
        );

        let result = extractor
            .extract(Source::named_document("broken.pdf", b"%PDF-1.4 truncated".to_vec()))
            .await;
        assert_eq!(result.error().map(|e| e.kind()), Some(ErrorKind::DecodeFailure));
    }

    #[tokio::test]
    async fn test_transcript_entries_joined_by_space() {
        let transcripts = MockTranscriptService::new()
            .with_transcript("eiffel", &["Visit the Eiffel Tower", "at sunset."]);
        let extractor = extractor(MockDecoder::new(), transcripts);

        let result = extractor.extract(Source::transcript("eiffel")).await;
        assert_eq!(result.text(), Some("Visit the Eiffel Tower at sunset."));
    }

    #[tokio::test]
    async fn test_unknown_transcript_is_unavailable() {
        let extractor = extractor(MockDecoder::new(), MockTranscriptService::new());

        let result = extractor.extract(Source::transcript("missing")).await;
        assert_eq!(
            result.error().map(|e| e.kind()),
            Some(ErrorKind::SourceUnavailable)
        );
        assert_eq!(result.source, Source::transcript("missing"));
    }
}
