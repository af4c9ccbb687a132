//! Transcript service trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::source::TranscriptEntry;

/// Resolves a video identifier to its timed transcript.
///
/// Implementations:
/// - `YouTubeTranscriptService` - public YouTube caption tracks
/// - `MockTranscriptService` - canned transcripts for tests
#[async_trait]
pub trait TranscriptService: Send + Sync {
    /// Fetch the transcript entries for `identifier`, in timeline order.
    ///
    /// Fails with `AssistantError::SourceUnavailable` when the identifier is
    /// invalid, the service is unreachable, or no transcript exists.
    async fn fetch(&self, identifier: &str) -> Result<Vec<TranscriptEntry>>;

    /// Get the service name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
