//! Document decoder trait.
//!
//! Decoders turn a raw document byte stream into page texts. Decoding is
//! CPU-bound and blocking; the extractor runs it on the blocking pool.

use crate::error::Result;

/// Decodes a paginated document into the text of each page.
///
/// Implementations:
/// - `PdfDecoder` - PDF documents via `pdf-extract`
/// - `MockDecoder` - canned pages for tests
pub trait DocumentDecoder: Send + Sync {
    /// Decode `bytes` into page texts, in page order.
    ///
    /// A page with no extractable text is returned as an empty string.
    /// Malformed input fails with `AssistantError::Decode`.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<String>>;

    /// Get the decoder name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
