//! PDF decoding via `pdf-extract`.

use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::error::{AssistantError, Result};
use crate::traits::decoder::DocumentDecoder;

/// Decodes PDF bytes into page texts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfDecoder;

impl PdfDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for PdfDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<String>> {
        if !bytes.starts_with(b"%PDF") {
            return Err(AssistantError::decode("missing %PDF header"));
        }

        // pdf-extract panics on some malformed inputs instead of erroring
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|_| AssistantError::decode("PDF parser aborted on malformed input"))?
        .map_err(|e| map_pdf_error(e.to_string()))?;

        debug!(pages = pages.len(), bytes = bytes.len(), "Decoded PDF");
        Ok(pages)
    }

    fn name(&self) -> &str {
        "pdf"
    }
}

fn map_pdf_error(message: String) -> AssistantError {
    let lower = message.to_lowercase();
    if lower.contains("password") || lower.contains("encrypt") {
        AssistantError::decode(format!("PDF is encrypted: {message}"))
    } else {
        AssistantError::decode(message)
    }
}
