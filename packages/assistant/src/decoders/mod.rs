//! Document decoder implementations.
//!
//! - `PdfDecoder` - PDF documents
//! - `MockDecoder` (in `testing`) - for tests

mod pdf;

pub use pdf::PdfDecoder;

// Re-export from traits for convenience
pub use crate::traits::decoder::DocumentDecoder;
