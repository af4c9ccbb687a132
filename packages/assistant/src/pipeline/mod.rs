//! The aggregation and inference pipeline.
//!
//! The pipeline orchestrates:
//! - Extraction of each source (documents, transcripts)
//! - Order-preserving aggregation with bounded concurrency
//! - Conditional summarization and question answering

pub mod aggregate;
pub mod assistant;
pub mod extract;

pub use aggregate::ContentAggregator;
pub use assistant::TravelAssistant;
pub use extract::SourceExtractor;
