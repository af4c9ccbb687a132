//! Travel Assistant Library
//!
//! Collects text from heterogeneous sources (PDF documents, video
//! transcripts) and derives a summary and a grounded answer to a
//! user question from the combined text.
//!
//! # Design Philosophy
//!
//! - One bad source never sinks the batch: failures are values, not panics
//! - Combined text always follows input order, however extraction is scheduled
//! - Backends are injected handles, constructed once and shared
//! - Library handles mechanics, the caller handles presentation
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use travel_assistant::{PdfDecoder, PipelineRequest, Source, SourceExtractor, TravelAssistant};
//! use travel_assistant::transcripts::YouTubeTranscriptService;
//! use travel_assistant::types::config::{BackendConfig, BackendProvider};
//!
//! let backend = BackendConfig::new(BackendProvider::HuggingFace, token).build()?;
//! let extractor = SourceExtractor::new(
//!     Arc::new(PdfDecoder::new()),
//!     Arc::new(YouTubeTranscriptService::new()),
//! );
//! let assistant = TravelAssistant::new(extractor, backend);
//!
//! let result = assistant
//!     .run(
//!         PipelineRequest::new(vec![
//!             Source::named_document("swiss.pdf", pdf_bytes),
//!             Source::transcript("https://www.youtube.com/watch?v=pfdb6u4HDoQ"),
//!         ])
//!         .with_question("Which passes are open in May?"),
//!     )
//!     .await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator abstractions (decoder, transcripts, inference)
//! - [`types`] - Sources, results, failures and configuration
//! - [`pipeline`] - Extraction, aggregation and orchestration
//! - [`decoders`] - Document decoder implementations
//! - [`transcripts`] - Transcript service implementations
//! - [`inference`] - Inference backend implementations
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod decoders;
pub mod error;
pub mod inference;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod transcripts;
pub mod types;

// Re-export core types at crate root
pub use error::{AssistantError, ErrorKind, Result};
pub use traits::{
    decoder::DocumentDecoder, inference::InferenceBackend, transcript::TranscriptService,
};
pub use types::{
    config::{BackendConfig, BackendProvider, PipelineConfig},
    content::{AggregatedContent, ExtractionResult, Failure, FailureStage},
    request::{PipelineRequest, PipelineResult},
    source::{Source, SourceKind, TranscriptEntry},
};

// Re-export pipeline components
pub use pipeline::{ContentAggregator, SourceExtractor, TravelAssistant};

// Re-export implementations
pub use decoders::PdfDecoder;
pub use inference::{ChatBackend, HuggingFaceBackend};
pub use security::SecretString;
pub use transcripts::YouTubeTranscriptService;

// Re-export testing utilities
pub use testing::{MockBackend, MockDecoder, MockTranscriptService};
