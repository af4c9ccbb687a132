//! Typed errors for the travel assistant library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of a failure, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A document could not be decoded (corrupt, encrypted, not a PDF).
    DecodeFailure,

    /// A transcript could not be fetched (invalid id, unreachable, no captions).
    SourceUnavailable,

    /// An inference backend call failed or returned unusable output.
    InferenceFailure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::DecodeFailure => "decode failure",
            Self::SourceUnavailable => "source unavailable",
            Self::InferenceFailure => "inference failure",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during extraction or inference.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Document decoding failed
    #[error("failed to decode document: {0}")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Transcript fetch failed
    #[error("transcript unavailable for {identifier}: {reason}")]
    SourceUnavailable { identifier: String, reason: String },

    /// Inference backend failed or returned garbage
    #[error("inference failed: {0}")]
    Inference(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl AssistantError {
    pub fn decode(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Decode(cause.into())
    }

    pub fn unavailable(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    pub fn inference(cause: impl Into<String>) -> Self {
        Self::Inference(cause.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Map to the reported taxonomy.
    ///
    /// `Config` errors only occur while wiring backends at startup; if one
    /// surfaces from a backend call it is reported as an inference failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode(_) => ErrorKind::DecodeFailure,
            Self::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            Self::Inference(_) | Self::Config(_) => ErrorKind::InferenceFailure,
        }
    }
}

/// Result type alias for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
