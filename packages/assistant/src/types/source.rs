//! Source types - raw inputs before extraction.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit of raw input before extraction.
///
/// Sources are immutable once built and cheap to clone: document bytes
/// are held in a shared [`Bytes`] buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    /// A paginated document (PDF) supplied as raw bytes.
    Document {
        /// Display label, usually the uploaded file name
        name: Option<String>,

        /// Raw document bytes
        #[serde(skip)]
        bytes: Bytes,
    },

    /// A video transcript, identified by a video id or URL.
    Transcript {
        /// Video identifier or URL
        identifier: String,
    },
}

impl Source {
    /// Create an unnamed document source.
    pub fn document(bytes: impl Into<Bytes>) -> Self {
        Self::Document {
            name: None,
            bytes: bytes.into(),
        }
    }

    /// Create a document source with a display name.
    pub fn named_document(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self::Document {
            name: Some(name.into()),
            bytes: bytes.into(),
        }
    }

    /// Create a transcript source.
    pub fn transcript(identifier: impl Into<String>) -> Self {
        Self::Transcript {
            identifier: identifier.into(),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Document { .. } => SourceKind::Document,
            Self::Transcript { .. } => SourceKind::Transcript,
        }
    }

    /// Human-readable label for logs and failure reports.
    pub fn label(&self) -> String {
        match self {
            Self::Document {
                name: Some(name), ..
            } => name.clone(),
            Self::Document { name: None, bytes } => format!("document ({} bytes)", bytes.len()),
            Self::Transcript { identifier } => identifier.clone(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.label())
    }
}

/// Discriminant of [`Source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Document,
    Transcript,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => f.write_str("document"),
            Self::Transcript => f.write_str("transcript"),
        }
    }
}

/// One timed caption line from a transcript service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Caption text
    pub text: String,

    /// Offset from the start of the video, in seconds
    pub start: f64,

    /// How long the caption is shown, in seconds
    pub duration: f64,
}

impl TranscriptEntry {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}
