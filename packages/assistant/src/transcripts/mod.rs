//! Transcript service implementations.
//!
//! - `YouTubeTranscriptService` - public YouTube caption tracks
//! - `MockTranscriptService` (in `testing`) - for tests

mod youtube;

pub use youtube::{video_id, YouTubeTranscriptService};

// Re-export from traits for convenience
pub use crate::traits::transcript::TranscriptService;
