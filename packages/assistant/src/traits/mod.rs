//! Core trait abstractions for the travel assistant library.
//!
//! These traits define the external collaborators the pipeline depends on:
//! document decoding, transcript retrieval, and text generation.

pub mod decoder;
pub mod inference;
pub mod transcript;
