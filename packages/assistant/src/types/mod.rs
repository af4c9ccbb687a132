//! Data types for the travel assistant library.

pub mod config;
pub mod content;
pub mod request;
pub mod source;
