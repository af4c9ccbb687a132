//! Credential handling for inference backends.

pub mod credentials;

pub use credentials::SecretString;
