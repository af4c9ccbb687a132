use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use travel_assistant::{BackendConfig, BackendProvider, PipelineConfig};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub pipeline: PipelineConfig,
    pub transcript_language: String,
    pub default_document: Option<PathBuf>,
    pub default_videos: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let provider: BackendProvider = var("ASSISTANT_BACKEND")
            .unwrap_or_else(|| "huggingface".to_string())
            .parse()
            .context("ASSISTANT_BACKEND must be 'huggingface' or 'openai'")?;

        let fallback_key = match provider {
            BackendProvider::HuggingFace => "HF_API_TOKEN",
            BackendProvider::OpenAI => "OPENAI_API_KEY",
        };
        let api_key = var("ASSISTANT_API_KEY")
            .or_else(|| var(fallback_key))
            .unwrap_or_default();

        let mut backend = BackendConfig::new(provider, api_key);
        if let Some(endpoint) = var("ASSISTANT_ENDPOINT") {
            backend = backend.with_endpoint(endpoint);
        }
        if let Some(model) = var("ASSISTANT_SUMMARIZE_MODEL") {
            backend = backend.with_summarize_model(model);
        }
        if let Some(model) = var("ASSISTANT_ANSWER_MODEL") {
            backend = backend.with_answer_model(model);
        }
        if let Some(max) = var("ASSISTANT_MAX_INPUT_CHARS") {
            backend = backend.with_max_input_chars(
                max.parse()
                    .context("ASSISTANT_MAX_INPUT_CHARS must be a valid number")?,
            );
        }

        let mut pipeline = PipelineConfig::new();
        if let Some(concurrency) = var("ASSISTANT_CONCURRENCY") {
            pipeline = pipeline.with_concurrency(
                concurrency
                    .parse()
                    .context("ASSISTANT_CONCURRENCY must be a valid number")?,
            );
        }

        Ok(Self {
            backend,
            pipeline,
            transcript_language: var("ASSISTANT_TRANSCRIPT_LANGUAGE")
                .unwrap_or_else(|| "en".to_string()),
            default_document: var("ASSISTANT_DEFAULT_DOCUMENT").map(PathBuf::from),
            default_videos: var("ASSISTANT_DEFAULT_VIDEOS")
                .map(|videos| {
                    videos
                        .split(',')
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.backend.provider, BackendProvider::HuggingFace);
        assert!(config.backend.api_key.is_empty());
        assert_eq!(config.pipeline.concurrency, 4);
        assert_eq!(config.transcript_language, "en");
        assert!(config.default_document.is_none());
        assert!(config.default_videos.is_empty());
    }

    #[test]
    fn test_provider_specific_key_fallback() {
        let config = config(&[
            ("ASSISTANT_BACKEND", "openai"),
            ("HF_API_TOKEN", "hf_wrong"),
            ("OPENAI_API_KEY", "sk-right"),
        ])
        .unwrap();
        assert_eq!(config.backend.api_key.expose(), "sk-right");
        assert_eq!(config.backend.answer_model, "gpt-4o");
    }

    #[test]
    fn test_explicit_key_wins() {
        let config = config(&[
            ("ASSISTANT_API_KEY", "hf_explicit"),
            ("HF_API_TOKEN", "hf_fallback"),
        ])
        .unwrap();
        assert_eq!(config.backend.api_key.expose(), "hf_explicit");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("ASSISTANT_ENDPOINT", "http://localhost:8080/"),
            ("ASSISTANT_SUMMARIZE_MODEL", "facebook/bart-large-cnn"),
            ("ASSISTANT_MAX_INPUT_CHARS", "2000"),
            ("ASSISTANT_CONCURRENCY", "8"),
            ("ASSISTANT_TRANSCRIPT_LANGUAGE", "de"),
        ])
        .unwrap();
        assert_eq!(config.backend.endpoint, "http://localhost:8080");
        assert_eq!(config.backend.summarize_model, "facebook/bart-large-cnn");
        assert_eq!(config.backend.max_input_chars, 2000);
        assert_eq!(config.pipeline.concurrency, 8);
        assert_eq!(config.transcript_language, "de");
    }

    #[test]
    fn test_default_sources() {
        let config = config(&[
            ("ASSISTANT_DEFAULT_DOCUMENT", "guides/switzerland.pdf"),
            ("ASSISTANT_DEFAULT_VIDEOS", "pfdb6u4HDoQ, ,https://youtu.be/abc123def45"),
        ])
        .unwrap();
        assert_eq!(
            config.default_document,
            Some(PathBuf::from("guides/switzerland.pdf"))
        );
        assert_eq!(
            config.default_videos,
            vec!["pfdb6u4HDoQ", "https://youtu.be/abc123def45"]
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config(&[("ASSISTANT_BACKEND", "llama")]).is_err());
        assert!(config(&[("ASSISTANT_CONCURRENCY", "many")]).is_err());
        assert!(config(&[("ASSISTANT_MAX_INPUT_CHARS", "-1")]).is_err());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = config(&[("ASSISTANT_BACKEND", "  "), ("ASSISTANT_DEFAULT_VIDEOS", "")]).unwrap();
        assert_eq!(config.backend.provider, BackendProvider::HuggingFace);
        assert!(config.default_videos.is_empty());
    }
}
