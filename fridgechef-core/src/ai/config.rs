//! Pipeline configuration from environment variables.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Default OpenRouter base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default vision-capable candidates for ingredient recognition, in
/// priority order. Earlier entries are preferred; later entries are
/// fallbacks when a model is rate-limited.
pub const DEFAULT_IMAGE_MODELS: &[&str] = &[
    "google/gemma-3-27b-it:free",
    "google/gemma-3-12b-it:free",
    "google/gemma-3-4b-it:free",
];

/// Default text candidates for recipe generation, in priority order.
pub const DEFAULT_TEXT_MODELS: &[&str] = &[
    "google/gemma-3-27b-it:free",
    "google/gemma-3-12b-it:free",
    "deepseek/deepseek-r1-0528:free",
];

/// Default per-call timeout for image recognition.
pub const DEFAULT_RECOGNITION_TIMEOUT: Duration = Duration::from_secs(60);

/// Default per-call timeout for recipe generation.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// AI pipeline configuration.
///
/// Loaded once at process start and passed into the pipelines; immutable
/// thereafter. Candidate model lists are fixed at call time.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for OpenRouter.
    pub api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Recognition candidates, priority order.
    pub image_models: Vec<String>,
    /// Generation candidates, priority order.
    pub text_models: Vec<String>,
    /// Per-call timeout for image recognition.
    pub recognition_timeout: Duration,
    /// Per-call timeout for recipe generation.
    pub generation_timeout: Duration,
}

impl AiConfig {
    /// Create a configuration with the default model lists and timeouts.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_models: to_owned_list(DEFAULT_IMAGE_MODELS),
            text_models: to_owned_list(DEFAULT_TEXT_MODELS),
            recognition_timeout: DEFAULT_RECOGNITION_TIMEOUT,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENROUTER_API_KEY`: API key for OpenRouter
    ///
    /// Optional:
    /// - `FRIDGECHEF_AI_BASE_URL`: API base URL
    /// - `FRIDGECHEF_IMAGE_MODELS`: Comma-separated recognition candidates
    /// - `FRIDGECHEF_TEXT_MODELS`: Comma-separated generation candidates
    /// - `FRIDGECHEF_RECOGNITION_TIMEOUT_SECS`: Recognition timeout (default: 60)
    /// - `FRIDGECHEF_GENERATION_TIMEOUT_SECS`: Generation timeout (default: 90)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let mut config = Self::new(api_key);

        if let Ok(base_url) = env::var("FRIDGECHEF_AI_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(models) = env::var("FRIDGECHEF_IMAGE_MODELS") {
            let parsed = parse_model_list(&models);
            if !parsed.is_empty() {
                config.image_models = parsed;
            }
        }

        if let Ok(models) = env::var("FRIDGECHEF_TEXT_MODELS") {
            let parsed = parse_model_list(&models);
            if !parsed.is_empty() {
                config.text_models = parsed;
            }
        }

        if let Some(secs) = parse_secs("FRIDGECHEF_RECOGNITION_TIMEOUT_SECS") {
            config.recognition_timeout = Duration::from_secs(secs);
        }

        if let Some(secs) = parse_secs("FRIDGECHEF_GENERATION_TIMEOUT_SECS") {
            config.generation_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn to_owned_list(models: &[&str]) -> Vec<String> {
    models.iter().map(|m| m.to_string()).collect()
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_secs(var: &str) -> Option<u64> {
    env::var(var).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_priority_lists() {
        let config = AiConfig::new("test-key");
        assert_eq!(config.image_models.len(), 3);
        assert_eq!(config.image_models[0], "google/gemma-3-27b-it:free");
        assert_eq!(config.text_models[2], "deepseek/deepseek-r1-0528:free");
        assert_eq!(config.recognition_timeout, Duration::from_secs(60));
        assert_eq!(config.generation_timeout, Duration::from_secs(90));
    }

    #[test]
    fn model_list_parsing_trims_and_drops_empty() {
        let parsed = parse_model_list(" a/b:free , c/d:free ,, ");
        assert_eq!(parsed, vec!["a/b:free", "c/d:free"]);
    }
}
