//! Configuration constants and settings for the generator.

use crate::error::{GeneratorError, Result};

/// Default inference endpoint (Zephyr-7B on the Hugging Face Inference API).
pub const DEFAULT_API_URL: &str =
    "https://api-inference.huggingface.co/models/HuggingFaceH4/zephyr-7b-beta";

/// HTTP timeout in seconds.
///
/// Cold models on the shared inference API can take minutes to answer.
pub const HTTP_TIMEOUT_SECS: u64 = 180;

/// Default `max_new_tokens` generation parameter.
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 4096;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.5;

/// Smallest number of cards a user may request.
pub const MIN_CARD_COUNT: u32 = 5;

/// Largest number of cards a user may request.
pub const MAX_CARD_COUNT: u32 = 25;

/// Number of cards requested when the user does not choose.
pub const DEFAULT_CARD_COUNT: u32 = 10;

/// Validate a requested card count.
///
/// # Examples
/// ```
/// use flashcards_generator::config::validate_card_count;
///
/// assert!(validate_card_count(10).is_ok());
/// assert!(validate_card_count(4).is_err());
/// assert!(validate_card_count(26).is_err());
/// ```
pub fn validate_card_count(count: u32) -> Result<()> {
    if (MIN_CARD_COUNT..=MAX_CARD_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(GeneratorError::InvalidCardCount(count))
    }
}

/// Settings for talking to the inference endpoint.
///
/// NOTE: `Debug` is implemented by hand so the token never ends up in logs.
#[derive(Clone)]
pub struct GeneratorConfig {
    pub api_token: String,
    pub api_url: String,
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("max_new_tokens", &self.max_new_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var("HF_API_TOKEN")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| GeneratorError::Config("HF_API_TOKEN not set".into()))?;

        let api_url =
            std::env::var("FLASHCARDS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let max_new_tokens = std::env::var("FLASHCARDS_MAX_NEW_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_NEW_TOKENS);

        let temperature = std::env::var("FLASHCARDS_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        let timeout_secs = std::env::var("FLASHCARDS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(HTTP_TIMEOUT_SECS);

        Ok(Self {
            api_token,
            api_url,
            max_new_tokens,
            temperature,
            timeout_secs,
        })
    }

    /// Create a config builder, mainly for tests.
    pub fn builder(api_token: impl Into<String>) -> GeneratorConfigBuilder {
        GeneratorConfigBuilder {
            api_token: api_token.into(),
            api_url: DEFAULT_API_URL.into(),
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: HTTP_TIMEOUT_SECS,
        }
    }
}

/// Builder for constructing `GeneratorConfig`.
pub struct GeneratorConfigBuilder {
    api_token: String,
    api_url: String,
    max_new_tokens: u32,
    temperature: f64,
    timeout_secs: u64,
}

impl GeneratorConfigBuilder {
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> GeneratorConfig {
        GeneratorConfig {
            api_token: self.api_token,
            api_url: self.api_url,
            max_new_tokens: self.max_new_tokens,
            temperature: self.temperature,
            timeout_secs: self.timeout_secs,
        }
    }
}
