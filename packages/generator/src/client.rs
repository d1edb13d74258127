//! Client for the text-generation inference endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};

/// User agent string identifying this client.
const USER_AGENT: &str = concat!("flashcards-generator/", env!("CARGO_PKG_VERSION"));

/// Request to the inference endpoint.
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub prompt: String,
    pub max_new_tokens: u32,
    pub temperature: f64,
}

/// Trait for inference clients, enabling mocking in tests.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Run the prompt and return the generated text.
    async fn generate(&self, request: &InferenceRequest) -> Result<String>;
}

/// Hugging Face Inference API client.
///
/// NOTE: Do NOT derive `Debug` on this struct; `api_token` would be exposed.
pub struct HuggingFaceClient {
    http: reqwest::Client,
    api_token: String,
    api_url: String,
}

#[derive(Serialize)]
struct HuggingFaceRequest<'a> {
    inputs: &'a str,
    parameters: HuggingFaceParameters,
}

#[derive(Serialize)]
struct HuggingFaceParameters {
    max_new_tokens: u32,
    temperature: f64,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct HuggingFaceErrorResponse {
    error: Option<String>,
}

impl HuggingFaceClient {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            api_token: config.api_token.clone(),
            api_url: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl InferenceClient for HuggingFaceClient {
    async fn generate(&self, request: &InferenceRequest) -> Result<String> {
        let body = HuggingFaceRequest {
            inputs: &request.prompt,
            parameters: HuggingFaceParameters {
                max_new_tokens: request.max_new_tokens,
                temperature: request.temperature,
                return_full_text: false,
            },
        };

        debug!(
            url = %self.api_url,
            prompt_len = request.prompt.len(),
            "sending inference request"
        );

        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "inference request failed");
                GeneratorError::Request(e)
            })?;

        let status = resp.status().as_u16();

        if status == 503 {
            warn!("model is still loading");
            return Err(GeneratorError::ModelLoading);
        }

        let body_text = resp.text().await?;

        if !(200..300).contains(&status) {
            warn!(status, "inference endpoint returned an error");
            let message = serde_json::from_str::<HuggingFaceErrorResponse>(&body_text)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(body_text);
            return Err(GeneratorError::Api { status, message });
        }

        extract_generated_text(&body_text)
    }
}

/// Pull `generated_text` out of a `[{"generated_text": "..."}]` body.
pub fn extract_generated_text(body: &str) -> Result<String> {
    let unexpected = || GeneratorError::UnexpectedResponse(body.to_string());

    let value: Value = serde_json::from_str(body).map_err(|_| unexpected())?;

    value
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get("generated_text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(unexpected)
}

/// Test utilities for the inference client.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Mock inference client. Returns pre-configured responses in order and
    /// records the prompts it was given.
    pub struct MockInferenceClient {
        responses: Mutex<Vec<Result<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockInferenceClient {
        pub fn new(responses: Vec<Result<String>>) -> Self {
            // Reverse so we can pop from the end
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn with_response(content: &str) -> Self {
            Self::new(vec![Ok(content.to_string())])
        }

        pub fn with_responses(contents: Vec<&str>) -> Self {
            Self::new(contents.into_iter().map(|c| Ok(c.to_string())).collect())
        }

        pub fn with_error(error: GeneratorError) -> Self {
            Self::new(vec![Err(error)])
        }

        /// Prompts received so far, oldest first.
        pub fn prompts(&self) -> Vec<String> {
            self.prompts
                .lock()
                .map(|p| p.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl InferenceClient for MockInferenceClient {
        async fn generate(&self, request: &InferenceRequest) -> Result<String> {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(request.prompt.clone());
            }
            let mut responses = self.responses.lock().map_err(|e| {
                GeneratorError::UnexpectedResponse(format!("mock lock poisoned: {e}"))
            })?;
            responses
                .pop()
                .unwrap_or_else(|| Err(GeneratorError::UnexpectedResponse("no mock response".into())))
        }
    }
}
