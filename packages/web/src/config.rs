use std::env;
use std::net::SocketAddr;

use flashcards_generator::GeneratorConfig;

use crate::error::WebError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_addr: SocketAddr,
    pub generator: GeneratorConfig,
}

impl WebConfig {
    pub fn from_env() -> Result<Self, WebError> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| WebError::Config(format!("invalid BIND_ADDR: {e}")))?;

        let generator = GeneratorConfig::from_env()?;

        tracing::info!(
            api_url = %generator.api_url,
            timeout_secs = generator.timeout_secs,
            "inference endpoint configured"
        );

        Ok(Self {
            bind_addr,
            generator,
        })
    }
}
