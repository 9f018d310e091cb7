pub mod image_client;

use crate::{config::GeminiConfig, error::Result};

pub use image_client::ImageClient;

/// Entry point for the Gemini REST API. Holds one shared HTTP client and
/// hands out per-capability sub-clients.
#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    /// Builds a client from an explicit config. Fails early when no usable
    /// API key is present rather than on the first network call.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        config.ensure_api_key()?;
        let http = reqwest::Client::new();

        Ok(Self {
            image_client: ImageClient::new(http, config),
        })
    }

    /// Reads `GEMINI_API_KEY` / `GOOGLE_API_KEY` and friends from the
    /// environment.
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env())
    }

    pub fn images(&self) -> &ImageClient {
        &self.image_client
    }
}
