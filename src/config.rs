use crate::error::{Result, StudioError};
use std::env;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Reads one env var, treating set-but-blank the same as unset.
fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model_id: Option<String>,
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        // Each variable is filtered for emptiness on its own, so a blank
        // GEMINI_API_KEY still falls back to GOOGLE_API_KEY.
        let api_key =
            non_empty_env("GEMINI_API_KEY").or_else(|| non_empty_env("GOOGLE_API_KEY"));

        GeminiConfig {
            api_key,
            api_base: non_empty_env("GEMINI_API_BASE"),
            model_id: non_empty_env("GEMINI_IMAGE_MODEL"),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    /// Key-presence check that must pass before any call is attempted. Failing
    /// here is a configuration problem, distinguishable from provider rejections.
    pub fn ensure_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                StudioError::Config(
                    "No API key selected: set GEMINI_API_KEY (or GOOGLE_API_KEY)".into(),
                )
            })
    }

    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .map(|base| base.trim_end_matches('/'))
            .unwrap_or(DEFAULT_API_BASE)
    }

    pub fn model_id(&self) -> &str {
        self.model_id.as_deref().unwrap_or(DEFAULT_IMAGE_MODEL)
    }
}
