use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("No reference images supplied")]
    MissingReferences,
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Response error: {0}")]
    Response(String),
    #[error("Provider error: {0}")]
    Provider(String),
}

impl StudioError {
    /// True when the provider rejected the configured API key. Callers pick the
    /// actionable "re-select your key" message off this instead of matching on
    /// message text.
    pub fn is_auth(&self) -> bool {
        matches!(self, StudioError::Auth(_) | StudioError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_and_config_count_as_key_problems() {
        assert!(StudioError::Auth("bad key".into()).is_auth());
        assert!(StudioError::Config("GEMINI_API_KEY not set".into()).is_auth());
        assert!(!StudioError::Provider("500 internal".into()).is_auth());
        assert!(!StudioError::MissingReferences.is_auth());
    }

    #[test]
    fn display_prefixes_the_error_kind() {
        let err = StudioError::Response("truncated body".into());
        assert_eq!(err.to_string(), "Response error: truncated body");
        assert_eq!(
            StudioError::MissingReferences.to_string(),
            "No reference images supplied"
        );
    }
}
