use crate::error::Result;
use crate::models::{ImageGenerationRequest, ImageGenerationResponse};
use async_trait::async_trait;

/// Backend seam for one image-generation call. The batch generator fans out
/// over this trait so tests can substitute a scripted model for the live
/// Gemini client.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Runs a single variation request to completion. Implementations report
    /// transport and provider failures through `Err`; a successful response
    /// with zero images is not an error.
    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse>;

    /// Short human-readable backend name used in log lines.
    fn name(&self) -> &str;
}
