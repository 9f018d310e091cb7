pub mod prompt;
pub mod traits;

use crate::error::Result;
use crate::models::{ImageGenerationRequest, ReferenceImage, StyleConfig, VariationImage};
use futures::future::join_all;
use std::sync::Arc;
use traits::ImageModel;

pub use prompt::build_prompt;
pub use traits::ImageModel as ImageModelTrait;

/// Number of parallel generation attempts per batch.
pub const VARIATIONS: usize = 4;

/// Fans one styled request out into [`VARIATIONS`] concurrent calls against an
/// [`ImageModel`] backend and aggregates whichever variations survive.
pub struct BatchGenerator {
    backend: Arc<dyn ImageModel>,
}

impl BatchGenerator {
    pub fn new(backend: Arc<dyn ImageModel>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn ImageModel> {
        &self.backend
    }

    /// Runs one batch: a single prompt is built from `config` and the
    /// reference count, then sent [`VARIATIONS`] times with identical
    /// attachments and aspect ratio. Each variation fails independently; a
    /// failed variation is logged and contributes nothing. Images are
    /// collected in request-index order, never completion order, so output is
    /// deterministic for a fixed backend. All variations failing yields an
    /// empty batch, not an error.
    ///
    /// Callers enforce the non-empty-references precondition; with zero
    /// references this still runs and the prompt simply says so.
    pub async fn generate_batch(
        &self,
        config: &StyleConfig,
        references: &[ReferenceImage],
    ) -> Result<Vec<VariationImage>> {
        let _timer = crate::logger::timer("thumbnail_batch");

        let prompt = build_prompt(config, references.len());
        let aspect_ratio = config.size.aspect_ratio();

        log::info!(
            "🎨 Generating {} variations at {} ({}) via {}",
            VARIATIONS,
            config.size.as_str(),
            aspect_ratio,
            self.backend.name()
        );

        let request = ImageGenerationRequest {
            prompt,
            references: references.to_vec(),
            aspect_ratio: aspect_ratio.to_string(),
            model_id: None,
        };

        let attempts = (0..VARIATIONS).map(|index| {
            let request = request.clone();
            let backend = Arc::clone(&self.backend);
            async move {
                match backend.generate(request).await {
                    Ok(response) => Some(response),
                    Err(err) => {
                        log::error!("Variation {} failed: {}", index + 1, err);
                        None
                    }
                }
            }
        });

        // join_all settles every attempt and yields results in issue order.
        let responses = join_all(attempts).await;

        let survivors = responses.iter().filter(|r| r.is_some()).count();
        let images: Vec<VariationImage> = responses
            .into_iter()
            .flatten()
            .flat_map(|response| response.images)
            .map(|payload| VariationImage {
                size: config.size,
                payload,
            })
            .collect();

        if survivors == 0 {
            log::warn!(
                "All {} variations failed; returning an empty batch",
                VARIATIONS
            );
        } else {
            log::info!(
                "✅ Batch complete: {} image(s) from {}/{} variations",
                images.len(),
                survivors,
                VARIATIONS
            );
        }

        Ok(images)
    }
}
