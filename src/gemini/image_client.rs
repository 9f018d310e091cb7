use crate::{
    config::GeminiConfig,
    error::{Result, StudioError},
    generation::traits::ImageModel,
    models::{
        ApiErrorEnvelope, GenerateContentResponse, ImageGenerationRequest,
        ImageGenerationResponse, ImagePayload,
    },
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    config: GeminiConfig,
}

impl ImageClient {
    pub fn new(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    /// Sends one `generateContent` call: reference images as inline-data
    /// parts, prompt text last, aspect ratio via `generationConfig`. Every
    /// inline-data part in every candidate is decoded; a reply with no image
    /// parts is a successful empty response.
    pub async fn generate(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        let api_key = self.config.ensure_api_key()?;
        let model_id = request
            .model_id
            .as_deref()
            .unwrap_or_else(|| self.config.model_id());

        let mut parts: Vec<Value> = request
            .references
            .iter()
            .map(|image| {
                json!({
                    "inlineData": {
                        "mimeType": image.mime_type,
                        "data": image.to_base64(),
                    }
                })
            })
            .collect();
        parts.push(json!({ "text": request.prompt }));

        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": parts,
            }],
            "generationConfig": {
                "responseModalities": ["IMAGE"],
                "imageConfig": {
                    "aspectRatio": request.aspect_ratio,
                }
            }
        });

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base(),
            model_id
        );

        log::info!("🖼️  Generating image with model: {}", model_id);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| StudioError::Request(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status.as_u16(), &error_text));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| StudioError::Response(format!("Malformed Gemini response: {}", e)))?;

        let mut images = Vec::new();
        for candidate in body.candidates {
            if let Some(content) = candidate.content {
                for part in content.parts {
                    if let Some(inline) = part.inline_data {
                        let data = BASE64.decode(inline.data.as_bytes()).map_err(|e| {
                            StudioError::Response(format!("Invalid image encoding: {}", e))
                        })?;
                        images.push(ImagePayload {
                            data,
                            mime_type: inline
                                .mime_type
                                .unwrap_or_else(|| "image/png".to_string()),
                        });
                    }
                }
            }
        }

        log::debug!("Model {} returned {} image part(s)", model_id, images.len());

        Ok(ImageGenerationResponse {
            images,
            model: model_id.to_string(),
        })
    }

    pub fn supported_models() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            (
                "gemini-2.5-flash-image",
                "Gemini 2.5 Flash Image",
                "Google",
            ),
            (
                "gemini-2.0-flash-preview-image-generation",
                "Gemini 2.0 Flash Image Preview",
                "Google",
            ),
        ]
    }
}

#[async_trait]
impl ImageModel for ImageClient {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse> {
        ImageClient::generate(self, request).await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Maps a non-success Gemini reply onto the error taxonomy. The envelope's
/// machine-readable `status` decides first; unparseable bodies fall back to
/// the "Requested entity was not found" signature that bad-key replies are
/// known to carry.
fn classify_api_error(status: u16, body: &str) -> StudioError {
    if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        let code = envelope.error.status.unwrap_or_default();
        let message = envelope
            .error
            .message
            .unwrap_or_else(|| format!("HTTP {}", status));
        return match code.as_str() {
            "UNAUTHENTICATED" | "PERMISSION_DENIED" | "NOT_FOUND" => StudioError::Auth(message),
            "" => StudioError::Provider(message),
            _ => StudioError::Provider(format!("{}: {}", code, message)),
        };
    }

    if body.contains("Requested entity was not found") {
        return StudioError::Auth(body.trim().to_string());
    }

    StudioError::Provider(format!("HTTP {}: {}", status, body.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_reads_as_auth_failure() {
        let body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        let err = classify_api_error(404, body);
        assert!(err.is_auth(), "got {:?}", err);
    }

    #[test]
    fn unauthenticated_status_reads_as_auth_failure() {
        let body = r#"{"error":{"code":401,"message":"API key not valid.","status":"UNAUTHENTICATED"}}"#;
        assert!(classify_api_error(401, body).is_auth());
    }

    #[test]
    fn resource_exhausted_is_a_provider_error() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = classify_api_error(429, body);
        assert!(!err.is_auth());
        assert!(err.to_string().contains("RESOURCE_EXHAUSTED"));
    }

    #[test]
    fn plain_text_body_with_signature_still_reads_as_auth() {
        let err = classify_api_error(404, "Requested entity was not found.");
        assert!(err.is_auth());
    }

    #[test]
    fn plain_text_body_without_signature_is_provider() {
        let err = classify_api_error(500, "upstream exploded");
        assert!(!err.is_auth());
        assert!(err.to_string().contains("HTTP 500"));
    }
}
