use crate::models::OutputSize;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on reference images per request, matching the upload widget.
pub const MAX_REFERENCE_IMAGES: usize = 20;

/// A user-supplied photograph anchoring facial identity. Opaque bytes plus a
/// media-type tag; never inspected beyond wire encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceImage {
    pub id: String,
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl ReferenceImage {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        ReferenceImage {
            id: Uuid::new_v4().to_string(),
            data,
            mime_type: mime_type.into(),
        }
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.data)
    }
}

/// One decoded image returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePayload {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// An image payload tagged with the size it was produced at. The batch
/// generator emits these; the studio wraps them into [`GeneratedImage`]s.
#[derive(Debug, Clone)]
pub struct VariationImage {
    pub size: OutputSize,
    pub payload: ImagePayload,
}

/// A finished thumbnail owned by the studio. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub id: String,
    pub data: Vec<u8>,
    pub mime_type: String,
    pub size: OutputSize,
    pub pose: String,
    pub created_at: DateTime<Utc>,
}

impl GeneratedImage {
    pub fn from_variation(variation: VariationImage, pose: impl Into<String>) -> Self {
        GeneratedImage {
            id: Uuid::new_v4().to_string(),
            data: variation.payload.data,
            mime_type: variation.payload.mime_type,
            size: variation.size,
            pose: pose.into(),
            created_at: Utc::now(),
        }
    }

    /// `data:` URL form for front ends that render straight from memory.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.data))
    }
}

/// One variation request to the image model: prompt text, reference
/// attachments in caller order, and the out-of-band aspect-ratio token.
#[derive(Debug, Clone)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub references: Vec<ReferenceImage>,
    pub aspect_ratio: String,
    pub model_id: Option<String>,
}

/// Everything the provider handed back for one variation. Zero images is a
/// legitimate outcome.
#[derive(Debug, Clone)]
pub struct ImageGenerationResponse {
    pub images: Vec<ImagePayload>,
    pub model: String,
}

// Wire shape of the Gemini generateContent response. The REST surface emits
// camelCase; the snake_case aliases cover older proxy deployments.

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<GenerateContentCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentCandidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "inlineData", alias = "inline_data")]
    pub inline_data: Option<InlineData>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType", alias = "mime_type")]
    pub mime_type: Option<String>,
    pub data: String,
}

/// Gemini error envelope: `{"error": {"code": 404, "message": "...", "status": "NOT_FOUND"}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub status: Option<String>,
}
