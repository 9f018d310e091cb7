use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::{json, Value};
use std::sync::Arc;
use thumbforge::models::{ImageGenerationRequest, OutputSize, ReferenceImage, StyleConfig};
use thumbforge::{BatchGenerator, GeminiConfig, ImageClient, StudioError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ImageClient {
    let config = GeminiConfig::new()
        .with_api_key("test-key")
        .with_api_base(server.uri());
    ImageClient::new(reqwest::Client::new(), config)
}

fn sample_request() -> ImageGenerationRequest {
    ImageGenerationRequest {
        prompt: "A test prompt mentioning Thumbs up".to_string(),
        references: vec![
            ReferenceImage::new(vec![1, 2, 3], "image/jpeg"),
            ReferenceImage::new(vec![4, 5, 6], "image/png"),
        ],
        aspect_ratio: "16:9".to_string(),
        model_id: None,
    }
}

fn image_response(payloads: &[&str]) -> Value {
    let parts: Vec<Value> = payloads
        .iter()
        .map(|data| {
            json!({
                "inlineData": {
                    "mimeType": "image/png",
                    "data": BASE64.encode(data.as_bytes()),
                }
            })
        })
        .collect();
    json!({ "candidates": [{ "content": { "parts": parts } }] })
}

#[tokio::test]
async fn decodes_every_inline_image_in_order() {
    let server = MockServer::start().await;
    let body = json!({
        "candidates": [{
            "content": {
                "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": BASE64.encode(b"one") } },
                    { "text": "some interleaved commentary" },
                    { "inlineData": { "data": BASE64.encode(b"two") } },
                ]
            }
        }]
    });
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-image:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).generate(sample_request()).await.unwrap();

    assert_eq!(response.images.len(), 2);
    assert_eq!(response.images[0].data, b"one");
    assert_eq!(response.images[1].data, b"two");
    assert_eq!(response.images[1].mime_type, "image/png");
    assert_eq!(response.model, "gemini-2.5-flash-image");
}

#[tokio::test]
async fn sends_references_before_prompt_and_aspect_ratio_out_of_band() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response(&["img"])))
        .mount(&server)
        .await;

    client_for(&server).generate(sample_request()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    let parts = body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
    assert!(parts[2]["text"]
        .as_str()
        .unwrap()
        .contains("Thumbs up"));

    assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "16:9");
    assert_eq!(body["generationConfig"]["responseModalities"][0], "IMAGE");
}

#[tokio::test]
async fn not_found_reply_surfaces_as_auth_failure() {
    let server = MockServer::start().await;
    let body = json!({
        "error": {
            "code": 404,
            "message": "Requested entity was not found.",
            "status": "NOT_FOUND"
        }
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(body))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate(sample_request())
        .await
        .unwrap_err();

    assert!(err.is_auth(), "expected auth classification, got {:?}", err);
    assert!(err.to_string().contains("Requested entity was not found"));
}

#[tokio::test]
async fn server_errors_surface_as_provider_failures() {
    let server = MockServer::start().await;
    let body = json!({
        "error": { "code": 500, "message": "backend blew up", "status": "INTERNAL" }
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(body))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate(sample_request())
        .await
        .unwrap_err();

    assert!(!err.is_auth());
    assert!(err.to_string().contains("INTERNAL"));
}

#[tokio::test]
async fn missing_key_fails_before_any_network_call() {
    let server = MockServer::start().await;
    let config = GeminiConfig::new().with_api_base(server.uri());
    let client = ImageClient::new(reqwest::Client::new(), config);

    let err = client.generate(sample_request()).await.unwrap_err();

    assert!(matches!(err, StudioError::Config(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn reply_without_candidates_is_an_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let response = client_for(&server).generate(sample_request()).await.unwrap();
    assert!(response.images.is_empty());
}

#[tokio::test]
async fn batch_fans_out_four_calls_through_the_live_client() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-image:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response(&["frame"])))
        .expect(4)
        .mount(&server)
        .await;

    let generator = BatchGenerator::new(Arc::new(client_for(&server)));
    let style = StyleConfig {
        size: OutputSize::Landscape,
        ..StyleConfig::default()
    };
    let references = vec![ReferenceImage::new(vec![9, 9], "image/jpeg")];

    let batch = generator.generate_batch(&style, &references).await.unwrap();

    assert_eq!(batch.len(), 4);
    assert!(batch.iter().all(|image| image.size == OutputSize::Landscape));
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}
