use camera::{encode_jpeg, Frame};
use httpmock::{Method::POST, MockServer};
use image::RgbImage;
use recognizer::{Recognizer, RecognizerError, RemoteVision};

fn test_image() -> camera::EncodedImage {
    let frame = Frame::new(RgbImage::new(16, 12));
    encode_jpeg(&frame, 640, 70).unwrap()
}

#[tokio::test]
async fn returns_trimmed_first_choice() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .body_contains("gpt-4.1-mini")
                .body_contains("data:image/jpeg;base64,");
            then.status(200).json_body(serde_json::json!({
                "choices": [
                    {"message": {"content": "  Hay una silla y una mesa.  "}}
                ]
            }));
        })
        .await;

    let vision = RemoteVision::new(server.base_url(), "test-key");
    let out = vision.describe(&test_image()).await.unwrap();
    assert_eq!(out.as_deref(), Some("Hay una silla y una mesa."));
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_surfaces_the_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401).body("invalid api key");
        })
        .await;

    let vision = RemoteVision::new(server.base_url(), "bad-key");
    match vision.describe(&test_image()).await {
        Err(RecognizerError::Endpoint { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("expected Endpoint error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_content_is_nothing_to_announce() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(serde_json::json!({
                "choices": [{"message": {"content": "   "}}]
            }));
        })
        .await;

    let vision = RemoteVision::new(server.base_url(), "test-key");
    assert_eq!(vision.describe(&test_image()).await.unwrap(), None);
}

#[tokio::test]
async fn missing_choices_is_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(serde_json::json!({"choices": []}));
        })
        .await;

    let vision = RemoteVision::new(server.base_url(), "test-key");
    match vision.describe(&test_image()).await {
        Err(RecognizerError::InvalidResponse) => {}
        other => panic!("expected InvalidResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn model_override_is_sent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_contains("\"model\":\"gpt-4o\"");
            then.status(200).json_body(serde_json::json!({
                "choices": [{"message": {"content": "ok"}}]
            }));
        })
        .await;

    let vision = RemoteVision::new(server.base_url(), "test-key").with_model("gpt-4o");
    vision.describe(&test_image()).await.unwrap();
    mock.assert_async().await;
}
