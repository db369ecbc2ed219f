//! Tests for the OpenAI-compatible client against a mock server.

use dreamtales_core::{CompletionRequest, ImageRequest, Message, SpeechRequest};
use dreamtales_error::{DreamTalesErrorKind, ProviderErrorKind, ProviderStage};
use dreamtales_interface::{ImageFetch, ImageSynthesis, SpeechSynthesis, TextCompletion};
use dreamtales_models::OpenAiClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::with_api_key("sk-test-key").with_base_url(server.uri())
}

fn completion_request() -> CompletionRequest {
    CompletionRequest::builder()
        .model("gpt-4o")
        .messages(vec![
            Message::system("Only gentle stories."),
            Message::user("A sleepy bunny"),
        ])
        .temperature(0.7)
        .build()
        .unwrap()
}

fn provider_error(err: &dreamtales_error::DreamTalesError) -> (&ProviderStage, &ProviderErrorKind) {
    match err.kind() {
        DreamTalesErrorKind::Provider(e) => (&e.stage, &e.kind),
        other => panic!("expected provider error, got {other}"),
    }
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = OpenAiClient::with_api_key("sk").with_base_url("http://localhost:8080/v1/");
    assert_eq!(client.base_url(), "http://localhost:8080/v1");
}

#[tokio::test]
async fn test_complete_sends_messages_and_parses_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": "Only gentle stories."},
                {"role": "user", "content": "A sleepy bunny"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  Once upon a time...  "}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let story = client_for(&server)
        .complete(&completion_request())
        .await
        .unwrap();

    assert_eq!(story, "Once upon a time...");
}

#[tokio::test]
async fn test_complete_maps_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&completion_request())
        .await
        .unwrap_err();

    let (stage, kind) = provider_error(&err);
    assert_eq!(*stage, ProviderStage::Text);
    assert_eq!(
        *kind,
        ProviderErrorKind::Api {
            status: 401,
            message: "invalid api key".to_string()
        }
    );
}

#[tokio::test]
async fn test_complete_rejects_empty_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&completion_request())
        .await
        .unwrap_err();

    assert!(matches!(
        provider_error(&err).1,
        ProviderErrorKind::EmptyResponse(_)
    ));
}

#[tokio::test]
async fn test_synthesize_image_returns_first_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_partial_json(json!({
            "model": "dall-e-3",
            "size": "1024x1024",
            "n": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1,
            "data": [{"url": "https://images.example/bunny.png", "revised_prompt": "A bunny"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ImageRequest::builder()
        .model("dall-e-3")
        .prompt("A sleepy bunny in a cozy bedroom")
        .size("1024x1024")
        .build()
        .unwrap();

    let url = client_for(&server)
        .synthesize_image(&request)
        .await
        .unwrap();

    assert_eq!(url, "https://images.example/bunny.png");
}

#[tokio::test]
async fn test_synthesize_image_without_url_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{}]})))
        .mount(&server)
        .await;

    let request = ImageRequest::builder()
        .model("dall-e-3")
        .prompt("A bunny")
        .size("1024x1024")
        .build()
        .unwrap();

    let err = client_for(&server)
        .synthesize_image(&request)
        .await
        .unwrap_err();

    let (stage, kind) = provider_error(&err);
    assert_eq!(*stage, ProviderStage::Image);
    assert!(matches!(kind, ProviderErrorKind::EmptyResponse(_)));
}

#[tokio::test]
async fn test_synthesize_speech_returns_bytes() {
    let server = MockServer::start().await;
    let audio = vec![0x49, 0x44, 0x33, 0x04, 0x00];

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(body_partial_json(json!({
            "model": "tts-1",
            "voice": "alloy",
            "input": "Once upon a time"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let request = SpeechRequest::builder()
        .model("tts-1")
        .voice("alloy")
        .input("Once upon a time")
        .build()
        .unwrap();

    let bytes = client_for(&server)
        .synthesize_speech(&request)
        .await
        .unwrap();

    assert_eq!(bytes, audio);
}

#[tokio::test]
async fn test_synthesize_speech_maps_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let request = SpeechRequest::builder()
        .model("tts-1")
        .voice("alloy")
        .input("Hello")
        .build()
        .unwrap();

    let err = client_for(&server)
        .synthesize_speech(&request)
        .await
        .unwrap_err();

    let (stage, kind) = provider_error(&err);
    assert_eq!(*stage, ProviderStage::Speech);
    assert!(matches!(kind, ProviderErrorKind::Api { status: 503, .. }));
}

#[tokio::test]
async fn test_fetch_image_downloads_bytes() {
    let server = MockServer::start().await;
    let png = vec![0x89, b'P', b'N', b'G'];

    Mock::given(method("GET"))
        .and(path("/files/bunny.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png.clone()))
        .mount(&server)
        .await;

    let url = format!("{}/files/bunny.png", server.uri());
    let bytes = client_for(&server).fetch_image(&url).await.unwrap();

    assert_eq!(bytes, png);
}

#[tokio::test]
async fn test_fetch_image_not_found() {
    let server = MockServer::start().await;

    let url = format!("{}/files/missing.png", server.uri());
    let err = client_for(&server).fetch_image(&url).await.unwrap_err();

    let (stage, kind) = provider_error(&err);
    assert_eq!(*stage, ProviderStage::ImageFetch);
    assert!(matches!(kind, ProviderErrorKind::Api { status: 404, .. }));
}

#[tokio::test]
async fn test_complete_reports_transport_failure_as_provider_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    let err = client.complete(&completion_request()).await.unwrap_err();

    let (stage, kind) = provider_error(&err);
    assert_eq!(*stage, ProviderStage::Text);
    assert!(matches!(kind, ProviderErrorKind::Http(_)));
}

#[tokio::test]
async fn test_complete_reports_malformed_body_as_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(&completion_request())
        .await
        .unwrap_err();

    let (stage, kind) = provider_error(&err);
    assert_eq!(*stage, ProviderStage::Text);
    assert!(matches!(kind, ProviderErrorKind::Parse(_)));
}
