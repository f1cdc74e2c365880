#![cfg(test)]
use crate::error::ExtractorError;
use crate::handlers::{danbooru::DanbooruHandler, e621::E621Handler, BooruHandler};
use btk_common::{client, post::size::ImageSize, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use btk_common::{reqwest::StatusCode, serde_json::json, tokio};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn fetch_queries_json_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/42.json"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "tag_string_general": "cat dog",
            "image_width": 10,
            "image_height": 20
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client!(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT).unwrap();
    let handler = DanbooruHandler::new();

    let raw = handler
        .fetch(&client, &format!("{}/posts/42?q=cat", server.uri()))
        .await
        .unwrap();
    let post = handler.parse(&raw, ImageSize::None).unwrap();

    assert_eq!(post.tags.values().next().map(String::as_str), Some("cat, dog"));
    assert_eq!((post.width, post.height), (10, 20));
}

#[tokio::test]
async fn fetch_reports_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/1.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client!(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT).unwrap();
    let err = E621Handler::new()
        .fetch(&client, &format!("{}/posts/1", server.uri()))
        .await
        .unwrap_err();

    assert!(err.is_fetch_error());
    match err {
        ExtractorError::HttpStatus { status, .. } => assert_eq!(status, StatusCode::NOT_FOUND),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Cloudflare</html>"))
        .mount(&server)
        .await;

    let client = client!(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT).unwrap();
    let err = DanbooruHandler::new()
        .fetch(&client, &format!("{}/posts/1", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractorError::InvalidServerResponse { .. }));
}
