//! Inference client tests against a mocked completion endpoint

use super::common::*;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_completion_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_json(json!({
            "model": MODEL,
            "prompt": [1, 2, 3],
            "stream": false,
            "stop": ["\n"],
            "max_tokens": 100,
            "n": 1,
            "temperature": 0.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&["return x;"])))
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = settings_for(&server, 4096);
    settings.api_key = Some("sk-test".into());
    let client = client_for(settings);

    let text = client.generate(&prompt(3)).await.unwrap();
    assert_eq!(text.as_deref(), Some("return x;"));

    let report = client.timings().report();
    assert_eq!(report.len(), 1);
    assert_eq!(report.records[0].context_tokens, 3);
    assert_eq!(report.records[0].response_chars, 9);
}

#[tokio::test]
async fn test_first_choice_is_used() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(completion_body(&["first", "second"])),
    )
    .await;

    let client = client_for(settings_for(&server, 4096));
    let text = client.generate(&prompt(10)).await.unwrap();
    assert_eq!(text.as_deref(), Some("first"));
}

#[tokio::test]
async fn test_no_authorization_without_key() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(completion_body(&["ok"])),
    )
    .await;

    let client = client_for(settings_for(&server, 4096));
    client.generate(&prompt(2)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let auth = requests[0]
        .headers
        .iter()
        .any(|(name, _)| name.as_str().eq_ignore_ascii_case("authorization"));
    assert!(!auth);

    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], MODEL);
    assert_eq!(body["prompt"], json!([1, 2]));
}

#[tokio::test]
async fn test_context_overflow_never_reaches_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&["never"])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(settings_for(&server, 512));

    // 412 + 100 reserved == 512: not strictly below the window
    assert_eq!(client.generate(&prompt(412)).await.unwrap(), None);
    assert_eq!(client.generate(&prompt(5000)).await.unwrap(), None);
    assert!(client.timings().is_empty());
}

#[tokio::test]
async fn test_largest_admitted_prompt() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(completion_body(&[";"])),
    )
    .await;

    let client = client_for(settings_for(&server, 512));
    assert_eq!(client.generate(&prompt(411)).await.unwrap().as_deref(), Some(";"));
    assert_eq!(client.timings().len(), 1);
}
