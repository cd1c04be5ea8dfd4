#![cfg(feature = "reqwest")]

use std::time::Duration;

use platform_timeout::signature::TIMEOUT_PAGE_PREFIX;
use platform_timeout::{Failure, is_platform_timeout};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("platform_timeout=debug")
        .with_test_writer()
        .try_init();
}

async fn mock_status(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/api/endpoint"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn gateway_timeout_response_is_timeout() {
    init_tracing();
    let server = MockServer::start().await;
    mock_status(&server, 504, TIMEOUT_PAGE_PREFIX).await;

    let response = reqwest::get(format!("{}/api/endpoint", server.uri()))
        .await
        .unwrap();

    assert!(is_platform_timeout(&response));
}

#[tokio::test]
async fn other_statuses_are_not_timeouts() {
    init_tracing();

    for status in [200, 500, 502, 503] {
        let server = MockServer::start().await;
        mock_status(&server, status, "{}").await;

        let response = reqwest::get(format!("{}/api/endpoint", server.uri()))
            .await
            .unwrap();

        assert!(!is_platform_timeout(&response), "{status}");
    }
}

#[tokio::test]
async fn status_error_carries_timeout() {
    init_tracing();
    let server = MockServer::start().await;
    mock_status(&server, 504, TIMEOUT_PAGE_PREFIX).await;

    let err = reqwest::get(format!("{}/api/endpoint", server.uri()))
        .await
        .unwrap()
        .error_for_status()
        .unwrap_err();

    assert!(is_platform_timeout(&err));
}

#[tokio::test]
async fn client_side_timeout_is_not_platform_timeout() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = client.get(server.uri()).send().await.unwrap_err();

    assert!(err.is_timeout());
    assert!(!is_platform_timeout(Failure::status(&err)));
}

#[tokio::test]
async fn timeout_page_body_is_plain_text() {
    let server = MockServer::start().await;
    mock_status(&server, 504, TIMEOUT_PAGE_PREFIX).await;

    let response = reqwest::get(format!("{}/api/endpoint", server.uri()))
        .await
        .unwrap();
    let body = response.text().await.unwrap();

    assert!(body.starts_with("An error occurred"));
    assert!(serde_json::from_str::<serde_json::Value>(&body).is_err());
}

#[tokio::test]
async fn caller_retries_until_timeout_clears() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/endpoint"))
        .respond_with(ResponseTemplate::new(504).set_body_string(TIMEOUT_PAGE_PREFIX))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/endpoint"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    let url = format!("{}/api/endpoint", server.uri());
    let mut attempts = 0;

    let response = loop {
        attempts += 1;
        let response = reqwest::get(&url).await.unwrap();
        if attempts < 5 && is_platform_timeout(&response) {
            continue;
        }
        break response;
    };

    assert_eq!(attempts, 3);
    assert_eq!(response.status(), 200);
}
