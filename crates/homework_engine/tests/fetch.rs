use std::time::Duration;

use homework_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings {
        endpoint: format!("{}/api/user_api/homework_statuses/", server.uri()),
        ..FetchSettings::new("practicum-token")
    }
}

#[tokio::test]
async fn fetcher_sends_token_and_window_and_decodes_body() {
    let server = MockServer::start().await;
    let body = json!({
        "homeworks": [{"homework_name": "hw1", "status": "approved"}],
        "current_date": 1700000000
    });
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .and(header("Authorization", "OAuth practicum-token"))
        .and(query_param("from_date", "1699395200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server)).expect("client");
    let response = fetcher.fetch(1_699_395_200).await.expect("fetch ok");

    assert_eq!(response, body);
}

#[tokio::test]
async fn fetcher_returns_non_object_bodies_unvalidated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server)).expect("client");
    let response = fetcher.fetch(0).await.expect("fetch ok");

    assert_eq!(response, json!([1, 2, 3]));
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server)).expect("client");
    let err = fetcher.fetch(0).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.kind.to_string(), "http status 503");
    assert_eq!(err.to_string(), "Код ответа API: 503");
}

#[tokio::test]
async fn fetcher_treats_other_success_codes_as_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server)).expect("client");
    let err = fetcher.fetch(0).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(204));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"homeworks": []})),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let fetcher = ReqwestFetcher::new(settings).expect("client");
    let err = fetcher.fetch(0).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
    assert!(err.message.starts_with("Эндпоинт "), "{}", err.message);
}

#[tokio::test]
async fn fetcher_reports_unreachable_endpoint() {
    let settings = FetchSettings {
        endpoint: "http://127.0.0.1:1/api/".to_string(),
        connect_timeout: Duration::from_millis(500),
        ..FetchSettings::new("practicum-token")
    };
    let fetcher = ReqwestFetcher::new(settings).expect("client");

    let first = fetcher.fetch(0).await.unwrap_err();
    let second = fetcher.fetch(0).await.unwrap_err();

    assert!(first
        .message
        .starts_with("Эндпоинт http://127.0.0.1:1/api/ недоступен: "));
    assert_eq!(first, second);
}

#[tokio::test]
async fn fetcher_rejects_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server)).expect("client");
    let err = fetcher.fetch(0).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidJson);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"homeworks\": []}"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let fetcher = ReqwestFetcher::new(settings).expect("client");
    let err = fetcher.fetch(0).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(17)
        }
    );
}

#[test]
fn settings_debug_hides_token() {
    let rendered = format!("{:?}", FetchSettings::new("secret-token"));
    assert!(!rendered.contains("secret-token"));
}
