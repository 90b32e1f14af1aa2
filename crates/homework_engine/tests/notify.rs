use homework_engine::{Notifier, NotifyError, NotifySettings, TelegramNotifier};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> NotifySettings {
    NotifySettings {
        api_base: server.uri(),
        ..NotifySettings::new("123:bot-token", "424242")
    }
}

#[tokio::test]
async fn send_message_posts_chat_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:bot-token/sendMessage"))
        .and(body_json(json!({"chat_id": "424242", "text": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(settings_for(&server)).expect("client");
    notifier.send_message("hello").await.expect("delivered");
}

#[tokio::test]
async fn send_message_surfaces_api_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(settings_for(&server)).expect("client");
    let err = notifier.send_message("hello").await.unwrap_err();

    assert_eq!(
        err,
        NotifyError::Rejected("Bad Request: chat not found".to_string())
    );
}

#[tokio::test]
async fn send_message_reports_bare_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(settings_for(&server)).expect("client");
    let err = notifier.send_message("hello").await.unwrap_err();

    assert_eq!(err, NotifyError::HttpStatus(502));
}

#[tokio::test]
async fn transport_errors_do_not_leak_the_token() {
    let settings = NotifySettings {
        api_base: "http://127.0.0.1:1".to_string(),
        ..NotifySettings::new("123:bot-token", "424242")
    };
    let notifier = TelegramNotifier::new(settings).expect("client");

    let err = notifier.send_message("hello").await.unwrap_err();

    assert!(matches!(err, NotifyError::Network(_)));
    assert!(!err.to_string().contains("bot-token"));
}

#[tokio::test]
async fn notify_swallows_delivery_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(settings_for(&server)).expect("client");
    notifier.notify("hello").await;
}
