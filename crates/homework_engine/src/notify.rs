use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use engine_logging::{engine_debug, engine_error};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::NotifyError;

pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

#[derive(Clone)]
pub struct NotifySettings {
    pub api_base: String,
    pub token: String,
    pub chat_id: String,
    pub request_timeout: Duration,
}

impl NotifySettings {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_TELEGRAM_API.to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
            request_timeout: Duration::from_secs(20),
        }
    }
}

impl fmt::Debug for NotifySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifySettings")
            .field("api_base", &self.api_base)
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Best-effort delivery of chat messages. Implementations never fail.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str);
}

#[derive(Debug, Deserialize)]
struct TgResponse {
    ok: bool,
    description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    settings: NotifySettings,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(settings: NotifySettings) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| NotifyError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// Send `text` to the configured chat through the Bot API `sendMessage` method.
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.token
        );
        let payload = serde_json::json!({
            "chat_id": self.settings.chat_id,
            "text": text,
        });

        // Errors carry the request URL, which embeds the bot token.
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .send()
            .await
            .map_err(|err| NotifyError::Network(err.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| NotifyError::Network(err.without_url().to_string()))?;

        match serde_json::from_slice::<TgResponse>(&body) {
            Ok(TgResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Ok(TgResponse {
                description: Some(description),
                ..
            }) => Err(NotifyError::Rejected(description)),
            _ if !status.is_success() => Err(NotifyError::HttpStatus(status.as_u16())),
            _ => Err(NotifyError::Rejected(String::from_utf8_lossy(&body).into_owned())),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) {
        engine_debug!("Sending message to chat: \"{message}\"");
        if let Err(err) = self.send_message(message).await {
            engine_error!("Failed to send message to chat: \"{err}\"");
        }
    }
}
