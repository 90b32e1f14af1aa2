use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use engine_logging::{engine_debug, engine_error};
use futures_util::StreamExt;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::{FailureKind, FetchError};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

#[derive(Clone)]
pub struct FetchSettings {
    pub endpoint: String,
    pub token: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl FetchSettings {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: token.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl fmt::Debug for FetchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchSettings")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch homework statuses changed since `from_date` (Unix seconds).
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn unreachable(&self, kind: FailureKind, cause: impl fmt::Display) -> FetchError {
        let err = FetchError::new(
            kind,
            format!("Эндпоинт {} недоступен: {cause}", self.settings.endpoint),
        );
        engine_error!("{err}");
        err
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> FetchError {
        let kind = if err.is_timeout() {
            FailureKind::Timeout
        } else {
            FailureKind::Network
        };
        self.unreachable(kind, err)
    }

    fn too_large(&self, actual: u64) -> FetchError {
        let err = FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            format!(
                "Ответ API слишком большой: {actual} байт (максимум {})",
                self.settings.max_bytes
            ),
        );
        engine_error!("{err}");
        err
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError> {
        let mut url = Url::parse(&self.settings.endpoint)
            .map_err(|err| self.unreachable(FailureKind::InvalidUrl, err))?;
        url.query_pairs_mut()
            .append_pair("from_date", &from_date.to_string());

        engine_debug!("Requesting {} from_date={}", self.settings.endpoint, from_date);
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("OAuth {}", self.settings.token))
            .send()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;

        let status = response.status();
        if status != StatusCode::OK {
            let err = FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("Код ответа API: {}", status.as_u16()),
            );
            engine_error!("{err}");
            return Err(err);
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| self.map_reqwest_error(err))?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes).map_err(|err| {
            let err = FetchError::new(
                FailureKind::InvalidJson,
                format!("Ответ API не является корректным JSON: {err}"),
            );
            engine_error!("{err}");
            err
        })
    }
}
