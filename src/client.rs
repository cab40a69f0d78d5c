// ABOUTME: Chat API client — thin reqwest wrapper for the remote chat endpoint.
// ABOUTME: POST /chat with a JSON query, decode the answer, classify failures.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EndpointConfig;

const API_KEY_HEADER: &str = "x-api-key";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Failure of one exchange with the chat API.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(String),
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The API answered with a non-2xx status.
    #[error("{}", protocol_message(.status, .detail))]
    Api { status: u16, detail: Option<String> },
    /// A 2xx body that could not be decoded.
    #[error("invalid response from chat API: {0}")]
    InvalidResponse(String),
}

fn protocol_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(d) => d.clone(),
        None => format!("HTTP error, status {status}"),
    }
}

/// The seam between the widget and the network. The TUI and tests both
/// talk to `dyn ChatBackend`; only `ChatClient` performs real HTTP.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one query and await the answer text.
    async fn ask(&self, query: &str) -> Result<String, ChatError>;
}

/// HTTP client for the chat API. One instance per session; the endpoint
/// and optional credential are fixed at construction.
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ChatClient {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ChatError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            api_key: endpoint.api_key.clone(),
        })
    }

    /// Probe `GET {base}/health`. The API reports `{"status": "ok"}` when
    /// it is up.
    pub async fn health(&self) -> Result<(), ChatError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(parse_error_body(status, &body));
        }

        let health: HealthBody = serde_json::from_str(&body)
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;
        if health.status != "ok" {
            return Err(ChatError::InvalidResponse(format!(
                "unexpected health status: {}",
                health.status
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ChatBackend for ChatClient {
    async fn ask(&self, query: &str) -> Result<String, ChatError> {
        let mut request = self
            .http
            .post(format!("{}/chat", self.base_url))
            .json(&AskRequest { query });
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(parse_error_body(status, &body));
        }

        parse_answer(&body)
    }
}

// Wire types.

#[derive(Serialize)]
struct AskRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[derive(Deserialize)]
struct HealthBody {
    status: String,
}

/// Decode a 2xx body into the answer text.
fn parse_answer(body: &str) -> Result<String, ChatError> {
    let decoded: AskResponse =
        serde_json::from_str(body).map_err(|e| ChatError::InvalidResponse(e.to_string()))?;
    Ok(decoded.answer)
}

/// Classify a non-2xx response. The API reports human-readable errors as
/// `{"detail": "..."}`; anything else falls back to a status-derived
/// message.
fn parse_error_body(status: u16, body: &str) -> ChatError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.is_empty());
    ChatError::Api { status, detail }
}
