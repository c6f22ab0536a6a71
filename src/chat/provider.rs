// HTTP client for the hosted text-generation provider
//
// Speaks the Anthropic messages API: JSON request, SSE response when
// streaming. Text deltas are relayed through a channel as they arrive; no
// buffering or re-ordering beyond line reassembly of the SSE transport.

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::config::ProviderConfig;
use crate::models::MessageRole;

/// API version header value required by the messages API
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Channel capacity for streamed text deltas
const STREAM_CHANNEL_CAPACITY: usize = 64;

/// A single conversation turn as sent over the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Errors from the provider boundary.
///
/// Callers are expected to swallow these into fallback responses; the
/// variants exist so the log line says what actually went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("network error: {0}")]
    Network(String),
    #[error("provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("failed to parse provider response: {0}")]
    Parse(String),
}

/// SSE event payload subset we care about
#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    delta: Option<StreamDelta>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    text: Option<String>,
}

/// Non-streaming messages API response subset
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Client for the messages API
pub struct ProviderClient {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Whether live calls are possible at all
    pub fn has_credential(&self) -> bool {
        self.config.has_credential()
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/v1/messages",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_body(&self, turns: &[ChatTurn], system: &str, stream: bool) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": system,
            "messages": turns,
            "stream": stream,
        })
    }

    async fn send_request(
        &self,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingApiKey)?;

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            return Err(ProviderError::Http { status, body });
        }

        Ok(response)
    }

    /// Start a streaming chat completion.
    ///
    /// Returns a receiver of text deltas once the provider has accepted the
    /// request. Errors after that point end the stream early; they are
    /// logged, not surfaced, because the response is already in flight.
    pub async fn stream_chat(
        &self,
        turns: &[ChatTurn],
        system: &str,
    ) -> Result<mpsc::Receiver<String>, ProviderError> {
        let body = self.build_body(turns, system, true);
        let response = self.send_request(&body).await?;

        let (tx, rx) = mpsc::channel::<String>(STREAM_CHANNEL_CAPACITY);

        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk) = stream.next().await {
                let chunk = match chunk {
                    Ok(c) => c,
                    Err(e) => {
                        log::warn!("[provider] stream interrupted: {}", e);
                        break;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&chunk));

                // Process complete lines; SSE frames are newline-delimited
                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim().to_string();
                    buffer.drain(..=line_end);

                    let Some(payload) = line.strip_prefix("data: ") else {
                        continue;
                    };

                    match serde_json::from_str::<StreamEvent>(payload) {
                        Ok(event) => {
                            if event.event_type == "message_stop" {
                                return;
                            }
                            if event.event_type == "content_block_delta" {
                                if let Some(text) = event.delta.and_then(|d| d.text) {
                                    if tx.send(text).await.is_err() {
                                        // Receiver dropped; client went away
                                        return;
                                    }
                                }
                            }
                        }
                        Err(e) => {
                            log::debug!("[provider] skipping unparsed SSE frame: {}", e);
                        }
                    }
                }
            }
        });

        Ok(rx)
    }

    /// One-shot completion for analysis requests
    pub async fn complete(&self, turns: &[ChatTurn], system: &str) -> Result<String, ProviderError> {
        let body = self.build_body(turns, system, false);
        let response = self.send_request(&body).await?;

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let text: String = parsed
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(ProviderError::Parse(
                "response contained no text content".to_string(),
            ));
        }

        Ok(text)
    }
}
