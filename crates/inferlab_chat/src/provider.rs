//! Completion provider client.
//!
//! Talks to an OpenAI-compatible `/chat/completions` route, either
//! waiting for the full completion or consuming the SSE stream and
//! yielding text fragments as they arrive. One attempt per call; the
//! provider's own timeout governs, and no retries are performed.

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{ChatError, ChatResult};
use crate::types::{GenerationParameters, Message, MessageRole};

/// Default endpoint base URL when `INFERLAB_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/v1";

/// Default model identifier when `INFERLAB_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "HuggingFaceTB/SmolLM3-3B";

/// A lazy, finite, forward-only sequence of text fragments.
///
/// Fragments concatenate in arrival order into the full response. The
/// stream is not restartable; dropping it cancels the in-flight request.
pub struct TokenStream {
    rx: mpsc::Receiver<String>,
    task: Option<JoinHandle<()>>,
}

impl TokenStream {
    pub(crate) fn new(rx: mpsc::Receiver<String>, task: JoinHandle<()>) -> Self {
        Self { rx, task: Some(task) }
    }

    /// Build a stream from already-known fragments. Used by tests and
    /// mock backends.
    pub fn from_fragments(fragments: Vec<String>) -> Self {
        let (tx, rx) = mpsc::channel(fragments.len().max(1));
        for fragment in fragments {
            // Capacity matches; try_send cannot fail here.
            let _ = tx.try_send(fragment);
        }
        Self { rx, task: None }
    }

    /// Next fragment, or `None` once the provider is done.
    pub async fn next(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Drain the stream, concatenating every fragment.
    pub async fn collect_text(mut self) -> String {
        let mut text = String::new();
        while let Some(fragment) = self.next().await {
            text.push_str(&fragment);
        }
        text
    }
}

impl Drop for TokenStream {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Abstraction over the completion provider, mockable in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Block until the provider returns the complete response text.
    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParameters,
    ) -> ChatResult<String>;

    /// Start a streamed completion, yielding fragments as they arrive.
    async fn stream(
        &self,
        messages: &[Message],
        params: &GenerationParameters,
    ) -> ChatResult<TokenStream>;
}

/// HTTP client for a hosted OpenAI-compatible completion endpoint.
pub struct CompletionClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl CompletionClient {
    /// Create a client with explicit configuration.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from the environment.
    ///
    /// The credential comes from `HF_TOKEN`; an explicit `token`
    /// argument overrides it. `INFERLAB_BASE_URL` and `INFERLAB_MODEL`
    /// override the endpoint and model defaults.
    pub fn from_env(token: Option<String>) -> ChatResult<Self> {
        let api_key = match token {
            Some(t) if !t.is_empty() => t,
            _ => match std::env::var("HF_TOKEN") {
                Ok(t) if !t.is_empty() => t,
                _ => return Err(ChatError::NotConfigured),
            },
        };

        let base_url =
            std::env::var("INFERLAB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model =
            std::env::var("INFERLAB_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self::new(base_url, api_key, model))
    }

    /// Override the endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    async fn send_request(
        &self,
        messages: &[Message],
        params: &GenerationParameters,
        stream: bool,
    ) -> ChatResult<reqwest::Response> {
        let request = CompletionRequest {
            model: &self.model,
            messages: messages.iter().map(WireMessage::from).collect(),
            stream,
            params,
        };

        debug!(model = %self.model, stream, turns = messages.len(), "sending completion request");

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParameters,
    ) -> ChatResult<String> {
        let response = self.send_request(messages, params, false).await?;

        let result: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ChatError::MalformedResponse("no choices in response".to_string()))
    }

    async fn stream(
        &self,
        messages: &[Message],
        params: &GenerationParameters,
    ) -> ChatResult<TokenStream> {
        let response = self.send_request(messages, params, true).await?;

        let (tx, rx) = mpsc::channel::<String>(64);
        let task = tokio::spawn(async move {
            let mut bytes = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(c) => c,
                    Err(e) => {
                        // Mid-stream failure: surface inline so the turn
                        // still renders, matching the batch error path.
                        warn!("stream interrupted: {}", e);
                        let _ = tx.send(format!("Error: {}", e)).await;
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(newline) = buffer.find('\n') {
                    let line = buffer[..newline].trim().to_string();
                    buffer.drain(..=newline);

                    match parse_sse_line(&line) {
                        SseEvent::Content(text) => {
                            if tx.send(text).await.is_err() {
                                // Consumer dropped the stream; stop.
                                return;
                            }
                        }
                        SseEvent::Done => return,
                        SseEvent::Ignore => {}
                    }
                }
            }
        });

        Ok(TokenStream::new(rx, task))
    }
}

/// One parsed server-sent-events line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SseEvent {
    /// A content fragment to yield
    Content(String),
    /// End-of-stream marker
    Done,
    /// Keep-alive, empty delta, or anything else
    Ignore,
}

/// Parse a single SSE line from a streamed completion.
///
/// Pure so the wire handling is testable without a network.
pub(crate) fn parse_sse_line(line: &str) -> SseEvent {
    let Some(data) = line.strip_prefix("data:") else {
        return SseEvent::Ignore;
    };
    let data = data.trim();

    if data == "[DONE]" {
        return SseEvent::Done;
    }

    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => chunk
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.delta.content)
            .filter(|text| !text.is_empty())
            .map_or(SseEvent::Ignore, SseEvent::Content),
        // Malformed chunks are skipped rather than failing the stream.
        Err(_) => SseEvent::Ignore,
    }
}

// Wire types for the OpenAI-compatible API

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    stream: bool,
    #[serde(flatten)]
    params: &'a GenerationParameters,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: match message.role {
                MessageRole::System => "system",
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            },
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}
