//! Chat session: explicitly owned, in-memory conversation state.
//!
//! The provider is stateless, so the session forwards the full
//! accumulated history on every call. Sessions are independent values;
//! any number can coexist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::provider::{CompletionBackend, TokenStream};
use crate::types::{GenerationParameters, Message};

/// An ordered conversation owned by a single caller.
///
/// Messages are appended in chronological order and never reordered;
/// [`ChatSession::clear`] is the only removal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique session ID
    pub id: String,
    messages: Vec<Message>,
    /// When the session was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// When the session last changed
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Create a new, empty session.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The full conversation in insertion order.
    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Append a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) -> &Message {
        self.push(Message::user(content))
    }

    /// Append an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) -> &Message {
        self.push(Message::assistant(content))
    }

    fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        self.updated_at = Utc::now();
        self.messages.last().expect("just pushed")
    }

    /// Remove every message. The only way messages leave a session.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.updated_at = Utc::now();
    }

    /// Run one non-streaming turn against the provider.
    ///
    /// Forwards the full history. A provider failure is captured as an
    /// assistant turn reading `"Error: ..."` rather than propagated, so
    /// the conversation stays renderable; the erroring turn is part of
    /// the history like any other. Single attempt, no retries.
    pub async fn converse(
        &mut self,
        backend: &dyn CompletionBackend,
        params: &GenerationParameters,
    ) -> String {
        let content = match backend.complete(&self.messages, params).await {
            Ok(text) => text,
            Err(e) => {
                debug!("provider call failed, surfacing inline: {}", e);
                format!("Error: {}", e)
            }
        };
        self.push_assistant(content.clone());
        content
    }

    /// Start one streaming turn against the provider.
    ///
    /// Forwards the full history and returns the fragment stream; a
    /// setup failure becomes a single `"Error: ..."` fragment. The
    /// session does not record the assistant turn yet: drain the stream,
    /// concatenate, and hand the result to [`ChatSession::finish_turn`]
    /// (error text included, so failures stay in the history). Dropping
    /// the stream cancels the in-flight call.
    pub async fn converse_streaming(
        &mut self,
        backend: &dyn CompletionBackend,
        params: &GenerationParameters,
    ) -> TokenStream {
        match backend.stream(&self.messages, params).await {
            Ok(stream) => stream,
            Err(e) => {
                debug!("provider stream failed, surfacing inline: {}", e);
                TokenStream::from_fragments(vec![format!("Error: {}", e)])
            }
        }
    }

    /// Record the assistant turn assembled from a drained stream.
    pub fn finish_turn(&mut self, content: impl Into<String>) -> &Message {
        self.push_assistant(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatError;
    use crate::provider::MockCompletionBackend;
    use crate::types::MessageRole;

    #[tokio::test]
    async fn test_converse_appends_both_turns() {
        let mut backend = MockCompletionBackend::new();
        backend
            .expect_complete()
            .returning(|_, _| Ok("Hi there!".to_string()));

        let mut session = ChatSession::new();
        session.push_user("Hello");
        let reply = session.converse(&backend, &GenerationParameters::default()).await;

        assert_eq!(reply, "Hi there!");
        assert_eq!(session.len(), 2);
        assert_eq!(session.history()[0].role, MessageRole::User);
        assert_eq!(session.history()[1].role, MessageRole::Assistant);
        assert_eq!(session.history()[1].content, "Hi there!");
    }

    #[tokio::test]
    async fn test_full_history_forwarded_every_call() {
        let mut backend = MockCompletionBackend::new();
        backend
            .expect_complete()
            .withf(|messages, _| messages.len() == 1)
            .times(1)
            .returning(|_, _| Ok("first".to_string()));
        backend
            .expect_complete()
            .withf(|messages, _| messages.len() == 3)
            .times(1)
            .returning(|_, _| Ok("second".to_string()));

        let mut session = ChatSession::new();
        let params = GenerationParameters::default();

        session.push_user("one");
        session.converse(&backend, &params).await;

        session.push_user("two");
        session.converse(&backend, &params).await;

        assert_eq!(session.len(), 4);
    }

    #[tokio::test]
    async fn test_provider_error_surfaces_inline() {
        let mut backend = MockCompletionBackend::new();
        backend.expect_complete().returning(|_, _| {
            Err(ChatError::Api {
                status: 401,
                body: "unauthorized".to_string(),
            })
        });

        let mut session = ChatSession::new();
        session.push_user("Hello");
        let reply = session.converse(&backend, &GenerationParameters::default()).await;

        assert!(reply.starts_with("Error: "));
        assert!(reply.contains("401"));
        // The failed turn is retained in history as an assistant turn.
        assert_eq!(session.len(), 2);
        assert_eq!(session.history()[1].role, MessageRole::Assistant);
        assert!(session.history()[1].content.starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_streaming_concat_matches_batch_result() {
        let mut backend = MockCompletionBackend::new();
        backend
            .expect_complete()
            .returning(|_, _| Ok("Hello, world".to_string()));
        backend.expect_stream().returning(|_, _| {
            Ok(TokenStream::from_fragments(vec![
                "Hello".to_string(),
                ", ".to_string(),
                "world".to_string(),
            ]))
        });

        let params = GenerationParameters::default();

        let mut batch = ChatSession::new();
        batch.push_user("greet");
        let batch_text = batch.converse(&backend, &params).await;

        let mut streamed = ChatSession::new();
        streamed.push_user("greet");
        let stream = streamed.converse_streaming(&backend, &params).await;
        let streamed_text = stream.collect_text().await;
        streamed.finish_turn(streamed_text.clone());

        assert_eq!(streamed_text, batch_text);
        assert_eq!(streamed.len(), batch.len());
        assert_eq!(
            streamed.history()[1].content,
            batch.history()[1].content
        );
    }

    #[tokio::test]
    async fn test_streaming_setup_error_becomes_fragment() {
        let mut backend = MockCompletionBackend::new();
        backend
            .expect_stream()
            .returning(|_, _| Err(ChatError::NotConfigured));

        let mut session = ChatSession::new();
        session.push_user("Hello");
        let stream = session
            .converse_streaming(&backend, &GenerationParameters::default())
            .await;
        let text = stream.collect_text().await;
        session.finish_turn(text.clone());

        assert!(text.starts_with("Error: "));
        assert_eq!(session.len(), 2);
        assert!(session.history()[1].content.starts_with("Error: "));
    }

    #[test]
    fn test_clear_empties_history() {
        let mut session = ChatSession::new();
        session.push_user("one");
        session.push_assistant("two");
        assert!(!session.is_empty());

        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.len(), 0);
    }
}
