//! Error types for the chat adapter.

use thiserror::Error;

/// Result type alias for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Failures from the completion provider or its configuration.
///
/// Only [`crate::ChatSession::converse`] converts these into inline
/// `"Error: ..."` conversation content; everything below that boundary
/// propagates them normally.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("No API token configured. Set HF_TOKEN or pass a token explicitly")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Token stream closed before completion")]
    StreamClosed,
}
