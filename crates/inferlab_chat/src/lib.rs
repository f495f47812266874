//! # inferlab_chat - Conversation Session Adapter
//!
//! Bridges an ordered message history and a generation parameter set to a
//! hosted, OpenAI-compatible completion endpoint, returning generated
//! text either incrementally (streamed fragments) or atomically.
//!
//! ## Key Features
//!
//! - **Owned sessions**: history lives in an explicit [`ChatSession`],
//!   never in ambient process state, so sessions can coexist
//! - **Full-history forwarding**: the provider is stateless; every call
//!   carries the accumulated conversation
//! - **Errors stay in the conversation**: provider failures become an
//!   `"Error: ..."` assistant turn instead of tearing down the session
//! - **Thinking segmentation**: embedded reasoning segments are split
//!   from the visible response for display
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │  ChatSession │────▶│ CompletionBackend │────▶│ hosted endpoint  │
//! │  (history)   │◀────│ (batch / stream)  │◀────│ (/chat/completions)
//! └──────────────┘     └──────────────────┘     └──────────────────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   segment()  │  reasoning vs. visible response
//! └──────────────┘
//! ```

pub mod error;
pub mod provider;
pub mod segment;
pub mod session;
pub mod types;

pub use error::{ChatError, ChatResult};
pub use provider::{CompletionBackend, CompletionClient, TokenStream};
pub use segment::{segment, Segmented};
pub use session::ChatSession;
pub use types::{GenerationParameters, Message, MessageRole};
