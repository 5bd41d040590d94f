// Groq chat-completions API access
//
// One narrow operation: send a conversation, get the single best completion
// text back. No streaming, no multiple candidates, no retries; retry and
// backoff policy, if any, belongs to the caller.

use async_trait::async_trait;

pub mod client;
pub mod types;

pub use client::GroqClient;
pub use types::{Conversation, Message, Role};

use crate::errors::Result;

/// Trait for completion backends.
///
/// The reflection loop talks to the completion service exclusively through
/// this trait, so tests can substitute a scripted backend for the HTTP
/// client.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send a conversation and return the single best completion text.
    ///
    /// `messages` must be non-empty; `temperature` is in [0, 1] and
    /// `max_tokens` is positive (both enforced upstream by
    /// `RefinementConfig::validate`). Failures surface as
    /// `Error::Completion` carrying the upstream description.
    async fn complete(
        &self,
        messages: &[Message],
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String>;
}
