pub mod client;

pub use client::{LlmClient, LlmClientConfig};

use crate::agents::AgentResult;
use async_trait::async_trait;

/// Seam between prompt-building agents and the LLM HTTP client.
/// Production code uses [`LlmClient`]; tests substitute stubs.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run one chat-completion call and return the assistant text verbatim.
    async fn complete(&self, system: &str, prompt: &str) -> AgentResult<String>;
}
