//! LLM: hosted chat-completion adapter for the demo chats.
//!
//! DESIGN
//! ======
//! Configured from environment variables. Groq and `OpenAI` share the
//! chat-completions wire format, so `LlmClient` wraps one `OpenAiClient`
//! pointed at the provider's base URL. Handlers only see the `LlmChat`
//! trait, which keeps the page logic testable with a mock.

pub mod config;
pub mod openai;
pub mod types;

use config::LlmConfig;
pub use types::LlmChat;
use types::{ChatOptions, ChatResponse, LlmError, Message};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete LLM client for the configured provider.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: openai::OpenAiClient,
    model: String,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        tracing::debug!(provider = ?config.provider, base_url = %config.base_url, model = %config.model, "llm: client configured");
        let inner = openai::OpenAiClient::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model })
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, options: ChatOptions, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        self.inner
            .chat(&self.model, options, system, messages)
            .await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
