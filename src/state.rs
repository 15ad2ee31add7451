//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the site config, the optional LLM client, the in-memory session
//! store and the rate limiter. No state outlives the process.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::llm::LlmChat;
use crate::rate_limit::RateLimiter;
use crate::services::session::SessionStore;

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    /// Optional LLM client. `None` when no API key is configured (demo mode).
    pub llm: Option<Arc<dyn LlmChat>>,
    pub sessions: SessionStore,
    /// In-memory rate limiter for LLM-backed chat requests.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(config: SiteConfig, llm: Option<Arc<dyn LlmChat>>) -> Self {
        let sessions = SessionStore::new(config.session_ttl);
        Self { config: Arc::new(config), llm, sessions, rate_limiter: RateLimiter::new() }
    }

    /// Model name when an LLM is configured.
    #[must_use]
    pub fn llm_model(&self) -> Option<&str> {
        self.llm.as_deref().map(LlmChat::model)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use std::sync::Mutex;

    use crate::llm::types::{ChatOptions, ChatResponse, LlmError, Message};
    use crate::rate_limit::RateLimitConfig;

    /// Create a test `AppState` in demo mode (no LLM).
    #[must_use]
    pub fn test_app_state() -> AppState {
        with_default_limits(AppState::new(SiteConfig::default(), None))
    }

    /// Create a test `AppState` with a mock LLM.
    #[must_use]
    pub fn test_app_state_with_llm(llm: Arc<dyn LlmChat>) -> AppState {
        with_default_limits(AppState::new(SiteConfig::default(), Some(llm)))
    }

    /// Create a test `AppState` with a custom site config.
    #[must_use]
    pub fn test_app_state_with_config(config: SiteConfig) -> AppState {
        with_default_limits(AppState::new(config, None))
    }

    /// Read a handler response into its status and UTF-8 body.
    pub async fn response_text(response: axum::response::Response) -> (axum::http::StatusCode, String) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn with_default_limits(mut state: AppState) -> AppState {
        state.rate_limiter = RateLimiter::with_config(RateLimitConfig::default());
        state
    }

    /// One recorded `chat` call.
    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub options: ChatOptions,
        pub system: String,
        pub messages: Vec<Message>,
    }

    /// Scripted LLM: pops queued results in order, then answers "done".
    pub struct MockLlm {
        responses: Mutex<Vec<Result<ChatResponse, LlmError>>>,
        pub calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockLlm {
        #[must_use]
        pub fn new(responses: Vec<Result<ChatResponse, LlmError>>) -> Self {
            Self { responses: Mutex::new(responses), calls: Mutex::new(Vec::new()) }
        }

        #[must_use]
        pub fn replying(text: &str) -> Self {
            Self::new(vec![Ok(text_response(text))])
        }

        pub fn recorded(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[must_use]
    pub fn text_response(text: &str) -> ChatResponse {
        ChatResponse {
            text: text.into(),
            model: "mock".into(),
            stop_reason: "end_turn".into(),
            input_tokens: 12,
            output_tokens: 8,
        }
    }

    #[async_trait::async_trait]
    impl LlmChat for MockLlm {
        async fn chat(
            &self,
            options: ChatOptions,
            system: &str,
            messages: &[Message],
        ) -> Result<ChatResponse, LlmError> {
            self.calls.lock().unwrap().push(RecordedCall {
                options,
                system: system.to_string(),
                messages: messages.to_vec(),
            });
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() { Ok(text_response("done")) } else { responses.remove(0) }
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }
}
