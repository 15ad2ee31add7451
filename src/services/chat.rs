//! Chat service: one LLM round trip over a session transcript.
//!
//! Shared by the corporate assistant and the data analyst. The caller has
//! already appended the user turn; this module applies the rate limits,
//! sends system prompt + transcript, and records token usage.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::llm::LlmChat;
use crate::llm::types::{ChatOptions, LlmError};
use crate::rate_limit::RateLimitError;
use crate::services::session::Channel;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("{0}")]
    RateLimited(#[from] RateLimitError),
    #[error("{0}")]
    Llm(#[from] LlmError),
}

impl ErrorCode for ChatError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::RateLimited(e) => e.error_code(),
            Self::Llm(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::RateLimited(e) => e.retryable(),
            Self::Llm(e) => e.retryable(),
        }
    }
}

/// Ask the model for the next assistant turn of `channel`.
///
/// # Errors
///
/// Returns [`ChatError::RateLimited`] before any network call when a limit is
/// hit, or [`ChatError::Llm`] when the provider call fails.
pub async fn complete(
    state: &AppState,
    llm: &Arc<dyn LlmChat>,
    session_id: Uuid,
    channel: Channel,
    system: &str,
    options: ChatOptions,
) -> Result<String, ChatError> {
    state.rate_limiter.check_and_record(session_id)?;

    let messages = state.sessions.transcript(session_id, channel).await;
    let response = match llm.chat(options, system, &messages).await {
        Ok(response) => response,
        Err(e) => {
            warn!(
                %session_id,
                ?channel,
                code = e.error_code(),
                retryable = e.retryable(),
                error = %e,
                "chat: LLM call failed"
            );
            return Err(e.into());
        }
    };

    info!(
        %session_id,
        ?channel,
        model = %response.model,
        stop_reason = %response.stop_reason,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "chat: LLM response"
    );
    state
        .rate_limiter
        .record_tokens(session_id, response.input_tokens + response.output_tokens);

    Ok(response.text)
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
