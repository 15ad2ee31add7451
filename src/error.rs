//! Shared error classification.
//!
//! Every module owns its own `thiserror` enum. This trait gives each variant a
//! grepable code and a retryable flag so log lines stay uniform.

/// Grepable error code and retryable flag for structured log fields.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
