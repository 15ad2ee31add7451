use super::*;
use crate::error::ErrorCode;

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_code_missing_api_key() {
    let err = LlmError::MissingApiKey { var: "GROQ_API_KEY".into() };
    assert_eq!(err.error_code(), "E_MISSING_API_KEY");
    assert!(err.to_string().contains("GROQ_API_KEY"));
}

#[test]
fn error_code_api_response() {
    let err = LlmError::ApiResponse { status: 401, body: "invalid key".into() };
    assert_eq!(err.error_code(), "E_API_RESPONSE");
    assert_eq!(err.to_string(), "API response error: status 401");
}

#[test]
fn error_code_api_parse() {
    let err = LlmError::ApiParse("json".into());
    assert_eq!(err.error_code(), "E_API_PARSE");
}

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn quota_and_server_errors_are_retryable() {
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
    assert!(LlmError::ApiRequest("timeout".into()).retryable());
}

#[test]
fn auth_and_config_errors_are_not_retryable() {
    assert!(!LlmError::ApiResponse { status: 401, body: String::new() }.retryable());
    assert!(!LlmError::ConfigParse("bad".into()).retryable());
    assert!(!LlmError::MissingApiKey { var: "K".into() }.retryable());
}

// =============================================================================
// Message / Role
// =============================================================================

#[test]
fn role_serializes_lowercase() {
    let msg = Message::assistant("hola");
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["role"], "assistant");
    assert_eq!(json["content"], "hola");
}

#[test]
fn role_as_str_matches_wire_names() {
    assert_eq!(Role::System.as_str(), "system");
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Assistant.as_str(), "assistant");
}
