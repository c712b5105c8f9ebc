//! API Errors

use serde_json::Value;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Non-2xx response
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 401 from the backend (bad credentials or expired session)
    #[error("{0}")]
    Unauthorized(String),

    /// Network failure before a response arrived
    #[error("Network error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// Request could not be built locally
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build an error from a failed response, preferring the server's message
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = server_message(body);
        if status == 401 {
            return ApiError::Unauthorized(
                message.unwrap_or_else(|| "Your session has expired. Please log in again.".to_string()),
            );
        }
        ApiError::Http {
            status,
            message: message.unwrap_or_else(|| format!("Request failed with status {}", status)),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

/// `message`, `error`, `detail`, or the first `errors[].msg`
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    for key in ["message", "error", "detail"] {
        if let Some(text) = value.get(key).and_then(Value::as_str) {
            if !text.trim().is_empty() {
                return Some(text.to_string());
            }
        }
    }
    value
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|first| first.get("msg").or_else(|| first.get("message")))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_server_message() {
        let err = ApiError::from_response(400, r#"{"message":"Phone number already registered"}"#);
        assert_eq!(err.to_string(), "Phone number already registered");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_validation_errors_array() {
        let err = ApiError::from_response(422, r#"{"errors":[{"msg":"Password too short"}]}"#);
        assert_eq!(err.to_string(), "Password too short");
    }

    #[test]
    fn test_fallback_message_for_plain_body() {
        let err = ApiError::from_response(502, "<html>Bad gateway</html>");
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn test_unauthorized_keeps_login_message() {
        let err = ApiError::from_response(401, r#"{"error":"Invalid credentials"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid credentials");

        let expired = ApiError::from_response(401, "");
        assert_eq!(expired.to_string(), "Your session has expired. Please log in again.");
    }
}
