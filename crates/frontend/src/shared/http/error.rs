//! Классификация ошибок HTTP-слоя
//!
//! Every failure the client can observe is turned into one [`ApiError`]
//! variant. The list controller stores it verbatim for the rendering layer.

use contracts::shared::api_error::{ErrorKind, ErrorSurface};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No HTTP response at all: connectivity, timeout or abort.
    #[error("{message}")]
    Network { path: String, message: String },

    /// Сервер ответил 4xx/5xx
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    /// 2xx, но тело не JSON. `body` holds the text wrapped as `{"message": ...}`.
    #[error("{message}")]
    Parse {
        status: u16,
        message: String,
        body: Value,
    },

    /// Pre-flight check failed; the request was never issued.
    #[error("{message}")]
    Validation { message: String },
}

impl ApiError {
    pub fn network(path: &str) -> Self {
        ApiError::Network {
            path: path.to_string(),
            message: format!("Network error contacting {}", path),
        }
    }

    /// Transport-level failure: the request could not be built, sent or read.
    pub fn transport(path: &str, detail: impl std::fmt::Display) -> Self {
        log::warn!("{}: transport failure: {}", path, detail);
        Self::network(path)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }

    /// 0 for network failures, the HTTP status otherwise. Validation errors
    /// never had a request, so they have no status.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network { .. } => Some(0),
            ApiError::Http { status, .. } | ApiError::Parse { status, .. } => Some(*status),
            ApiError::Validation { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Network { message, .. }
            | ApiError::Http { message, .. }
            | ApiError::Parse { message, .. }
            | ApiError::Validation { message } => message,
        }
    }

    /// Raw body when the server sent one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Http { body, .. } => body.as_ref(),
            ApiError::Parse { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network { .. } => ErrorKind::NetworkError,
            ApiError::Http { .. } => ErrorKind::HttpError,
            ApiError::Parse { .. } => ErrorKind::ParseError,
            ApiError::Validation { .. } => ErrorKind::ValidationError,
        }
    }

    pub fn surface(&self) -> ErrorSurface {
        ErrorSurface {
            kind: self.kind(),
            message: self.message().to_string(),
        }
    }
}

/// Defensive decode: JSON when it parses, `null` for an empty body, otherwise
/// the text wrapped into `{"message": text}`. The flag tells whether the body
/// was structured.
pub fn decode_body(text: &str) -> (Value, bool) {
    if text.trim().is_empty() {
        return (Value::Null, true);
    }
    match serde_json::from_str::<Value>(text) {
        Ok(v) => (v, true),
        Err(_) => (serde_json::json!({ "message": text.trim() }), false),
    }
}

/// Turn a completed HTTP exchange into the parsed body or a classified error.
pub fn classify_response(
    path: &str,
    status: u16,
    status_text: &str,
    body_text: &str,
) -> Result<Value, ApiError> {
    let (body, structured) = decode_body(body_text);

    if (200..300).contains(&status) {
        if structured {
            return Ok(body);
        }
        return Err(ApiError::Parse {
            status,
            message: format!("Invalid JSON in response from {}", path),
            body,
        });
    }

    let message = body
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.trim().is_empty())
        .map(|m| m.to_string())
        .unwrap_or_else(|| {
            let text = status_text.trim();
            if text.is_empty() {
                status.to_string()
            } else {
                format!("{} {}", status, text)
            }
        });

    Err(ApiError::Http {
        status,
        message,
        body: if body.is_null() { None } else { Some(body) },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_json() {
        let v = classify_response("/api/x", 200, "OK", r#"{"data": []}"#).unwrap();
        assert_eq!(v, json!({"data": []}));
    }

    #[test]
    fn test_success_empty_body_is_null() {
        assert_eq!(classify_response("/api/x", 204, "No Content", "").unwrap(), Value::Null);
    }

    #[test]
    fn test_success_plain_text_is_parse_error() {
        let err = classify_response("/api/x", 200, "OK", "deleted").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
        assert_eq!(err.status(), Some(200));
        assert_eq!(err.body(), Some(&json!({"message": "deleted"})));
    }

    #[test]
    fn test_http_error_prefers_body_message() {
        let err =
            classify_response("/api/x", 422, "Unprocessable Entity", r#"{"message":"Room taken"}"#)
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HttpError);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.message(), "Room taken");
    }

    #[test]
    fn test_http_error_falls_back_to_status_text() {
        let err = classify_response("/api/x", 503, "Service Unavailable", "").unwrap_err();
        assert_eq!(err.message(), "503 Service Unavailable");
        assert!(err.body().is_none());

        let err = classify_response("/api/x", 500, "", r#"{"error":"x"}"#).unwrap_err();
        assert_eq!(err.message(), "500");
    }

    #[test]
    fn test_http_error_plain_text_body_degrades() {
        let err = classify_response("/api/x", 502, "Bad Gateway", "upstream down").unwrap_err();
        assert_eq!(err.message(), "upstream down");
        assert_eq!(err.body(), Some(&json!({"message": "upstream down"})));
    }

    #[test]
    fn test_network_error() {
        let err = ApiError::network("/api/reservations");
        assert_eq!(err.status(), Some(0));
        assert_eq!(err.to_string(), "Network error contacting /api/reservations");
        assert_eq!(err.surface().kind, ErrorKind::NetworkError);
    }

    #[test]
    fn test_transport_failure_is_network() {
        let err = ApiError::transport("/api/check-ins", "invalid header value");
        assert_eq!(err.status(), Some(0));
        assert_eq!(err.kind(), ErrorKind::NetworkError);
        assert_eq!(err, ApiError::network("/api/check-ins"));
    }

    #[test]
    fn test_validation_has_no_status() {
        let err = ApiError::validation("guest_name is required");
        assert_eq!(err.status(), None);
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }
}
