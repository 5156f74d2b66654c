// Response envelope shared by every endpoint
// All responses, success and error alike, serialize as {code, data?, message?}

use axum::http::StatusCode;
use serde::Serialize;

/// Uniform JSON envelope for API responses
///
/// `code` mirrors the HTTP status; `data` and `message` are omitted from the
/// serialization when absent.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 envelope carrying a payload
    pub fn ok(data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            data: Some(data),
            message: None,
        }
    }

    /// Envelope with an explicit status and payload
    pub fn with_code(code: StatusCode, data: T) -> Self {
        Self {
            code: code.as_u16(),
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    /// Envelope carrying only a status code (e.g. 201 on registration)
    pub fn code_only(code: StatusCode) -> Self {
        Self {
            code: code.as_u16(),
            data: None,
            message: None,
        }
    }

    /// Error envelope: status code plus a human-readable message
    pub fn error(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope_omits_message() {
        let res = ApiResponse::ok(json!({"id": 1}));
        let value = serde_json::to_value(&res).unwrap();
        assert_eq!(value, json!({"code": 200, "data": {"id": 1}}));
    }

    #[test]
    fn test_code_only_envelope() {
        let res = ApiResponse::code_only(StatusCode::CREATED);
        let value = serde_json::to_value(&res).unwrap();
        assert_eq!(value, json!({"code": 201}));
    }

    #[test]
    fn test_error_envelope_carries_message() {
        let res = ApiResponse::error(StatusCode::FORBIDDEN, "Insufficient permissions");
        let value = serde_json::to_value(&res).unwrap();
        assert_eq!(
            value,
            json!({"code": 403, "message": "Insufficient permissions"})
        );
    }
}
