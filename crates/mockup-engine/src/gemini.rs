use reqwest::blocking::{Client as HttpClient, Response as HttpResponse};
use serde_json::Value;
use tracing::debug;

use crate::client::{ImageTransport, TransportCall, TransportError};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Blocking HTTP transport for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone, Default)]
pub struct GeminiTransport {
    http: HttpClient,
}

impl GeminiTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: HttpClient) -> Self {
        Self { http }
    }
}

impl ImageTransport for GeminiTransport {
    fn generate_content(&self, call: &TransportCall<'_>) -> Result<Value, TransportError> {
        let mut request = self
            .http
            .post(call.endpoint)
            .header(API_KEY_HEADER, call.api_key)
            .json(call.payload);
        if let Some(timeout) = call.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send()?;
        response_json_or_error(response)
    }
}

fn response_json_or_error(response: HttpResponse) -> Result<Value, TransportError> {
    let status = response.status().as_u16();
    let body = response.text()?;
    debug!(status, body_len = body.len(), "gemini response received");
    classify_response(status, &body)
}

pub(crate) fn classify_response(status: u16, body: &str) -> Result<Value, TransportError> {
    if !(200..300).contains(&status) {
        let body = truncate_text(body, 512);
        if is_credential_failure(status, &body) {
            return Err(TransportError::Credential { status, body });
        }
        return Err(TransportError::Status { status, body });
    }
    serde_json::from_str(body).map_err(|err| TransportError::InvalidPayload(err.to_string()))
}

fn is_credential_failure(status: u16, body: &str) -> bool {
    matches!(status, 401 | 403) || body.contains("API key") || body.contains("API_KEY_INVALID")
}

fn truncate_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    value.chars().take(max_chars).collect::<String>() + "…"
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_body_is_parsed() {
        let parsed = classify_response(200, r#"{"candidates": []}"#).ok();
        assert_eq!(parsed, Some(json!({ "candidates": [] })));
    }

    #[test]
    fn invalid_key_body_is_a_credential_failure() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
        let err = classify_response(400, body).unwrap_err();
        assert!(err.is_credential());
    }

    #[test]
    fn forbidden_is_a_credential_failure() {
        assert!(classify_response(403, "denied").unwrap_err().is_credential());
    }

    #[test]
    fn server_error_keeps_status_and_truncated_body() {
        let body = "x".repeat(600);
        match classify_response(503, &body) {
            Err(TransportError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body.chars().count(), 513);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn malformed_success_body_is_invalid_payload() {
        let err = classify_response(200, "<html>").unwrap_err();
        assert!(matches!(err, TransportError::InvalidPayload(_)));
    }
}
