//! HTTP response handling and the shop API envelope.

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::FetchError;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: Vec<(String, String)>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: StatusCode, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response (used by test transports).
    pub fn json_value(status: StatusCode, value: &serde_json::Value) -> Self {
        Self::new(
            status,
            vec![("Content-Type".to_string(), "application/json".to_string())],
            value.to_string().into_bytes(),
        )
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Decode(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Read the `success`/`message` envelope, if the body carries one.
    pub fn envelope(&self) -> Option<Envelope> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Turn HTTP errors and `success: false` bodies into errors.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        let envelope = self.envelope();

        if !self.is_success() {
            let message = envelope
                .and_then(|e| e.message.map(ApiMessage::into_text))
                .or_else(|| self.text().ok().filter(|t| !t.is_empty()))
                .unwrap_or_else(|| {
                    self.status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });

            if self.status == StatusCode::NOT_FOUND {
                return Err(FetchError::NotFound(message));
            }
            return Err(FetchError::Http {
                status: self.status.as_u16(),
                message,
            });
        }

        if let Some(Envelope {
            success: Some(false),
            message,
        }) = envelope
        {
            let message = message
                .map(ApiMessage::into_text)
                .unwrap_or_else(|| "request was not successful".to_string());
            return Err(FetchError::Rejected(message));
        }

        Ok(self)
    }
}

/// The `success`/`message` pair every shop API response carries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope {
    /// Whether the call was accepted.
    #[serde(default)]
    pub success: Option<bool>,
    /// Human-readable outcome.
    #[serde(default)]
    pub message: Option<ApiMessage>,
}

/// A message that is either a single string or a list (validation errors).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ApiMessage {
    Text(String),
    List(Vec<String>),
}

impl ApiMessage {
    /// Flatten into one line.
    pub fn into_text(self) -> String {
        match self {
            ApiMessage::Text(text) => text,
            ApiMessage::List(items) => items.join("; "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(StatusCode::from_u16(status).unwrap(), Vec::new(), body.to_vec())
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_response_header_case_insensitive() {
        let resp = Response::json_value(StatusCode::OK, &json!({}));
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_success_envelope_passes() {
        let resp = Response::json_value(StatusCode::OK, &json!({"success": true, "message": "ok"}));
        assert!(resp.error_for_status().is_ok());
    }

    #[test]
    fn test_body_without_envelope_passes() {
        let resp = make_response(200, b"[]");
        assert!(resp.error_for_status().is_ok());
    }

    #[test]
    fn test_success_false_is_rejected() {
        let resp = Response::json_value(
            StatusCode::OK,
            &json!({"success": false, "message": ["qty is required", "product_id is required"]}),
        );
        assert_eq!(
            resp.error_for_status().unwrap_err(),
            FetchError::Rejected("qty is required; product_id is required".to_string())
        );
    }

    #[test]
    fn test_http_error_uses_envelope_message() {
        let resp = Response::json_value(
            StatusCode::BAD_REQUEST,
            &json!({"success": false, "message": "cart is empty"}),
        );
        assert_eq!(
            resp.error_for_status().unwrap_err(),
            FetchError::Http {
                status: 400,
                message: "cart is empty".to_string()
            }
        );
    }

    #[test]
    fn test_not_found_status() {
        let resp = make_response(404, b"");
        assert_eq!(
            resp.error_for_status().unwrap_err(),
            FetchError::NotFound("Not Found".to_string())
        );
    }

    #[test]
    fn test_plain_text_error_body() {
        let resp = make_response(502, b"Bad Gateway from proxy");
        assert_eq!(
            resp.error_for_status().unwrap_err(),
            FetchError::Http {
                status: 502,
                message: "Bad Gateway from proxy".to_string()
            }
        );
    }
}
