//! Response produced by an in-process injection
//!
//! Contains the status, headers, body and timing of one injected call.

use std::time::Duration;

use super::StatusCode;
use crate::request::Headers;

/// Response descriptor yielded by the server for one injected request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InjectedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, in the order the server emitted them.
    pub headers: Headers,
    /// Response body as text (lossy UTF-8).
    pub payload: String,
    /// Response body as raw bytes.
    pub body: Vec<u8>,
    /// Time spent inside the server.
    pub duration: Duration,
}

impl InjectedResponse {
    /// Creates a new `InjectedResponse` from raw response data.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: Headers,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        let payload = String::from_utf8_lossy(&body).into_owned();
        Self {
            status: status.into().as_u16(),
            headers,
            payload,
            body,
            duration,
        }
    }

    /// Creates an empty response with the given status.
    #[must_use]
    pub fn with_status(status: u16) -> Self {
        Self::new(status, Headers::new(), Vec::new(), Duration::ZERO)
    }

    /// Returns the status as a `StatusCode` struct.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Gets the first header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Gets every value of a repeated header (case-insensitive).
    #[must_use]
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers.get_all(name)
    }

    /// Attempts to parse the body as JSON.
    #[must_use]
    pub fn body_as_json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.payload).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_lookup_ignores_case() {
        let headers: Headers = [("Content-Type", "application/json"), ("set-cookie", "a=1")]
            .into_iter()
            .collect();
        let response = InjectedResponse::new(200u16, headers, b"{}".to_vec(), Duration::ZERO);

        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header_values("Set-Cookie"), vec!["a=1"]);
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_body_as_json() {
        let response = InjectedResponse::new(
            200u16,
            Headers::new(),
            br#"{"id": 7}"#.to_vec(),
            Duration::from_millis(3),
        );
        assert_eq!(response.payload, r#"{"id": 7}"#);
        assert_eq!(response.body_as_json(), Some(serde_json::json!({"id": 7})));

        assert_eq!(InjectedResponse::with_status(204).body_as_json(), None);
    }
}
