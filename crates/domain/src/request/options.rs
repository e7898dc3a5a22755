//! Request options handed to the in-process server

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Headers, HttpMethod};
use crate::session::SessionState;

/// The concrete call a server is asked to inject.
///
/// Built from a [`RequestDescriptor`](super::RequestDescriptor) at execution
/// time and merged with the current session state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestOptions {
    /// HTTP method
    pub method: HttpMethod,
    /// Target path or URL
    pub url: String,
    /// Query parameters, only ever set for GET
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<BTreeMap<String, String>>,
    /// Structured payload, only ever set for POST/PUT/PATCH
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    /// Outgoing headers
    #[serde(default, skip_serializing_if = "Headers::is_empty")]
    pub headers: Headers,
}

impl RequestOptions {
    /// Creates options for a bare call.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Self::default()
        }
    }

    /// Returns a copy with the session headers overlaid on the request's own.
    ///
    /// Session values win on name collisions.
    #[must_use]
    pub fn merged_with(&self, session: &SessionState) -> Self {
        let mut merged = self.clone();
        merged.headers.merge(session.headers());
        merged
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_without_session_is_identity() {
        let options = RequestOptions::new(HttpMethod::Get, "/profile");
        assert_eq!(options.merged_with(&SessionState::new()), options);
    }

    #[test]
    fn test_session_wins_on_collision() {
        let mut options = RequestOptions::new(HttpMethod::Get, "/profile");
        options.headers.set("cookie", "session=old");
        options.headers.set("accept", "application/json");

        let mut session = SessionState::new();
        session.set_header("Cookie", "session=new");

        let merged = options.merged_with(&session);
        assert_eq!(merged.headers.get("cookie"), Some("session=new"));
        assert_eq!(merged.headers.get("accept"), Some("application/json"));
        // merging copies, the request keeps its own headers
        assert_eq!(options.headers.get("cookie"), Some("session=old"));
    }

    #[test]
    fn test_serializes_injection_shape() {
        let mut options = RequestOptions::new(HttpMethod::Post, "/users");
        options.payload = Some(serde_json::json!({"name": "ada"}));

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"method": "POST", "url": "/users", "payload": {"name": "ada"}})
        );
    }
}
