//! Session carry-over state.
//!
//! Headers stored here are merged into every request executed after they
//! are set. The state lives as long as the scenario that owns it and is
//! only cleared on request.

use serde::{Deserialize, Serialize};

use crate::request::Headers;

/// Cross-request carry-over store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    headers: Headers,
}

impl SessionState {
    /// Creates an empty session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            headers: Headers::new(),
        }
    }

    /// Sets a carried-over header, replacing any previous value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.set(name, value);
    }

    /// Returns a carried-over header value.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Returns all carried-over headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Drops every carried-over value.
    pub fn clear(&mut self) {
        self.headers.clear();
    }

    /// Returns true if nothing is carried over.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_and_clear() {
        let mut session = SessionState::new();
        assert!(session.is_empty());

        session.set_header("cookie", "session=one");
        session.set_header("Cookie", "session=two");
        assert_eq!(session.header("cookie"), Some("session=two"));
        assert_eq!(session.headers().len(), 1);

        session.clear();
        assert!(session.is_empty());
    }
}
