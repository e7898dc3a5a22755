//! Response assertions and failures.
//!
//! This module provides the assertion kinds a scenario can attach to a
//! queued request, and the failure records collected when they do not hold.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::response::InjectedResponse;
use crate::session::SessionState;

/// Custom check against a response. `true` means the assertion holds.
pub type ResponsePredicate = Arc<dyn Fn(&InjectedResponse) -> bool + Send + Sync>;

/// Check that may also update the session. Returns a failure message, if any.
pub type SessionHook =
    Arc<dyn Fn(&InjectedResponse, &mut SessionState) -> Option<String> + Send + Sync>;

/// Callback fired with one request's response and failures once it is evaluated.
pub type CompletionCallback = Arc<dyn Fn(&InjectedResponse, &[Failure]) + Send + Sync>;

/// What an assertion checks.
#[derive(Clone)]
pub enum AssertionKind {
    /// Response status must equal `expected`.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Named response header must match a regex pattern.
    HeaderMatches {
        /// Header name (case-insensitive).
        name: String,
        /// Regex pattern to match.
        pattern: String,
    },
    /// Response body must contain text.
    BodyContains {
        /// Text to search for.
        text: String,
    },
    /// JSON body value at `path` must equal `expected`.
    JsonPath {
        /// JSONPath expression (e.g., "$.data.id").
        path: String,
        /// Expected value.
        expected: serde_json::Value,
    },
    /// Caller-supplied predicate.
    Predicate {
        /// Label used in failure messages.
        description: String,
        /// The check itself.
        check: ResponsePredicate,
    },
    /// Caller-supplied check with write access to the session.
    Session {
        /// Label used in logs.
        description: String,
        /// The check itself.
        hook: SessionHook,
    },
}

impl AssertionKind {
    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code = {expected}"),
            Self::HeaderMatches { name, pattern } => {
                format!("Header '{name}' matches /{pattern}/")
            }
            Self::BodyContains { text } => format!("Body contains '{text}'"),
            Self::JsonPath { path, expected } => format!("JSON {path} equals {expected}"),
            Self::Predicate { description, .. } | Self::Session { description, .. } => {
                description.clone()
            }
        }
    }
}

impl fmt::Debug for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusCode { expected } => f
                .debug_struct("StatusCode")
                .field("expected", expected)
                .finish(),
            Self::HeaderMatches { name, pattern } => f
                .debug_struct("HeaderMatches")
                .field("name", name)
                .field("pattern", pattern)
                .finish(),
            Self::BodyContains { text } => {
                f.debug_struct("BodyContains").field("text", text).finish()
            }
            Self::JsonPath { path, expected } => f
                .debug_struct("JsonPath")
                .field("path", path)
                .field("expected", expected)
                .finish(),
            Self::Predicate { description, .. } => f
                .debug_struct("Predicate")
                .field("description", description)
                .finish_non_exhaustive(),
            Self::Session { description, .. } => f
                .debug_struct("Session")
                .field("description", description)
                .finish_non_exhaustive(),
        }
    }
}

/// An assertion plus an optional callback for the request it is attached to.
///
/// Attaching an assertion never starts a run; the callback fires during the
/// next explicit run, after the owning request has been evaluated.
#[derive(Clone)]
pub struct Assertion {
    /// What is checked.
    pub kind: AssertionKind,
    /// Fired with the owning request's failures.
    pub on_complete: Option<CompletionCallback>,
}

impl Assertion {
    /// Wraps an assertion kind without a callback.
    #[must_use]
    pub const fn new(kind: AssertionKind) -> Self {
        Self {
            kind,
            on_complete: None,
        }
    }

    /// Expects an exact status code.
    #[must_use]
    pub const fn status(expected: u16) -> Self {
        Self::new(AssertionKind::StatusCode { expected })
    }

    /// Expects a header value to match a regex pattern.
    #[must_use]
    pub fn header(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(AssertionKind::HeaderMatches {
            name: name.into(),
            pattern: pattern.into(),
        })
    }

    /// Expects the body to contain some text.
    #[must_use]
    pub fn body_contains(text: impl Into<String>) -> Self {
        Self::new(AssertionKind::BodyContains { text: text.into() })
    }

    /// Expects a JSON body value at `path`.
    #[must_use]
    pub fn json_path(path: impl Into<String>, expected: serde_json::Value) -> Self {
        Self::new(AssertionKind::JsonPath {
            path: path.into(),
            expected,
        })
    }

    /// Expects a custom predicate to return `true`.
    #[must_use]
    pub fn predicate<F>(check: F) -> Self
    where
        F: Fn(&InjectedResponse) -> bool + Send + Sync + 'static,
    {
        Self::described_predicate("custom assertion", check)
    }

    /// Expects a custom predicate to return `true`, labelled for failure messages.
    #[must_use]
    pub fn described_predicate<F>(description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&InjectedResponse) -> bool + Send + Sync + 'static,
    {
        Self::new(AssertionKind::Predicate {
            description: description.into(),
            check: Arc::new(check),
        })
    }

    /// Runs a check that may update the session.
    #[must_use]
    pub fn session<F>(description: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&InjectedResponse, &mut SessionState) -> Option<String> + Send + Sync + 'static,
    {
        Self::new(AssertionKind::Session {
            description: description.into(),
            hook: Arc::new(hook),
        })
    }

    /// Attaches a completion callback.
    #[must_use]
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&InjectedResponse, &[Failure]) + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(callback));
        self
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        self.kind.description()
    }
}

impl fmt::Debug for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertion")
            .field("kind", &self.kind)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

/// One assertion that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Description of the assertion that failed.
    pub assertion: String,
    /// What went wrong.
    pub message: String,
}

impl Failure {
    /// Creates a failure record.
    #[must_use]
    pub fn new(assertion: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            assertion: assertion.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assertion_description() {
        assert_eq!(Assertion::status(200).description(), "Status code = 200");
        assert_eq!(
            Assertion::header("content-type", "json").description(),
            "Header 'content-type' matches /json/"
        );
        assert_eq!(
            Assertion::predicate(|_| true).description(),
            "custom assertion"
        );
        assert_eq!(
            Assertion::json_path("$.id", serde_json::json!(1)).description(),
            "JSON $.id equals 1"
        );
    }

    #[test]
    fn test_callback_is_optional() {
        assert!(Assertion::status(200).on_complete.is_none());
        let assertion = Assertion::status(200).with_callback(|_, _| {});
        assert!(assertion.on_complete.is_some());
    }

    #[test]
    fn test_debug_hides_closures() {
        let assertion = Assertion::described_predicate("under 500", |res| res.status < 500);
        let rendered = format!("{assertion:?}");
        assert!(rendered.contains("under 500"));
        assert!(rendered.contains("has_callback: false"));
    }

    #[test]
    fn test_failure_displays_message() {
        let failure = Failure::new("Status code = 200", "the status code is: 404 but should be: 200");
        assert_eq!(failure.to_string(), "the status code is: 404 but should be: 200");
    }
}
